use leptos::prelude::*;

use crate::booking::state::SlotOption;

/// Presentational grid of open slot times. Which slot is highlighted comes
/// in with the data; the only thing going out is the clicked time string.
#[component]
pub fn SlotSelector(
    slots: Signal<Vec<SlotOption>>,
    on_slot_selected: impl Fn(String) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <div class="slot-selector">
            {move || {
                slots
                    .get()
                    .into_iter()
                    .map(|slot| {
                        let time = slot.time.clone();
                        let selected = slot.selected;
                        view! {
                            <button
                                type="button"
                                class="slot-button"
                                class:selected=move || selected
                                on:click=move |_| {
                                    if time.is_empty() {
                                        leptos::logging::error!("Slot clicked without a time value");
                                        return;
                                    }
                                    on_slot_selected(time.clone());
                                }
                            >
                                {slot.time}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
