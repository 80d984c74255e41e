use leptos::prelude::*;
use thaw::*;

use crate::booking::state::RescheduleDraft;
use crate::components::SlotSelector;

/// Modal for moving an existing booking to a new date and time. Everything
/// shown here comes from the draft; the widget owns the actual state.
#[component]
pub fn RescheduleDialog(
    draft: Signal<Option<RescheduleDraft>>,
    min_date: Signal<String>,
    max_date: Signal<String>,
    on_date_change: impl Fn(String) + 'static + Copy + Send + Sync,
    on_slot_selected: impl Fn(String) + 'static + Copy + Send + Sync,
    on_confirm: impl Fn() + 'static + Copy + Send + Sync,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let current_time = Signal::derive(move || draft.get().map(|d| d.booking.time));
    let slots = Signal::derive(move || draft.get().map(|d| d.slots).unwrap_or_default());
    let has_date = Signal::derive(move || draft.get().is_some_and(|d| d.new_date.is_some()));
    let new_date_value =
        Signal::derive(move || draft.get().and_then(|d| d.new_date).unwrap_or_default());
    let loading_slots = Signal::derive(move || draft.get().is_some_and(|d| d.loading_slots));
    let submitting = Signal::derive(move || draft.get().is_some_and(|d| d.submitting));
    let confirm_disabled = Signal::derive(move || {
        !draft
            .get()
            .is_some_and(|d| d.new_date.is_some() && d.new_time.is_some() && !d.submitting)
    });

    view! {
        <div class=move || {
            if draft.get().is_some() { "dialog-overlay show" } else { "dialog-overlay" }
        }>
            <div class="dialog reschedule-dialog">
                <div class="dialog-header">
                    <h3>"Reschedule Appointment"</h3>
                    <button
                        type="button"
                        class="dialog-close"
                        on:click=move |_| {
                            if !submitting.get_untracked() {
                                on_close();
                            }
                        }
                    >
                        "×"
                    </button>
                </div>
                <div class="dialog-content">
                    {move || {
                        current_time.get().map(|time| view! {
                            <p class="reschedule-current">
                                "Currently booked for " <strong>{time}</strong>
                            </p>
                        })
                    }}
                    <label class="field-label" for="reschedule-date">"New date"</label>
                    <input
                        id="reschedule-date"
                        type="date"
                        class="date-input"
                        min=move || min_date.get()
                        max=move || max_date.get()
                        prop:value=move || new_date_value.get()
                        on:change=move |ev| on_date_change(event_target_value(&ev))
                    />
                    <div class="reschedule-slots">
                        {move || {
                            if loading_slots.get() {
                                view! {
                                    <div class="section-loading">
                                        <Spinner size=SpinnerSize::Small/>
                                    </div>
                                }.into_any()
                            } else if !has_date.get() {
                                view! {
                                    <p class="hint">"Pick a date to see open slots."</p>
                                }.into_any()
                            } else if slots.get().is_empty() {
                                view! {
                                    <p class="hint">"No open slots for this date."</p>
                                }.into_any()
                            } else {
                                view! {
                                    <SlotSelector slots=slots on_slot_selected=on_slot_selected/>
                                }.into_any()
                            }
                        }}
                    </div>
                </div>
                <div class="dialog-actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=submitting
                        on_click=move |_| on_close()
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=confirm_disabled
                        loading=submitting
                        on_click=move |_| on_confirm()
                    >
                        "Confirm Reschedule"
                    </Button>
                </div>
            </div>
        </div>
    }
}
