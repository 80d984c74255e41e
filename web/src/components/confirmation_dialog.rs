use leptos::prelude::*;
use thaw::*;

use shared_types::BookingReceipt;

/// Post-save confirmation modal showing the receipt for the new booking.
#[component]
pub fn ConfirmationDialog(
    receipt: Signal<Option<BookingReceipt>>,
    on_close: impl Fn() + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <div class=move || {
            if receipt.get().is_some() { "dialog-overlay show" } else { "dialog-overlay" }
        }>
            <div class="dialog confirmation-dialog">
                <div class="dialog-header">
                    <h3>"Booking Confirmed"</h3>
                    <button type="button" class="dialog-close" on:click=move |_| on_close()>
                        "×"
                    </button>
                </div>
                <div class="dialog-content">
                    {move || {
                        receipt.get().map(|receipt| view! {
                            <p class="confirmation-lead">"Your appointment is booked."</p>
                            <div class="confirmation-details">
                                <div class="confirmation-row">
                                    <span class="confirmation-label">"Date"</span>
                                    <span>{receipt.date}</span>
                                </div>
                                <div class="confirmation-row">
                                    <span class="confirmation-label">"Time"</span>
                                    <span>{receipt.time}</span>
                                </div>
                                <div class="confirmation-row">
                                    <span class="confirmation-label">"Reference"</span>
                                    <span>{receipt.booking_id}</span>
                                </div>
                            </div>
                        })
                    }}
                </div>
                <div class="dialog-actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| on_close()>
                        "Done"
                    </Button>
                </div>
            </div>
        </div>
    }
}
