pub mod booking_widget;
pub mod confirmation_dialog;
pub mod reschedule_dialog;
pub mod slot_selector;

// Re-export commonly used types
pub use booking_widget::BookingWidget;
pub use confirmation_dialog::ConfirmationDialog;
pub use reschedule_dialog::RescheduleDialog;
pub use slot_selector::SlotSelector;
