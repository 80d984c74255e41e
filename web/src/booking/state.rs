//! Pure state machine for the booking widget.
//!
//! All widget behavior lives in [`reduce`]: it consumes the current state
//! and one event, and returns the next state plus the commands (network
//! calls, notices) the caller should run. Response events carry the date
//! they were requested for, and the reducer drops any response that no
//! longer matches the current selection, so out-of-order completions can
//! never overwrite newer data.

use shared_types::{AvailableDate, BookedSlot, BookingReceipt, DaySchedule, RescheduleReceipt};

use crate::booking::slot_time;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateOption {
    /// `YYYY-MM-DD`, doubles as the selection id.
    pub id: String,
    pub month: String,
    pub day: u32,
    pub day_name: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotOption {
    pub time: String,
    pub selected: bool,
}

/// Working copy of a reschedule in progress. Nothing here touches the main
/// view until the backend confirms the move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RescheduleDraft {
    pub booking: BookedSlot,
    pub new_date: Option<String>,
    pub new_time: Option<String>,
    pub slots: Vec<SlotOption>,
    pub loading_slots: bool,
    pub submitting: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Confirmed(BookingReceipt),
    Reschedule(RescheduleDraft),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeIntent {
    Success,
    Error,
}

/// A transient status message the widget should surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub intent: NoticeIntent,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            message: message.into(),
            intent: NoticeIntent::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
            intent: NoticeIntent::Error,
        }
    }
}

/// Side effects requested by the reducer. The widget interprets these;
/// the reducer itself never talks to the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    LoadDates,
    LoadSchedule { date: String },
    LoadRescheduleSlots { date: String },
    SaveBooking { date: String, time: String },
    CancelBooking { booking_id: String },
    RescheduleBooking { booking_id: String, new_date: String, new_time: String },
    Notify(Notice),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookingEvent {
    DatesLoaded(Vec<AvailableDate>),
    DatesFailed(String),
    DateSelected(String),
    ScheduleLoaded { date: String, schedule: DaySchedule },
    ScheduleFailed { date: String, message: String },
    SlotSelected(String),
    ConfirmRequested,
    BookingSaved(BookingReceipt),
    BookingFailed(String),
    ConfirmationDismissed,
    CancelRequested { booking_id: String },
    CancelCompleted { booking_id: String },
    CancelFailed { booking_id: String, message: String },
    RescheduleOpened { booking_id: String },
    RescheduleDateChanged(String),
    RescheduleSlotsLoaded { date: String, times: Vec<String> },
    RescheduleSlotsFailed { date: String, message: String },
    RescheduleSlotSelected(String),
    RescheduleConfirmRequested,
    RescheduleSaved(RescheduleReceipt),
    RescheduleFailed(String),
    RescheduleDismissed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingState {
    pub min_date: String,
    pub max_date: String,
    pub loading_dates: bool,
    pub dates: Vec<DateOption>,
    pub selected_date: Option<String>,
    pub loading_slots: bool,
    pub open_slots: Vec<SlotOption>,
    pub booked_slots: Vec<BookedSlot>,
    pub selected_slot: Option<String>,
    pub saving: bool,
    /// Booking id of the cancellation on the wire, if any.
    pub cancelling: Option<String>,
    pub dialog: DialogState,
}

impl BookingState {
    pub fn new(min_date: impl Into<String>, max_date: impl Into<String>) -> Self {
        Self {
            min_date: min_date.into(),
            max_date: max_date.into(),
            loading_dates: true,
            dates: Vec::new(),
            selected_date: None,
            loading_slots: false,
            open_slots: Vec::new(),
            booked_slots: Vec::new(),
            selected_slot: None,
            saving: false,
            cancelling: None,
            dialog: DialogState::Closed,
        }
    }

    pub fn confirm_enabled(&self) -> bool {
        self.selected_date.is_some() && self.selected_slot.is_some() && !self.saving
    }

    pub fn reschedule_draft(&self) -> Option<&RescheduleDraft> {
        match &self.dialog {
            DialogState::Reschedule(draft) => Some(draft),
            _ => None,
        }
    }
}

/// Entry point for a freshly mounted widget: blank state for the given
/// booking window plus the initial date fetch.
pub fn init(min_date: impl Into<String>, max_date: impl Into<String>) -> (BookingState, Vec<Command>) {
    (BookingState::new(min_date, max_date), vec![Command::LoadDates])
}

pub fn reduce(mut state: BookingState, event: BookingEvent) -> (BookingState, Vec<Command>) {
    let mut commands = Vec::new();

    match event {
        BookingEvent::DatesLoaded(dates) => {
            state.loading_dates = false;
            state.dates = dates
                .into_iter()
                .map(|d| DateOption {
                    id: d.date,
                    month: d.month,
                    day: d.day,
                    day_name: d.day_name,
                    selected: false,
                })
                .collect();
        }
        BookingEvent::DatesFailed(_) => {
            // Logged at the call site; the strip just stays empty.
            state.loading_dates = false;
            state.dates.clear();
        }
        BookingEvent::DateSelected(id) => {
            if state.dates.iter().any(|d| d.id == id) {
                for date in &mut state.dates {
                    date.selected = date.id == id;
                }
                state.selected_date = Some(id.clone());
                state.selected_slot = None;
                state.open_slots.clear();
                state.booked_slots.clear();
                state.loading_slots = true;
                commands.push(Command::LoadSchedule { date: id });
            }
        }
        BookingEvent::ScheduleLoaded { date, schedule } => {
            if state.selected_date.as_deref() == Some(date.as_str()) {
                state.loading_slots = false;
                let kept_selection = state.selected_slot.clone();
                state.open_slots = schedule
                    .available
                    .into_iter()
                    .map(|time| SlotOption {
                        selected: kept_selection.as_deref() == Some(time.as_str()),
                        time,
                    })
                    .collect();
                // A selection that no longer exists in the fresh list is gone.
                if let Some(slot) = kept_selection {
                    if !state.open_slots.iter().any(|s| s.time == slot) {
                        state.selected_slot = None;
                    }
                }
                state.booked_slots = schedule.booked;
            }
        }
        BookingEvent::ScheduleFailed { date, message } => {
            if state.selected_date.as_deref() == Some(date.as_str()) {
                state.loading_slots = false;
                commands.push(Command::Notify(Notice::error(message)));
            }
        }
        BookingEvent::SlotSelected(time) => {
            if state.selected_date.is_some()
                && !time.is_empty()
                && state.open_slots.iter().any(|s| s.time == time)
            {
                for slot in &mut state.open_slots {
                    slot.selected = slot.time == time;
                }
                state.selected_slot = Some(time);
            }
        }
        BookingEvent::ConfirmRequested => {
            if !state.saving {
                match (state.selected_date.clone(), state.selected_slot.clone()) {
                    (Some(date), Some(time)) => {
                        state.saving = true;
                        commands.push(Command::SaveBooking { date, time });
                    }
                    _ => commands.push(Command::Notify(Notice::error(
                        "Please select a date and slot.",
                    ))),
                }
            }
        }
        BookingEvent::BookingSaved(receipt) => {
            state.saving = false;
            commands.push(Command::Notify(Notice::success(
                "Appointment booked successfully!",
            )));
            if state.selected_date.as_deref() == Some(receipt.date.as_str()) {
                state.booked_slots.push(BookedSlot {
                    booking_id: receipt.booking_id.clone(),
                    time: receipt.time.clone(),
                });
                state.selected_slot = None;
                for slot in &mut state.open_slots {
                    slot.selected = false;
                }
                commands.push(Command::LoadSchedule {
                    date: receipt.date.clone(),
                });
            }
            state.dialog = DialogState::Confirmed(receipt);
        }
        BookingEvent::BookingFailed(message) => {
            state.saving = false;
            commands.push(Command::Notify(Notice::error(message)));
        }
        BookingEvent::ConfirmationDismissed => {
            if matches!(state.dialog, DialogState::Confirmed(_)) {
                state.dialog = DialogState::Closed;
            }
        }
        BookingEvent::CancelRequested { booking_id } => {
            if state.cancelling.is_none()
                && state.booked_slots.iter().any(|b| b.booking_id == booking_id)
            {
                state.cancelling = Some(booking_id.clone());
                commands.push(Command::CancelBooking { booking_id });
            }
        }
        BookingEvent::CancelCompleted { booking_id } => {
            state.cancelling = None;
            state.booked_slots.retain(|b| b.booking_id != booking_id);
            commands.push(Command::Notify(Notice::success("Appointment cancelled.")));
            if let Some(date) = state.selected_date.clone() {
                commands.push(Command::LoadSchedule { date });
            }
        }
        BookingEvent::CancelFailed { message, .. } => {
            state.cancelling = None;
            commands.push(Command::Notify(Notice::error(message)));
        }
        BookingEvent::RescheduleOpened { booking_id } => {
            if matches!(state.dialog, DialogState::Closed) {
                if let Some(booking) = state
                    .booked_slots
                    .iter()
                    .find(|b| b.booking_id == booking_id)
                    .cloned()
                {
                    state.dialog = DialogState::Reschedule(RescheduleDraft {
                        booking,
                        new_date: None,
                        new_time: None,
                        slots: Vec::new(),
                        loading_slots: false,
                        submitting: false,
                    });
                }
            }
        }
        BookingEvent::RescheduleDateChanged(date) => {
            // `YYYY-MM-DD` compares lexically in calendar order. A value
            // outside the booking window is ignored and the bounded input
            // snaps back to the draft's date.
            let in_window = date.is_empty()
                || (state.min_date.as_str() <= date.as_str()
                    && date.as_str() <= state.max_date.as_str());
            if let DialogState::Reschedule(draft) = &mut state.dialog {
                if !draft.submitting && in_window {
                    draft.new_time = None;
                    draft.slots.clear();
                    if date.is_empty() {
                        draft.new_date = None;
                        draft.loading_slots = false;
                    } else {
                        draft.new_date = Some(date.clone());
                        draft.loading_slots = true;
                        commands.push(Command::LoadRescheduleSlots { date });
                    }
                }
            }
        }
        BookingEvent::RescheduleSlotsLoaded { date, times } => {
            if let DialogState::Reschedule(draft) = &mut state.dialog {
                if draft.new_date.as_deref() == Some(date.as_str()) {
                    draft.loading_slots = false;
                    draft.slots = times
                        .into_iter()
                        .map(|time| SlotOption {
                            time,
                            selected: false,
                        })
                        .collect();
                }
            }
        }
        BookingEvent::RescheduleSlotsFailed { date, message } => {
            if let DialogState::Reschedule(draft) = &mut state.dialog {
                if draft.new_date.as_deref() == Some(date.as_str()) {
                    draft.loading_slots = false;
                    commands.push(Command::Notify(Notice::error(message)));
                }
            }
        }
        BookingEvent::RescheduleSlotSelected(time) => {
            if let DialogState::Reschedule(draft) = &mut state.dialog {
                if !time.is_empty() && draft.slots.iter().any(|s| s.time == time) {
                    for slot in &mut draft.slots {
                        slot.selected = slot.time == time;
                    }
                    draft.new_time = Some(time);
                }
            }
        }
        BookingEvent::RescheduleConfirmRequested => {
            if let DialogState::Reschedule(draft) = &mut state.dialog {
                if !draft.submitting {
                    match (draft.new_date.clone(), draft.new_time.clone()) {
                        (Some(new_date), Some(new_time)) => {
                            draft.submitting = true;
                            commands.push(Command::RescheduleBooking {
                                booking_id: draft.booking.booking_id.clone(),
                                new_date,
                                new_time,
                            });
                        }
                        _ => commands.push(Command::Notify(Notice::error(
                            "Please select a new date and slot.",
                        ))),
                    }
                }
            }
        }
        BookingEvent::RescheduleSaved(receipt) => match std::mem::take(&mut state.dialog) {
            DialogState::Reschedule(draft) => {
                commands.push(Command::Notify(Notice::success(
                    "Appointment rescheduled successfully!",
                )));
                // A refresh racing this completion may already have
                // delivered the new booking; keep a single row either way.
                state.booked_slots.retain(|b| {
                    b.booking_id != draft.booking.booking_id && b.booking_id != receipt.booking_id
                });
                state.booked_slots.push(BookedSlot {
                    booking_id: receipt.booking_id,
                    time: receipt.time.clone(),
                });
                let landed_on_view = state.selected_date.is_some()
                    && draft.new_date.as_deref() == state.selected_date.as_deref();
                if landed_on_view {
                    state.open_slots.retain(|s| s.time != receipt.time);
                    if state.selected_slot.as_deref() == Some(receipt.time.as_str()) {
                        state.selected_slot = None;
                    }
                    if !state.open_slots.iter().any(|s| s.time == receipt.old_time) {
                        state.open_slots.push(SlotOption {
                            time: receipt.old_time.clone(),
                            selected: false,
                        });
                    }
                    sort_open_slots(&mut state.open_slots);
                }
            }
            // Not our dialog: leave it as it was and ignore the receipt.
            other => state.dialog = other,
        },
        BookingEvent::RescheduleFailed(message) => {
            if let DialogState::Reschedule(draft) = &mut state.dialog {
                draft.submitting = false;
                commands.push(Command::Notify(Notice::error(message)));
            }
        }
        BookingEvent::RescheduleDismissed => {
            if let DialogState::Reschedule(draft) = &state.dialog {
                // Keep the dialog up while a submit is on the wire so the
                // completion event still finds its draft.
                if !draft.submitting {
                    state.dialog = DialogState::Closed;
                }
            }
        }
    }

    (state, commands)
}

fn sort_open_slots(slots: &mut [SlotOption]) {
    slots.sort_by(|a, b| slot_time::compare(&a.time, &b.time));
}
