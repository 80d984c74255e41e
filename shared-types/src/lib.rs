//! Wire types exchanged between the booking UI and the scheduling backend.
//!
//! These structs are the one canonical shape for every request/response pair;
//! both the server functions and the upstream client speak exactly this.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AvailableDate {
    /// Calendar date in `YYYY-MM-DD` form, used as the selection id.
    pub date: String,
    pub month: String,
    pub day: u32,
    pub day_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BookedSlot {
    pub booking_id: String,
    pub time: String,
}

/// Slot lists for one date: open times plus existing bookings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct DaySchedule {
    pub available: Vec<String>,
    pub booked: Vec<BookedSlot>,
}

/// Returned by a successful save; `booking_id` is issued by the backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BookingReceipt {
    pub booking_id: String,
    pub date: String,
    pub time: String,
}

/// Returned by a successful reschedule: the replacement booking plus the
/// slot it vacated, so the UI can hand the old time back to the open list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RescheduleReceipt {
    pub booking_id: String,
    pub time: String,
    pub old_date: String,
    pub old_time: String,
}
