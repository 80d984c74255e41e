use leptos::prelude::*;
use leptos::server;
use shared_types::{AvailableDate, BookingReceipt, DaySchedule, RescheduleReceipt};

#[cfg(feature = "ssr")]
use crate::upstream::{self, UpstreamError};

#[server]
pub async fn get_available_dates() -> Result<Vec<AvailableDate>, ServerFnError> {
    match upstream::client().available_dates().await {
        Ok(dates) => Ok(dates),
        Err(e) => Err(into_server_error(e)),
    }
}

#[server]
pub async fn get_day_schedule(date: String) -> Result<DaySchedule, ServerFnError> {
    match upstream::client().day_schedule(&date).await {
        Ok(schedule) => Ok(schedule),
        Err(e) => Err(into_server_error(e)),
    }
}

#[server]
pub async fn save_booking(date: String, time: String) -> Result<BookingReceipt, ServerFnError> {
    match upstream::client().create_booking(&date, &time).await {
        Ok(receipt) => Ok(receipt),
        Err(e) => Err(into_server_error(e)),
    }
}

#[server]
pub async fn cancel_booking(booking_id: String) -> Result<(), ServerFnError> {
    match upstream::client().cancel_booking(&booking_id).await {
        Ok(()) => Ok(()),
        Err(e) => Err(into_server_error(e)),
    }
}

#[server]
pub async fn reschedule_booking(
    booking_id: String,
    new_date: String,
    new_time: String,
) -> Result<RescheduleReceipt, ServerFnError> {
    match upstream::client()
        .reschedule_booking(&booking_id, &new_date, &new_time)
        .await
    {
        Ok(receipt) => Ok(receipt),
        Err(e) => Err(into_server_error(e)),
    }
}

#[cfg(feature = "ssr")]
fn into_server_error(err: UpstreamError) -> ServerFnError {
    tracing::error!("scheduling upstream call failed: {}", err);
    ServerFnError::new(err.user_message())
}

/// Message to surface in the UI for a failed server call: the server's own
/// message when it sent one, a generic line for transport-level failures.
pub fn server_error_message(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message.clone(),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}
