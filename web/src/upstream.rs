//! HTTP client for the scheduling service the server functions delegate to.

use std::sync::OnceLock;
use std::time::Duration;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use shared_types::{AvailableDate, BookingReceipt, DaySchedule, RescheduleReceipt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("scheduling API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scheduling API rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("scheduling client already initialized")]
    AlreadyInitialized,
}

impl UpstreamError {
    /// Message safe to put in front of the user: the service's own message
    /// for rejections, a generic line for transport problems.
    pub fn user_message(&self) -> String {
        match self {
            UpstreamError::Rejected { message, .. } => message.clone(),
            _ => "The scheduling service is unavailable. Please try again.".to_string(),
        }
    }
}

/// Error body the scheduling API sends for logical failures,
/// e.g. `{"error":"SlotTaken"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct SlotRequest<'a> {
    date: &'a str,
    time: &'a str,
}

pub struct SchedulingClient {
    http: reqwest::Client,
    base_url: String,
}

static CLIENT: OnceLock<SchedulingClient> = OnceLock::new();

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the shared client from `SCHEDULING_API_URL`. Call once at startup.
pub fn init_client() -> Result<(), UpstreamError> {
    let base_url = std::env::var("SCHEDULING_API_URL")
        .unwrap_or_else(|_| "http://localhost:8100".to_string());
    let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    CLIENT
        .set(SchedulingClient::new(http, base_url))
        .map_err(|_| UpstreamError::AlreadyInitialized)
}

pub fn client() -> &'static SchedulingClient {
    CLIENT
        .get()
        .expect("Scheduling client not initialized. Call init_client() first.")
}

impl SchedulingClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn available_dates(&self) -> Result<Vec<AvailableDate>, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/api/dates", self.base_url))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn day_schedule(&self, date: &str) -> Result<DaySchedule, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/api/slots/{}", self.base_url, date))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create_booking(&self, date: &str, time: &str) -> Result<BookingReceipt, UpstreamError> {
        let response = self
            .http
            .post(format!("{}/api/bookings", self.base_url))
            .json(&SlotRequest { date, time })
            .send()
            .await?;
        decode(response).await
    }

    pub async fn cancel_booking(&self, booking_id: &str) -> Result<(), UpstreamError> {
        let response = self
            .http
            .delete(format!("{}/api/bookings/{}", self.base_url, booking_id))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(rejection(status, &response.text().await.unwrap_or_default()))
        }
    }

    pub async fn reschedule_booking(
        &self,
        booking_id: &str,
        date: &str,
        time: &str,
    ) -> Result<RescheduleReceipt, UpstreamError> {
        let response = self
            .http
            .post(format!("{}/api/bookings/{}/reschedule", self.base_url, booking_id))
            .json(&SlotRequest { date, time })
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<T>().await?)
    } else {
        Err(rejection(status, &response.text().await.unwrap_or_default()))
    }
}

fn rejection(status: StatusCode, body: &str) -> UpstreamError {
    UpstreamError::Rejected {
        status: status.as_u16(),
        message: rejection_message(status, body),
    }
}

/// Prefers the `error` field of the JSON body; falls back to the status
/// line when the body is opaque.
fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.error.trim().is_empty() {
            return parsed.error;
        }
    }
    status
        .canonical_reason()
        .unwrap_or("request rejected")
        .to_string()
}
