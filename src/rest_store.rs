// Booking store backed by the hosted relational backend's REST interface
//
// Rows are addressed PostgREST-style: equality filters as `column=eq.value`,
// ordering as `order=column.desc`, and inserts echo the stored row back when
// sent with `Prefer: return=representation`. Identity and creation time are
// assigned by the backend.

use crate::config::{ConfigError, RestStoreConfig};
use crate::models::{Booking, NewBooking};
use crate::store::{BookingStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, error, warn};

pub struct RestBookingStore {
    client: Client,
    config: RestStoreConfig,
}

impl RestBookingStore {
    pub fn new(config: RestStoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("http client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RestStoreConfig {
        &self.config
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, self.config.bookings_url())
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    fn transport_error(&self, err: reqwest::Error) -> StoreError {
        if err.is_timeout() {
            warn!(timeout_ms = self.config.timeout_ms, "booking store request timed out");
            StoreError::Timeout(self.config.timeout_ms)
        } else {
            error!(error = %err, "booking store unreachable");
            StoreError::Unavailable(err.to_string())
        }
    }

    async fn fetch_rows(&self, query: &[(&str, String)]) -> Result<Vec<Booking>, StoreError> {
        let response = self
            .request(Method::GET)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.read_body(response).await?;
        decode_rows(&body)
    }

    async fn read_body(&self, response: Response) -> Result<String, StoreError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "booking store rejected request");
            return Err(StoreError::Unavailable(format!(
                "{} - {}",
                status.as_u16(),
                body
            )));
        }
        Ok(body)
    }
}

pub fn eq_filter(value: &str) -> String {
    format!("eq.{}", value)
}

pub fn user_query(user_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("user_id", eq_filter(user_id)),
        ("order", "created_at.desc".to_string()),
    ]
}

pub fn booking_query(booking_id: &str, user_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("id", eq_filter(booking_id)),
        ("user_id", eq_filter(user_id)),
        ("limit", "1".to_string()),
    ]
}

pub fn all_query() -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
    ]
}

// Decode a JSON array of booking rows
pub fn decode_rows(body: &str) -> Result<Vec<Booking>, StoreError> {
    serde_json::from_str::<Vec<Booking>>(body).map_err(|e| {
        warn!(error = %e, "malformed booking rows from store");
        StoreError::Decode(e.to_string())
    })
}

#[async_trait]
impl BookingStore for RestBookingStore {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&booking)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = self.read_body(response).await?;
        let created = decode_rows(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))?;

        debug!(booking_id = %created.id, user_id = %created.user_id, "booking stored remotely");
        Ok(created)
    }

    async fn bookings_by_user_id(&self, user_id: &str) -> Result<Vec<Booking>, StoreError> {
        self.fetch_rows(&user_query(user_id)).await
    }

    async fn booking_by_id(
        &self,
        booking_id: &str,
        user_id: &str,
    ) -> Result<Option<Booking>, StoreError> {
        let rows = self.fetch_rows(&booking_query(booking_id, user_id)).await?;
        Ok(rows.into_iter().next())
    }

    async fn all_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.fetch_rows(&all_query()).await
    }
}
