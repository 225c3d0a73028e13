// Configuration for the booking service and the hosted booking store

use crate::models::BookingStatus;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// Checks the booking service applies before anything reaches the store
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    // A selected guide must work at the package's destination
    pub enforce_guide_destination: bool,
    // The first travel day may not be earlier than today
    pub reject_past_start_date: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            enforce_guide_destination: true,
            reject_past_start_date: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub store_timeout_ms: u64,
    pub initial_status: BookingStatus,
    pub validation: ValidationPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: 5000,
            initial_status: BookingStatus::Confirmed,
            validation: ValidationPolicy::default(),
        }
    }
}

impl ServiceConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "store_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// Connection settings for the hosted relational backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RestStoreConfig {
    pub base_url: String,
    pub api_key: String,
    pub bookings_table: String,
    pub timeout_ms: u64,
}

impl Default for RestStoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            bookings_table: "bookings".to_string(),
            timeout_ms: 10000,
        }
    }
}

impl RestStoreConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RestStoreConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url is required".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("api_key is required".to_string()));
        }
        if self.bookings_table.trim().is_empty() {
            return Err(ConfigError::Invalid("bookings_table is required".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    // Collection endpoint of the bookings table
    pub fn bookings_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.bookings_table
        )
    }
}
