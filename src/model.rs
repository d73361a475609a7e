use std::time::Duration;

/// Connection parameters known before authentication.
#[derive(Debug, Clone)]
pub struct Api {
    pub api_url: String,
    pub login: String,
    pub password: String,
    pub timeout: Duration,
}

/// Authenticated session: the HTTP client plus the token issued at login.
/// The token lives only as long as this struct; there is no refresh.
#[derive(Debug)]
pub struct LoggedInApi {
    pub api_url: String,
    pub token: String,
    pub client: reqwest::Client,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Server-assigned numeric id, used for single-device lookups.
    pub id: u64,
    /// External identifier reported by the hardware, e.g. "ESP-A4C416".
    pub device_id: String,
}

/// Measurement payload submitted to the ingestion endpoint.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SensorReading {
    pub device_id: String,
    pub temperature: f64,
    pub humidity: f64,
    pub sleep_seconds: u64,
    /* unix epoch seconds */
    pub timestamp: u64,
}
