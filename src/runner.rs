use crate::api;
use crate::model;

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/* Fixed sample payload, mirroring what a real sensor submits */
const SAMPLE_TEMPERATURE: f64 = 25.3;
const SAMPLE_HUMIDITY: f64 = 36.1;
const SAMPLE_SLEEP_SECONDS: u64 = 2000;

pub const STEP_AUTHENTICATE: &str = "authenticate";
pub const STEP_LIST_DEVICES: &str = "list devices";
pub const STEP_PUSH_READING: &str = "push sensor reading";
pub const STEP_FETCH_DEVICE: &str = "fetch single device";

#[derive(Clone, serde::Deserialize)]
pub struct RunnerConfig {
    pub api_url: String,
    pub login: String,
    pub password: String,
    pub timeout_secs: u64,
    /// External identifier used in the sample reading.
    pub device_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => f.pad("passed"),
            Outcome::Failed => f.pad("failed"),
            Outcome::Skipped => f.pad("skipped"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: &'static str,
    pub outcome: Outcome,
    pub detail: String,
}

/// Ordered per-step results of one run. Non-fatal failures live here;
/// only a failed authentication escapes `run` as an error.
#[derive(Debug, Default)]
pub struct Report {
    steps: Vec<StepReport>,
}

impl Report {
    fn record(&mut self, step: &'static str, outcome: Outcome, detail: String) {
        self.steps.push(StepReport {
            step,
            outcome,
            detail,
        });
    }

    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    pub fn outcome(&self, step: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.step == step)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.steps.iter().filter(|s| s.outcome == outcome).count()
    }

    pub fn passed(&self) -> usize {
        self.count(Outcome::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(Outcome::Skipped)
    }
}

/// First characters of `token`, enough for diagnostics without leaking the
/// whole credential.
fn preview(token: &str) -> String {
    token.chars().take(10).collect()
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

fn sample_reading(device_id: &str) -> model::SensorReading {
    model::SensorReading {
        device_id: device_id.to_owned(),
        temperature: SAMPLE_TEMPERATURE,
        humidity: SAMPLE_HUMIDITY,
        sleep_seconds: SAMPLE_SLEEP_SECONDS,
        timestamp: unix_timestamp(),
    }
}

/// Run the whole check sequence against the configured backend.
///
/// Steps run strictly in order, each request completing before the next.
/// Authentication failure is fatal and returned as `Err`; every other step
/// failure is recorded in the report and the sequence continues.
pub async fn run(config: &RunnerConfig) -> Result<Report, api::Error> {
    let api = api::api(
        config.api_url.to_owned(),
        config.login.to_owned(),
        config.password.to_owned(),
        Duration::from_secs(config.timeout_secs),
    );

    let session = api::login(&api).await?;
    log::info!("authenticated with token {}...", preview(&session.token));

    let mut report = Report::default();
    report.record(
        STEP_AUTHENTICATE,
        Outcome::Passed,
        format!("token {}...", preview(&session.token)),
    );

    let devices = match api::devices(&session).await {
        Ok(devices) => {
            let detail = match devices.first() {
                Some(first) => format!(
                    "retrieved {} devices; first device: {}",
                    devices.len(),
                    first.device_id
                ),
                None => String::from("retrieved 0 devices"),
            };
            report.record(STEP_LIST_DEVICES, Outcome::Passed, detail);
            devices
        }
        Err(e) => {
            log::warn!("failed to list devices: {}", e);
            report.record(STEP_LIST_DEVICES, Outcome::Failed, e.to_string());
            Vec::new()
        }
    };

    let reading = sample_reading(&config.device_id);
    match api::push_reading(&session, &reading).await {
        Ok(ack) => {
            report.record(
                STEP_PUSH_READING,
                Outcome::Passed,
                format!("accepted: {}", ack),
            );
        }
        /* The ingestion endpoint normally takes unauthenticated submissions;
         * retry once with the token in case this deployment locks it down. */
        Err(unauthenticated) => match api::push_reading_authenticated(&session, &reading).await {
            Ok(ack) => {
                report.record(
                    STEP_PUSH_READING,
                    Outcome::Passed,
                    format!(
                        "accepted with authentication: {} (unauthenticated attempt: {})",
                        ack, unauthenticated
                    ),
                );
            }
            Err(e) => {
                log::warn!("failed to push sensor reading: {}", e);
                report.record(
                    STEP_PUSH_READING,
                    Outcome::Failed,
                    format!("rejected even with authentication: {}", e),
                );
            }
        },
    }

    /* Gate on the list threaded from the earlier step, never on ambient
     * state: an empty or failed listing skips the lookup. */
    match devices.first() {
        Some(first) => match api::device(&session, first.id).await {
            Ok(device) => {
                report.record(
                    STEP_FETCH_DEVICE,
                    Outcome::Passed,
                    format!("retrieved device: {}", device.device_id),
                );
            }
            Err(e) => {
                log::warn!("failed to fetch device {}: {}", first.id, e);
                report.record(STEP_FETCH_DEVICE, Outcome::Failed, e.to_string());
            }
        },
        None => {
            report.record(
                STEP_FETCH_DEVICE,
                Outcome::Skipped,
                String::from("no devices listed"),
            );
        }
    }

    Ok(report)
}
