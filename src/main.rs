use config::Config;
use iotsmoke_rs::runner::{self, RunnerConfig};

const API_URL: &str = "http://127.0.0.1:8001";

pub fn read_settings() -> RunnerConfig {
    let mut settings = Config::default();
    settings
        .merge(config::Environment::with_prefix("IOT"))
        .unwrap()
        .set_default("api_url", API_URL)
        .unwrap()
        .set_default("login", "superadmin")
        .unwrap()
        .set_default("password", "123")
        .unwrap()
        .set_default("timeout_secs", 5_i64)
        .unwrap()
        .set_default("device_id", "ESP-A4C416")
        .unwrap();

    settings.try_into().expect("Configuration error")
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let settings = read_settings();
    match runner::run(&settings).await {
        Ok(report) => {
            for step in report.steps() {
                println!("{:<22} {:<8} {}", step.step, step.outcome, step.detail);
            }
            println!(
                "\nIoT endpoint check completed: {} passed, {} failed, {} skipped",
                report.passed(),
                report.failed(),
                report.skipped()
            );
            /* Non-fatal failures are diagnostics only; exit code stays 0 */
        }
        Err(e) => {
            eprintln!("Failed to authenticate: {}", e);
            std::process::exit(1);
        }
    }
}
