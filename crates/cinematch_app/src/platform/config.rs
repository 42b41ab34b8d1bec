//! Runtime configuration, read once from the process environment at startup.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use cinematch_engine::{ProbeSettings, ServiceSettings};
use engine_logging::LogDestination;
use log::LevelFilter;

pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_MODEL: &str = "CINEMATCH_MODEL";
pub const ENV_API_BASE: &str = "CINEMATCH_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "CINEMATCH_TIMEOUT_SECS";
pub const ENV_LOG: &str = "CINEMATCH_LOG";
pub const ENV_LOG_LEVEL: &str = "CINEMATCH_LOG_LEVEL";

const LOG_FILE: &str = "./cinematch.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub probe: ProbeSettings,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        // A missing key is not fatal here; the service rejects the call later.
        let mut service = ServiceSettings::with_api_key(get(ENV_API_KEY).unwrap_or_default());
        if let Some(model) = get(ENV_MODEL) {
            service.model = model;
        }
        if let Some(base) = get(ENV_API_BASE) {
            service.api_base = base;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().with_context(|| {
                format!("{ENV_TIMEOUT_SECS} must be a whole number, got {raw:?}")
            })?;
            if secs == 0 {
                bail!("{ENV_TIMEOUT_SECS} must be greater than zero");
            }
            service.request_timeout = Duration::from_secs(secs);
        }

        let log_destination = match get(ENV_LOG).as_deref() {
            None | Some("file") => LogDestination::File(PathBuf::from(LOG_FILE)),
            Some("terminal") => LogDestination::Terminal,
            Some("both") => LogDestination::Both(PathBuf::from(LOG_FILE)),
            Some(other) => bail!("{ENV_LOG} must be one of file, terminal, both; got {other:?}"),
        };

        let log_level = match get(ENV_LOG_LEVEL) {
            Some(raw) => LevelFilter::from_str(&raw)
                .with_context(|| format!("{ENV_LOG_LEVEL} is not a log level: {raw:?}"))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            service,
            probe: ProbeSettings::default(),
            log_destination,
            log_level,
        })
    }
}
