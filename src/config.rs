//! Runtime configuration, read from `soc.toml` and `SOC_*` environment variables.

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

use crate::soc::client::DEFAULT_OUTPUT_PATH;
use crate::soc::fetcher::{ConnectionMode, DEFAULT_BASE_URL};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Keep one cookie-carrying session for all requests.
    #[serde(default = "default_true")]
    pub enable_session: bool,
    /// Reload terms with a second menu page fetch during startup.
    #[serde(default = "default_true")]
    pub preload_terms: bool,
    /// Per-request timeout. Failed requests are never retried.
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub request_timeout: Duration,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Config {
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file("soc.toml"))
            .merge(Env::prefixed("SOC_"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn connection_mode(&self) -> ConnectionMode {
        if self.enable_session {
            ConnectionMode::Session
        } else {
            ConnectionMode::OneShot
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_true() -> bool {
    true
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

/// Accepts either a bare number of seconds or a string like `"10s"` or `"2m"`.
fn deserialize_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Seconds(secs) => Ok(Duration::from_secs(secs)),
        Raw::Text(text) => {
            fundu::parse_duration(text.trim()).map_err(serde::de::Error::custom)
        }
    }
}
