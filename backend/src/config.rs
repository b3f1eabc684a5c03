//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LEADBOARD_*` environment variables and an
//! optional config file, in that order of precedence.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::PayloadPolicy;

const DEFAULT_DATA_DIR: &str = "leadboard-data";

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Raised when `log_format` names neither `json` nor `pretty`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log format `{0}`; expected `json` or `pretty`")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(value.to_owned())),
        }
    }
}

/// Settings for the `leadboard` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEADBOARD")]
pub struct LeadboardSettings {
    /// Directory holding `users.json` and `leads.json`.
    pub data_dir: Option<PathBuf>,
    /// Seconds between feed refreshes.
    #[ortho_config(default = 5)]
    pub refresh_interval_secs: u64,
    /// Reject malformed payloads instead of treating them as empty.
    pub strict_payloads: Option<bool>,
    /// Seed for reproducible mock data.
    pub seed: Option<u64>,
    /// Username of the session opened at startup.
    pub username: Option<String>,
    /// Password of the session opened at startup.
    pub password: Option<String>,
    /// `json` (default) or `pretty`.
    pub log_format: Option<String>,
}

impl LeadboardSettings {
    /// Configured data directory, falling back to `./leadboard-data`.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Refresh period; zero is raised to one second.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    /// How the record store treats malformed payloads; unset fails open.
    #[must_use]
    pub const fn payload_policy(&self) -> PayloadPolicy {
        PayloadPolicy::from_strict(matches!(self.strict_payloads, Some(true)))
    }

    /// Parsed log format.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLogFormat`] for values other than `json` or `pretty`.
    pub fn log_format(&self) -> Result<LogFormat, UnknownLogFormat> {
        self.log_format
            .as_deref()
            .map_or(Ok(LogFormat::default()), LogFormat::from_str)
    }

    /// Startup credentials when both halves are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.username.as_deref().zip(self.password.as_deref())
    }
}
