//! Configuration schema definitions.
//!
//! [`FileConfig`] is what a TOML file may contain, [`Settings`] is the merged
//! but unchecked view of file, environment and flags, and [`ProbeConfig`] is
//! the validated, immutable result the rest of the program reads.

use std::time::Duration;

use serde::Deserialize;

use crate::lifecycle::scheduler::ScheduleMode;
use crate::observability::logging::LogFormat;
use crate::observability::tags::TagSet;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_STATSD_ADDRESS: &str = "127.0.0.1:8125";

/// Optional TOML configuration file.
///
/// ```toml
/// uri = "postgres://probe@db.internal:5432/app"
/// timeout_secs = 3
/// statsd = "127.0.0.1:8125"
/// repeat_secs = 10.0
/// tags = ["env:prod", "db:main"]
/// log_format = "json"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub uri: Option<String>,
    pub timeout_secs: Option<u64>,
    pub statsd: Option<String>,
    pub repeat_secs: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub log_format: Option<LogFormat>,
}

/// Merged settings before semantic validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub uri: String,
    pub timeout_secs: u64,
    pub statsd: String,
    pub repeat_secs: f64,
    pub tags: TagSet,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            uri: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            statsd: DEFAULT_STATSD_ADDRESS.to_string(),
            repeat_secs: 0.0,
            tags: TagSet::new(),
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Overlay values present in a config file.
    pub fn apply_file(mut self, file: FileConfig) -> Self {
        if let Some(uri) = file.uri {
            self.uri = uri;
        }
        if let Some(timeout) = file.timeout_secs {
            self.timeout_secs = timeout;
        }
        if let Some(statsd) = file.statsd {
            self.statsd = statsd;
        }
        if let Some(repeat) = file.repeat_secs {
            self.repeat_secs = repeat;
        }
        if let Some(tags) = file.tags {
            self.tags = TagSet::parse(&tags.join(","));
        }
        if let Some(format) = file.log_format {
            self.log_format = format;
        }
        self
    }
}

/// Validated probe configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Connection string handed to the driver. Never logged.
    pub uri: String,

    /// Deadline for connect, ping and query together.
    pub timeout: Duration,

    /// DogStatsD collector address.
    pub statsd_address: String,

    /// Single-shot or repeating, with the repeat interval already clamped.
    pub schedule: ScheduleMode,

    /// Base tags merged into every emission.
    pub tags: TagSet,

    pub log_format: LogFormat,
}
