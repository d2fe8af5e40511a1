//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: Settings → Result<ProbeConfig, Vec<ValidationError>>

use std::time::Duration;

use thiserror::Error;

use crate::config::schema::{ProbeConfig, Settings};
use crate::lifecycle::scheduler::ScheduleMode;

/// Longest accepted cycle deadline: one day.
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("connection URI is required")]
    MissingUri,

    #[error("timeout must be a positive number of seconds")]
    ZeroTimeout,

    #[error("timeout of {0} seconds exceeds the maximum of {max}", max = MAX_TIMEOUT_SECS)]
    TimeoutTooLarge(u64),

    #[error("metrics sink address must not be empty")]
    EmptyStatsdAddress,

    #[error("repeat interval {0} is not a usable number of seconds")]
    InvalidRepeat(f64),
}

/// Check merged settings and produce the immutable probe configuration.
pub fn validate(settings: Settings) -> Result<ProbeConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.uri.trim().is_empty() {
        errors.push(ValidationError::MissingUri);
    }

    if settings.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    } else if settings.timeout_secs > MAX_TIMEOUT_SECS {
        errors.push(ValidationError::TimeoutTooLarge(settings.timeout_secs));
    }

    let statsd_address = settings.statsd.trim().to_string();
    if statsd_address.is_empty() {
        errors.push(ValidationError::EmptyStatsdAddress);
    }

    let schedule = ScheduleMode::from_repeat_secs(settings.repeat_secs);
    if schedule.is_none() {
        errors.push(ValidationError::InvalidRepeat(settings.repeat_secs));
    }

    match schedule {
        Some(schedule) if errors.is_empty() => Ok(ProbeConfig {
            uri: settings.uri,
            timeout: Duration::from_secs(settings.timeout_secs),
            statsd_address,
            schedule,
            tags: settings.tags,
            log_format: settings.log_format,
        }),
        _ => Err(errors),
    }
}
