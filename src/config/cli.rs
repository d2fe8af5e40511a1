//! Command-line flags.
//!
//! Flags are accepted Go-style with a single dash (`-uri`, `-timeout=3`) as
//! well as with two; [`normalize_args`] rewrites the former before clap sees
//! them.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_file, ConfigError};
use crate::config::schema::{ProbeConfig, Settings};
use crate::config::validation::validate;
use crate::observability::logging::LogFormat;
use crate::observability::tags::TagSet;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "conntester")]
#[command(about = "Measure database connection and query latency and report it to StatsD", long_about = None)]
pub struct Cli {
    /// PostgreSQL connection URI (required)
    #[arg(long, env = "CONNTESTER_URI", hide_env_values = true)]
    pub uri: Option<String>,

    /// Deadline in seconds for connect, ping and test query [default: 5]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// StatsD server address [default: 127.0.0.1:8125]
    #[arg(long)]
    pub statsd: Option<String>,

    /// Repeat delay in seconds (0 = run once; values below 0.001 mean 1 second)
    #[arg(long, allow_negative_numbers = true)]
    pub repeat: Option<f64>,

    /// Custom tags in format k:v,k:v to add to metrics
    #[arg(long)]
    pub tags: Option<String>,

    /// TOML file with default settings; flags take precedence
    #[arg(long, env = "CONNTESTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format [default: pretty]
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Parse the process arguments, accepting single-dash long flags.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Merge config file, environment and flags into a validated config.
    pub fn resolve(self) -> Result<ProbeConfig, ConfigError> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            settings = settings.apply_file(load_file(path)?);
        }

        let settings = self.apply(settings);
        validate(settings).map_err(ConfigError::Validation)
    }

    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(uri) = self.uri {
            settings.uri = uri;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if let Some(statsd) = self.statsd {
            settings.statsd = statsd;
        }
        if let Some(repeat) = self.repeat {
            settings.repeat_secs = repeat;
        }
        if let Some(tags) = self.tags {
            settings.tags = TagSet::parse(&tags);
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
        settings
    }
}

/// Rewrite `-name` / `-name=value` to `--name` / `--name=value`.
///
/// Single-character flags (`-h`), negative numbers and everything after a
/// bare `--` are left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || passthrough {
                return arg;
            }

            let Some(s) = arg.to_str() else {
                return arg;
            };

            if s == "--" {
                passthrough = true;
                return arg;
            }

            let is_go_style = s.len() > 2
                && s.starts_with('-')
                && !s.starts_with("--")
                && s[1..].starts_with(|c: char| c.is_ascii_alphabetic());

            if is_go_style {
                OsString::from(format!("-{s}"))
            } else {
                arg
            }
        })
        .collect()
}
