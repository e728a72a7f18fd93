//! Tracing subscriber setup driven by environment variables.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::boxed_input_error;

pub const TRACE_ENV: &str = "LPGLUE_TRACE";
pub const FORMAT_ENV: &str = "LPGLUE_LOG_FORMAT";
pub const FILE_ENV: &str = "LPGLUE_LOG_FILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("pretty") {
            Some(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Some(LogFormat::Json)
        } else {
            None
        }
    }
}

fn open_log_file(path: &str) -> Result<File, Box<dyn std::error::Error>> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| boxed_input_error(&format!("Failed to open log file: {err}")))
}

/// Build the level filter. `None` or `off` disables every event.
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter, Box<dyn std::error::Error>> {
    match level {
        None => Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into())),
        Some(value) if value.eq_ignore_ascii_case("off") => {
            Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
        }
        Some(value) => EnvFilter::try_new(value)
            .map_err(|err| boxed_input_error(&format!("Invalid log filter: {err}"))),
    }
}

/// Install the global subscriber.
///
/// Reads `LPGLUE_TRACE` (default `off`), `LPGLUE_LOG_FORMAT` (`pretty` or
/// `json`) and `LPGLUE_LOG_FILE`. Returns `false` if a subscriber is already
/// installed.
pub fn init_logging() -> Result<bool, Box<dyn std::error::Error>> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level = env::var(TRACE_ENV).ok();
    let filter = build_filter(level.as_deref())?;

    let format_value = env::var(FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string());
    let Some(format) = LogFormat::parse(&format_value) else {
        return Err(boxed_input_error(
            "Invalid LPGLUE_LOG_FORMAT (expected 'json' or 'pretty')",
        ));
    };
    let log_file = env::var(FILE_ENV).ok();

    match format {
        LogFormat::Json => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .json();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(&path)?)
                    .with_ansi(false)
                    .json();
                base.with(file_layer).try_init()?;
            } else {
                base.try_init()?;
            }
        }
        LogFormat::Pretty => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .pretty();
            let base = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer);
            if let Some(path) = log_file {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(open_log_file(&path)?)
                    .with_ansi(false)
                    .pretty();
                base.with(file_layer).try_init()?;
            } else {
                base.try_init()?;
            }
        }
    }

    Ok(true)
}
