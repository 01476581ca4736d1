//! Diagnostics setup for the `junction` binary.
//!
//! Clustering spans and events from `junction-core` go to stderr as either
//! plain lines or JSON objects, filtered by `RUST_LOG`. Records emitted through
//! the `log` crate are forwarded into the same stream.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "JUNCTION_LOG_FORMAT";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Reasons the diagnostics stream could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `JUNCTION_LOG_FORMAT` held bytes that are not UTF-8.
    #[error("`{name}` is not valid UTF-8: {source}")]
    InvalidUnicode {
        /// Variable that was read.
        name: &'static str,
        /// Error from `std::env::var`.
        #[source]
        source: env::VarError,
    },
    /// `JUNCTION_LOG_FORMAT` named neither `human` nor `json`.
    #[error("`JUNCTION_LOG_FORMAT={provided}` is not a log format; use `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value that was rejected.
        provided: String,
    },
    /// Another global subscriber was registered first.
    #[error("could not register the diagnostics subscriber: {source}")]
    InstallFailed {
        /// Registration failure.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Routes junction diagnostics to stderr. Later calls do nothing.
///
/// `JUNCTION_LOG_FORMAT=json` switches to JSON objects; the default is plain
/// lines. The filter comes from `RUST_LOG` and falls back to `info`. Spans
/// report their duration when they close. Stdout is left for the
/// run summary.
///
/// # Errors
/// Returns [`LoggingError`] when `JUNCTION_LOG_FORMAT` is not UTF-8 or names
/// an unknown format. A subscriber registered by someone else is reported on
/// stderr and is not an error.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    match install_subscriber() {
        Ok(()) => {}
        Err(LoggingError::InstallFailed { source }) => {
            eprintln!("structured logging already configured elsewhere: {source}");
        }
        Err(err) => return Err(err),
    }
    let _ = INITIALISED.set(());
    Ok(())
}

/// Output encoding for diagnostics on stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, including the span list.
    Json,
}

fn log_format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source,
        }),
    }
}

fn install_subscriber() -> Result<(), LoggingError> {
    let format = log_format_from_env()?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let fmt_layer = match format {
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Human => fmt_layer.boxed(),
    };

    // Ignored when a `log` backend is already set.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "human" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}
