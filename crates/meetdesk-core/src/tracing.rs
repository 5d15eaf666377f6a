//! Logging for the `meetdesk` binary.
//!
//! Events go to stderr as compact lines so they never mix with command
//! output on stdout. `RUST_LOG` replaces the level chosen by the preset.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Crates whose events pass the default filter.
const CRATES: [&str; 3] = ["meetdesk_core", "meetdesk_protocol", "meetdesk_client"];

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Logging preset picked from the `--debug` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level for meetdesk crates when `RUST_LOG` is not set.
    pub level: Level,
    /// Prefix each line with the event's target and source location.
    pub verbose: bool,
}

impl TracingConfig {
    /// Warnings and errors only.
    #[must_use]
    pub fn cli() -> Self {
        Self {
            level: Level::WARN,
            verbose: false,
        }
    }

    /// Used under `--debug`: HTTP calls, loads and bus traffic are visible.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            level: Level::DEBUG,
            verbose: true,
        }
    }

    fn default_directive(&self) -> String {
        CRATES
            .iter()
            .map(|krate| format!("{krate}={}", self.level))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

/// Installs the global subscriber. Call once, before the first command runs.
///
/// # Errors
///
/// Fails if another subscriber is already installed.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let layer = fmt::layer()
        .compact()
        .without_time()
        .with_writer(std::io::stderr)
        .with_target(config.verbose)
        .with_file(config.verbose)
        .with_line_number(config.verbose);

    let subscriber = tracing_subscriber::registry()
        .with(config.filter())
        .with(layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
