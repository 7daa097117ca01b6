//! Command-line configuration
//!
//! Provides CLI argument parsing and validation for the link simulator.

use crate::error::{LinkSimError, Result};
use crate::sampler::LinkBounds;
use clap::Parser;
use std::time::Duration;
use tracing::debug;

/// Port used when `--http` is given without a value
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// What the process does after start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print a sample block every interval until stopped
    Console,
    /// Print one JSON sample and exit
    Json,
    /// Serve samples over HTTP on the given port
    Http(u16),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "link-sim")]
#[command(about = "Microwave radio link telemetry simulator")]
pub struct Cli {
    /// Print one JSON sample to stdout and exit
    #[arg(long, conflicts_with = "http")]
    pub json: bool,

    /// Serve samples over HTTP (port defaults to 8080)
    #[arg(
        long,
        value_name = "PORT",
        num_args = 0..=1,
        default_missing_value = "8080"
    )]
    pub http: Option<u16>,

    /// Bind address for HTTP mode
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Seconds between samples in console mode
    #[arg(long, default_value_t = 5)]
    pub interval_secs: u64,

    /// Stop console mode after this many samples
    #[arg(long)]
    pub count: Option<usize>,

    /// Fixed generator seed for reproducible output (default: wall clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the live status line and console colors
    #[arg(long)]
    pub quiet: bool,

    /// Status line refresh interval in milliseconds (HTTP mode)
    #[arg(long, default_value_t = 500)]
    pub update_interval: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub log_format: String,

    #[command(flatten)]
    pub bounds: LinkBounds,
}

impl Cli {
    /// Selected run mode; `--json` and `--http` are mutually exclusive.
    pub fn mode(&self) -> Mode {
        match (self.json, self.http) {
            (true, _) => Mode::Json,
            (false, Some(port)) => Mode::Http(port),
            (false, None) => Mode::Console,
        }
    }

    /// Full bind address for HTTP mode, if that mode is selected
    pub fn address(&self) -> Option<String> {
        match self.mode() {
            Mode::Http(port) => Some(format!("{}:{}", self.bind, port)),
            _ => None,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Validates the configuration values
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        if self.http == Some(0) {
            return Err(LinkSimError::Config("port must be > 0".into()));
        }

        if self.interval_secs == 0 {
            return Err(LinkSimError::Config("interval_secs must be > 0".into()));
        }

        if self.count == Some(0) {
            return Err(LinkSimError::Config("count must be > 0".into()));
        }

        if self.update_interval == 0 {
            return Err(LinkSimError::Config("update_interval must be > 0".into()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(LinkSimError::Config(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        self.bounds.validate()?;

        debug!("Configuration validated successfully");
        Ok(())
    }

    /// Returns true if JSON format logging is enabled
    pub fn is_json_format(&self) -> bool {
        self.log_format.to_lowercase() == "json"
    }
}
