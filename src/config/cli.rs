//! Command line options
//!
//! Process-level options only; user settings live in the persisted document.

use crate::constants::*;
use crate::error::{OverlayError, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Parser, Debug, Clone)]
#[command(name = "ping-overlay")]
#[command(about = "Always-on-top ping latency overlay")]
pub struct Cli {
    /// Settings file (defaults to the per-user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sampling period in milliseconds
    #[arg(long, default_value_t = DEFAULT_SAMPLE_INTERVAL_MS)]
    pub interval_ms: u64,

    /// Probe timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Screen width used for overlay placement
    #[arg(long, default_value_t = DEFAULT_SCREEN_WIDTH)]
    pub screen_width: u32,

    /// Screen height used for overlay placement
    #[arg(long, default_value_t = DEFAULT_SCREEN_HEIGHT)]
    pub screen_height: u32,

    /// Skip the settings editor on startup even if enabled in settings
    #[arg(long)]
    pub skip_settings: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub log_format: String,
}

impl Cli {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn is_json_format(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Whether the blocking settings dialog runs before the overlay appears.
    ///
    /// It runs on first run or when the settings ask for it. `--skip-settings`
    /// overrides both.
    pub fn show_startup_dialog(&self, first_run: bool, show_on_startup: bool) -> bool {
        (first_run || show_on_startup) && !self.skip_settings
    }

    /// Validates the option values
    pub fn validate(&self) -> Result<()> {
        debug!("Validating command line options");

        if self.interval_ms == 0 {
            return Err(OverlayError::Config("interval_ms must be > 0".into()));
        }

        if self.timeout_ms == 0 {
            return Err(OverlayError::Config("timeout_ms must be > 0".into()));
        }

        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(OverlayError::Config("screen size must be > 0".into()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(OverlayError::Config(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        debug!("Command line options validated successfully");
        Ok(())
    }
}
