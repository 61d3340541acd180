//! Persisted user settings
//!
//! Every field has a default and the struct is `#[serde(default)]`, so a
//! document written by an older version (missing keys) still loads.

use crate::constants::{DEFAULT_GREEN_THRESHOLD_MS, DEFAULT_HOST, DEFAULT_YELLOW_THRESHOLD_MS};
use crate::error::{OverlayError, Result};
use crate::overlay::{Corner, WindowFlags};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host probed every tick
    pub host: String,

    /// Latency below this is green (ms)
    pub green_threshold: u32,

    /// Latency below this is yellow, at or above it red (ms)
    pub yellow_threshold: u32,

    /// Show the settings editor before the overlay on startup
    #[serde(rename = "show_settings_on_startup", alias = "show_on_startup")]
    pub show_on_startup: bool,

    /// Let mouse input pass through the overlay
    pub click_through: bool,

    /// Screen corner the overlay is pinned to
    pub position: Corner,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            green_threshold: DEFAULT_GREEN_THRESHOLD_MS,
            yellow_threshold: DEFAULT_YELLOW_THRESHOLD_MS,
            show_on_startup: true,
            click_through: false,
            position: Corner::TopLeft,
        }
    }
}

impl Settings {
    /// Accept or reject a candidate.
    ///
    /// Thresholds must satisfy `0 < green < yellow`. A blank host is replaced
    /// by the default rather than rejected.
    pub fn validate(mut self) -> Result<Self> {
        debug!("Validating settings");
        if self.green_threshold == 0 || self.green_threshold >= self.yellow_threshold {
            return Err(OverlayError::InvalidThresholds {
                green: self.green_threshold,
                yellow: self.yellow_threshold,
            });
        }

        let host = self.host.trim();
        self.host = if host.is_empty() {
            DEFAULT_HOST.to_string()
        } else {
            host.to_string()
        };

        debug!(host = %self.host, "Settings validated successfully");
        Ok(self)
    }

    pub fn window_flags(&self) -> WindowFlags {
        WindowFlags::overlay(self.click_through)
    }
}
