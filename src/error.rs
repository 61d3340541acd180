use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load settings from {}: {reason}", path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("Failed to save settings to {}: {reason}", path.display())]
    ConfigSave { path: PathBuf, reason: String },

    #[error("Invalid thresholds: green ({green} ms) must be > 0 and less than yellow ({yellow} ms)")]
    InvalidThresholds { green: u32, yellow: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Probe error: {0}")]
    Probe(String),

    #[error("Sampler error: {0}")]
    Sampler(String),
}

pub type Result<T> = std::result::Result<T, OverlayError>;
