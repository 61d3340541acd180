//! Ping Overlay - always-on-top network latency indicator
//!
//! This library periodically pings a configurable host, classifies the
//! round-trip time into green/yellow/red tiers and shows the result in a
//! small overlay pinned to a screen corner. A tray-style controller owns the
//! persisted settings and the overlay window.

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod overlay;
pub mod probe;
pub mod sampler;
pub mod terminal;
pub mod tray;

pub use error::{OverlayError, Result};
