//! Overlay window model: corner placement and window flags

pub mod placement;
pub mod window;

pub use placement::{place, Corner, Point, Size};
pub use window::{OverlayWindow, WindowFlags};
