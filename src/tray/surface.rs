//! Interfaces to the rendering layer and the settings dialog

use crate::config::Settings;
use crate::error::{OverlayError, Result};
use crate::overlay::{Point, Size, WindowFlags};
use crate::probe::Reading;

/// Window the overlay is drawn in
pub trait RenderLayer {
    /// Bounds of the screen the overlay lives on
    fn screen_size(&self) -> Size;

    /// Create the window, replacing any previous one.
    ///
    /// Called again whenever flags change: input transparency cannot be
    /// toggled on an existing window.
    fn create_window(&mut self, flags: WindowFlags);

    fn set_visible(&mut self, visible: bool);

    /// Draw a reading and report the resulting content size
    fn render(&mut self, reading: &Reading) -> Size;

    fn move_to(&mut self, position: Point);

    /// Print a message (help, input errors) alongside the overlay
    fn notice(&mut self, message: &str);

    fn close(&mut self);
}

/// Result of one pass through the settings dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// User confirmed; the candidate is not validated yet
    Apply(Settings),
    /// Restore defaults
    Reset,
    Cancel,
}

/// Modal settings dialog
pub trait SettingsEditor {
    /// Show the dialog pre-filled with `current`. `first_run` selects the
    /// "Start Overlay" wording over "Apply Changes".
    fn edit(&mut self, current: &Settings, first_run: bool) -> Result<EditOutcome>;

    /// Tell the user why the last `Apply` was refused
    fn reject(&mut self, error: &OverlayError);
}
