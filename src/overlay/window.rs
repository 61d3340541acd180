use crate::overlay::placement::{place, Corner, Point, Size};
use tracing::debug;

/// Window attributes requested from the rendering layer.
///
/// `click_through` (input transparency) is fixed at window creation in most
/// toolkits, so a change to it requires the window to be recreated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags {
    pub always_on_top: bool,
    pub frameless: bool,
    pub tool_window: bool,
    pub click_through: bool,
}

impl WindowFlags {
    pub fn overlay(click_through: bool) -> Self {
        Self {
            always_on_top: true,
            frameless: true,
            tool_window: true,
            click_through,
        }
    }
}

/// Placement state of the overlay window
#[derive(Debug, Clone)]
pub struct OverlayWindow {
    corner: Corner,
    content: Size,
    screen: Size,
    visible: bool,
    flags: WindowFlags,
}

impl OverlayWindow {
    pub fn new(corner: Corner, screen: Size, flags: WindowFlags) -> Self {
        Self {
            corner,
            content: Size::default(),
            screen,
            visible: false,
            flags,
        }
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    pub fn content_size(&self) -> Size {
        self.content
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    /// Current origin, derived from the latest content size
    pub fn position(&self) -> Point {
        place(self.corner, self.content, self.screen)
    }

    /// Record a new content size and return the re-derived origin
    pub fn set_content_size(&mut self, content: Size) -> Point {
        if content != self.content {
            debug!(
                width = content.width,
                height = content.height,
                "Overlay content resized"
            );
        }
        self.content = content;
        self.position()
    }

    pub fn set_corner(&mut self, corner: Corner) -> Point {
        self.corner = corner;
        self.position()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Replace the window flags. Returns true when they actually changed.
    pub fn set_flags(&mut self, flags: WindowFlags) -> bool {
        let changed = self.flags != flags;
        self.flags = flags;
        changed
    }
}
