//! Corner placement of the overlay window.
//!
//! The overlay is anchored by its outer edge: for the right-hand corners the
//! window's origin moves left as the content grows, so the position must be
//! recomputed whenever the content size changes.

use crate::constants::CORNER_MARGIN;
use crate::error::{OverlayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width and height in screen units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Absolute window origin in screen units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One of the four screen-corner presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Corner::TopLeft => "Top Left",
            Corner::TopRight => "Top Right",
            Corner::BottomLeft => "Bottom Left",
            Corner::BottomRight => "Bottom Right",
        }
    }

    fn is_right(self) -> bool {
        matches!(self, Corner::TopRight | Corner::BottomRight)
    }

    fn is_bottom(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Corner {
    type Err = OverlayError;

    /// Accepts `top-left`, `top_left`, `Top Left` and the short forms `tl`/`tr`/`bl`/`br`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match normalized.as_str() {
            "topleft" | "tl" => Ok(Corner::TopLeft),
            "topright" | "tr" => Ok(Corner::TopRight),
            "bottomleft" | "bl" => Ok(Corner::BottomLeft),
            "bottomright" | "br" => Ok(Corner::BottomRight),
            _ => Err(OverlayError::Config(format!(
                "unknown position '{}', expected one of: top-left, top-right, bottom-left, bottom-right",
                s.trim()
            ))),
        }
    }
}

/// Compute the window origin that pins `content` to `corner` of `screen`.
///
/// Subtractions saturate at zero, so content larger than the screen ends up
/// at the top/left edge instead of wrapping.
pub fn place(corner: Corner, content: Size, screen: Size) -> Point {
    let x = if corner.is_right() {
        screen
            .width
            .saturating_sub(content.width)
            .saturating_sub(CORNER_MARGIN)
    } else {
        CORNER_MARGIN
    };
    let y = if corner.is_bottom() {
        screen
            .height
            .saturating_sub(content.height)
            .saturating_sub(CORNER_MARGIN)
    } else {
        CORNER_MARGIN
    };
    Point::new(x, y)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn corner_strategy() -> impl Strategy<Value = Corner> {
        prop::sample::select(Corner::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn test_outer_edge_stays_pinned(
            corner in corner_strategy(),
            w in 1u32..400,
            h in 1u32..100,
        ) {
            let content = Size::new(w, h);
            let point = place(corner, content, SCREEN_PROP);

            if corner.is_right() {
                prop_assert_eq!(point.x + w + CORNER_MARGIN, SCREEN_PROP.width);
            } else {
                prop_assert_eq!(point.x, CORNER_MARGIN);
            }
            if corner.is_bottom() {
                prop_assert_eq!(point.y + h + CORNER_MARGIN, SCREEN_PROP.height);
            } else {
                prop_assert_eq!(point.y, CORNER_MARGIN);
            }
        }
    }

    const SCREEN_PROP: Size = Size::new(1920, 1080);
}
