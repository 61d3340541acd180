use crate::constants::*;
use crate::overlay::{Point, Size, WindowFlags};
use crate::probe::Reading;
use crate::tray::RenderLayer;
use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use tracing::{debug, warn};

/// Overlay drawn as a single status line on stdout.
///
/// Stands in for a desktop window: the spinner line is the overlay label,
/// colored with the tier colors, and window creation maps to a fresh
/// progress bar.
pub struct TerminalOverlay {
    screen: Size,
    bar: Option<ProgressBar>,
    flags: Option<WindowFlags>,
    visible: bool,
    position: Point,
    draw: bool,
}

impl TerminalOverlay {
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            bar: None,
            flags: None,
            visible: false,
            position: Point::default(),
            draw: true,
        }
    }

    /// Overlay that never draws the status line, for when stdout is not a terminal
    pub fn headless(screen: Size) -> Self {
        Self {
            draw: false,
            ..Self::new(screen)
        }
    }

    /// Size of the label needed to show `text`
    pub fn content_size(text: &str) -> Size {
        let glyphs = text.chars().count() as u32;
        Size::new(
            glyphs * GLYPH_WIDTH + 2 * LABEL_PADDING_X,
            LINE_HEIGHT + 2 * LABEL_PADDING_Y,
        )
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn flags(&self) -> Option<WindowFlags> {
        self.flags
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn style(flags: WindowFlags) -> ProgressStyle {
        let template = if flags.click_through {
            "{spinner:.dim} {msg} {prefix:.dim}"
        } else {
            "{spinner:.dim} {msg}"
        };
        ProgressStyle::with_template(template).unwrap_or_else(|e| {
            warn!(error = %e, "Invalid overlay template, using default spinner");
            ProgressStyle::default_spinner()
        })
    }

    fn draw_target(&self) -> ProgressDrawTarget {
        if self.visible && self.draw {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        }
    }
}

impl RenderLayer for TerminalOverlay {
    fn screen_size(&self) -> Size {
        self.screen
    }

    fn create_window(&mut self, flags: WindowFlags) {
        if let Some(old) = self.bar.take() {
            old.finish_and_clear();
        }

        let bar = ProgressBar::with_draw_target(None, self.draw_target());
        bar.set_style(Self::style(flags));
        if flags.click_through {
            bar.set_prefix("click-through");
        }
        if self.draw {
            bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_INTERVAL_MS));
        }

        debug!(click_through = flags.click_through, "Overlay window created");
        self.bar = Some(bar);
        self.flags = Some(flags);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        let target = self.draw_target();
        if let Some(bar) = &self.bar {
            bar.set_draw_target(target);
        }
    }

    fn render(&mut self, reading: &Reading) -> Size {
        let (r, g, b) = reading.tier.rgb();
        if let Some(bar) = &self.bar {
            bar.set_message(reading.text.truecolor(r, g, b).bold().to_string());
        }
        Self::content_size(&reading.text)
    }

    fn move_to(&mut self, position: Point) {
        if position != self.position {
            debug!(x = position.x, y = position.y, "Overlay moved");
        }
        self.position = position;
    }

    fn notice(&mut self, message: &str) {
        match &self.bar {
            // Clears the status line, prints, then redraws it underneath
            Some(bar) => bar.suspend(|| println!("{}", message)),
            None => println!("{}", message),
        }
    }

    fn close(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        self.visible = false;
    }
}
