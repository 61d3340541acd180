use crate::error::{OverlayError, Result};
use crate::overlay::Corner;
use std::str::FromStr;

/// Tray menu surface, one variant per controller action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    ShowOverlay,
    HideOverlay,
    ToggleOverlay,
    ToggleClickThrough,
    SetPosition(Corner),
    OpenSettings,
    Exit,
}

impl TrayCommand {
    /// Words accepted by `from_str`, for help output
    pub const USAGE: &'static str =
        "show | hide | toggle | click | settings | position <top-left|top-right|bottom-left|bottom-right> | exit";
}

impl FromStr for TrayCommand {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let verb = words.next().unwrap_or_default().to_lowercase();
        let rest: Vec<&str> = words.collect();

        let command = match verb.as_str() {
            "show" => TrayCommand::ShowOverlay,
            "hide" => TrayCommand::HideOverlay,
            "toggle" => TrayCommand::ToggleOverlay,
            "click" | "click-through" | "clickthrough" => TrayCommand::ToggleClickThrough,
            "settings" | "config" => TrayCommand::OpenSettings,
            "exit" | "quit" | "q" => TrayCommand::Exit,
            "position" | "pos" => {
                if rest.is_empty() {
                    return Err(OverlayError::Config("position needs a corner".into()));
                }
                TrayCommand::SetPosition(rest.join(" ").parse()?)
            }
            "" => return Err(OverlayError::Config("empty command".into())),
            other => {
                return Err(OverlayError::Config(format!(
                    "unknown command '{}', expected: {}",
                    other,
                    Self::USAGE
                )))
            }
        };
        Ok(command)
    }
}
