use crate::config::Settings;
use crate::constants::{THRESHOLD_INPUT_MAX_MS, THRESHOLD_INPUT_MIN_MS};
use crate::error::{OverlayError, Result};
use crate::overlay::Corner;
use crate::terminal::input::LineSource;
use crate::tray::{EditOutcome, SettingsEditor};
use colored::*;
use std::io::Write;
use tracing::debug;

/// Prompt-driven settings dialog.
///
/// Each field shows its current value as the default; an empty answer keeps
/// it. End of input at any prompt cancels the dialog.
pub struct TerminalSettingsEditor<L: LineSource, W: Write> {
    lines: L,
    out: W,
}

impl<L: LineSource, W: Write> TerminalSettingsEditor<L, W> {
    pub fn new(lines: L, out: W) -> Self {
        Self { lines, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Raw trimmed answer, `None` at end of input
    fn prompt(&mut self, prompt: &str, hint: &str) -> Result<Option<String>> {
        write!(self.out, "{} [{}]: ", prompt, hint)?;
        self.out.flush()?;

        let Some(line) = self.lines.next_line()? else {
            writeln!(self.out)?;
            return Ok(None);
        };
        Ok(Some(line.trim().to_string()))
    }

    fn ask(&mut self, prompt: &str, default: &str) -> Result<Option<String>> {
        Ok(self.prompt(prompt, default)?.map(|answer| {
            if answer.is_empty() {
                default.to_string()
            } else {
                answer
            }
        }))
    }

    fn ask_threshold(&mut self, prompt: &str, default: u32) -> Result<Option<u32>> {
        loop {
            let Some(answer) = self.ask(prompt, &default.to_string())? else {
                return Ok(None);
            };
            match answer.parse::<u32>() {
                Ok(value) if (THRESHOLD_INPUT_MIN_MS..=THRESHOLD_INPUT_MAX_MS).contains(&value) => {
                    return Ok(Some(value))
                }
                _ => writeln!(
                    self.out,
                    "{}",
                    format!(
                        "Enter a whole number between {} and {}.",
                        THRESHOLD_INPUT_MIN_MS, THRESHOLD_INPUT_MAX_MS
                    )
                    .red()
                )?,
            }
        }
    }

    fn ask_yes_no(&mut self, prompt: &str, default: bool) -> Result<Option<bool>> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let Some(answer) = self.prompt(prompt, hint)? else {
                return Ok(None);
            };
            match answer.to_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(self.out, "{}", "Please enter 'y' or 'n'.".red())?,
            }
        }
    }

    fn ask_corner(&mut self, default: Corner) -> Result<Option<Corner>> {
        loop {
            let Some(answer) = self.ask(
                "Position (top-left, top-right, bottom-left, bottom-right)",
                default.label(),
            )?
            else {
                return Ok(None);
            };
            match answer.parse::<Corner>() {
                Ok(corner) => return Ok(Some(corner)),
                Err(e) => writeln!(self.out, "{}", e.to_string().red())?,
            }
        }
    }

    fn ask_action(&mut self, first_run: bool) -> Result<Option<char>> {
        let confirm = if first_run { "Start Overlay" } else { "Apply Changes" };
        writeln!(
            self.out,
            "  [s] {}   [c] Cancel   [r] Reset to Defaults",
            confirm
        )?;
        loop {
            let Some(answer) = self.ask("Choice", "s")? else {
                return Ok(None);
            };
            match answer.to_lowercase().chars().next() {
                Some(c @ ('s' | 'c' | 'r')) => return Ok(Some(c)),
                _ => writeln!(self.out, "{}", "Choose s, c or r.".red())?,
            }
        }
    }

    fn dialog(&mut self, current: &Settings, first_run: bool) -> Result<EditOutcome> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "Ping Overlay Settings".bold())?;

        let Some(host) = self.ask("Ping host", &current.host)? else {
            return Ok(EditOutcome::Cancel);
        };
        let Some(green_threshold) = self.ask_threshold("Green < ms", current.green_threshold)?
        else {
            return Ok(EditOutcome::Cancel);
        };
        let Some(yellow_threshold) =
            self.ask_threshold("Yellow < ms", current.yellow_threshold)?
        else {
            return Ok(EditOutcome::Cancel);
        };
        let Some(show_on_startup) =
            self.ask_yes_no("Show this settings dialog on startup?", current.show_on_startup)?
        else {
            return Ok(EditOutcome::Cancel);
        };
        let Some(click_through) = self.ask_yes_no(
            "Enable click-through mode (transparent to mouse clicks)?",
            current.click_through,
        )?
        else {
            return Ok(EditOutcome::Cancel);
        };
        let Some(position) = self.ask_corner(current.position)? else {
            return Ok(EditOutcome::Cancel);
        };

        let outcome = match self.ask_action(first_run)? {
            Some('s') => EditOutcome::Apply(Settings {
                host,
                green_threshold,
                yellow_threshold,
                show_on_startup,
                click_through,
                position,
            }),
            Some('r') => EditOutcome::Reset,
            _ => EditOutcome::Cancel,
        };
        Ok(outcome)
    }
}

impl<L: LineSource, W: Write> SettingsEditor for TerminalSettingsEditor<L, W> {
    fn edit(&mut self, current: &Settings, first_run: bool) -> Result<EditOutcome> {
        self.lines.begin();
        let outcome = self.dialog(current, first_run);
        self.lines.end();
        debug!(outcome = ?outcome, "Settings dialog closed");
        outcome
    }

    fn reject(&mut self, error: &OverlayError) {
        let message = match error {
            OverlayError::InvalidThresholds { .. } => {
                "Invalid thresholds: green threshold must be less than yellow threshold.".to_string()
            }
            other => other.to_string(),
        };
        let _ = writeln!(self.out, "{}", message.red().bold());
    }
}
