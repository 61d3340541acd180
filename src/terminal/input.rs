use crate::app::AppEvent;
use crate::tray::TrayCommand;
use colored::*;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Line-oriented input for the settings dialog
pub trait LineSource {
    /// Called before a dialog starts reading
    fn begin(&mut self) {}

    /// Next line without its terminator, `None` at end of input
    fn next_line(&mut self) -> io::Result<Option<String>>;

    /// Called after a dialog finished reading
    fn end(&mut self) {}
}

/// Dialog side of the shared input thread.
///
/// While a dialog is open (`begin` .. `end`) the input thread hands raw lines
/// here instead of parsing them as tray commands.
pub struct InputLines {
    editing: Arc<AtomicBool>,
    rx: Receiver<String>,
}

impl LineSource for InputLines {
    fn begin(&mut self) {
        // Drop lines typed before the dialog opened
        while self.rx.try_recv().is_ok() {}
        self.editing.store(true, Ordering::SeqCst);
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.rx.recv().ok())
    }

    fn end(&mut self) {
        self.editing.store(false, Ordering::SeqCst);
    }
}

/// Read tray commands from `reader` on a background thread.
///
/// Parsed commands are sent to `events`; lines arriving while a dialog is
/// open go to the returned `InputLines`. `InputClosed` is sent at end of input.
pub fn spawn_input_reader<R>(reader: R, events: Sender<AppEvent>) -> io::Result<InputLines>
where
    R: BufRead + Send + 'static,
{
    spawn_routed(reader, events, Arc::new(AtomicBool::new(false)))
}

fn spawn_routed<R>(
    reader: R,
    events: Sender<AppEvent>,
    editing: Arc<AtomicBool>,
) -> io::Result<InputLines>
where
    R: BufRead + Send + 'static,
{
    let (line_tx, line_rx) = mpsc::channel();
    let thread_editing = Arc::clone(&editing);

    thread::Builder::new()
        .name("command-input".into())
        .spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "Failed to read command input");
                        break;
                    }
                };

                if thread_editing.load(Ordering::SeqCst) {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                    continue;
                }

                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let event = if trimmed == "help" || trimmed == "?" {
                    AppEvent::Notice(format!("Commands: {}", TrayCommand::USAGE))
                } else {
                    match trimmed.parse::<TrayCommand>() {
                        Ok(command) => {
                            debug!(command = ?command, "Command received");
                            AppEvent::Command(command)
                        }
                        Err(e) => AppEvent::Notice(e.to_string().red().to_string()),
                    }
                };
                if events.send(event).is_err() {
                    return;
                }
            }
            let _ = events.send(AppEvent::InputClosed);
        })?;

    Ok(InputLines {
        editing,
        rx: line_rx,
    })
}


#[cfg(test)]
pub use tests::ReaderLines;
