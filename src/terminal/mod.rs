//! Terminal rendering layer: status-line overlay, prompt-based settings
//! dialog and a stdin command reader in place of the tray menu

pub mod editor;
pub mod input;
pub mod overlay;

pub use editor::TerminalSettingsEditor;
pub use input::{spawn_input_reader, InputLines, LineSource};
pub use overlay::TerminalOverlay;
