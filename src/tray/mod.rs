//! Tray control surface: commands, UI boundary traits and the controller

pub mod command;
pub mod controller;
pub mod surface;

pub use command::TrayCommand;
pub use controller::{Flow, TrayController};
pub use surface::{EditOutcome, RenderLayer, SettingsEditor};
