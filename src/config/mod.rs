//! Configuration: persisted user settings and process options

pub mod cli;
pub mod settings;
pub mod shared;
pub mod store;

pub use cli::Cli;
pub use settings::Settings;
pub use shared::SharedSettings;
pub use store::ConfigStore;
