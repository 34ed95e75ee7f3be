//! User configuration (`~/.pwvault/config.toml`).

pub mod settings;

pub use settings::Settings;
