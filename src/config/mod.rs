/// Secret loading from environment variables
pub mod secrets;

/// Settings loading from config.toml
pub mod settings;
