//! Application settings loading from config.toml.
//!
//! The config file selects the store backend and carries everything that is
//! not a secret: the CSV path, the remote worksheet coordinates, the
//! per-minute rate and the email endpoints. Secrets (SMTP password, sheet
//! API token, admin password) come from the environment instead - see
//! [`crate::config::secrets`].

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// The entire config.toml file.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Store backend selection and coordinates
    pub storage: StorageSettings,
    /// Per-minute billing rate used for amount auto-calculation
    #[serde(default)]
    pub rates: RateSettings,
    /// Email notification endpoints; notifications are disabled when absent
    pub email: Option<EmailSettings>,
}

/// Which backend persists the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local flat CSV file
    Csv,
    /// Remote spreadsheet worksheet
    Sheet,
}

/// The `[storage]` section.
#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    /// Selected backend
    pub backend: StorageBackend,
    /// Path of the CSV file (csv backend)
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
    /// Remote worksheet coordinates (sheet backend)
    pub sheet: Option<SheetSettings>,
}

/// The `[storage.sheet]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetSettings {
    /// Base URL of the values API, up to and including the spreadsheets root
    pub base_url: String,
    /// Spreadsheet identifier
    pub spreadsheet_id: String,
    /// Worksheet (tab) name
    pub worksheet: String,
}

/// The `[rates]` section.
#[derive(Debug, Default, Deserialize)]
pub struct RateSettings {
    /// PKR billed per minute of video; `0` disables auto-calculation
    #[serde(default)]
    pub pkr_per_minute: f64,
}

/// The `[email]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP port; defaults to 465 (implicit TLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP login username
    pub username: String,
    /// Sender address
    pub from: String,
    /// Recipient address for all notifications
    pub to: String,
}

fn default_csv_path() -> String {
    "data/ledger.csv".to_string()
}

const fn default_smtp_port() -> u16 {
    465
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid
/// or required fields are missing.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}
