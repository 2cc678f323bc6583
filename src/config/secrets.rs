//! Secret loading from environment variables.
//!
//! Secrets never live in config.toml. They are read from the environment
//! (a `.env` file is loaded at startup, so local development works the same
//! way) directly before use and are not stored in the settings struct.

use crate::errors::{Error, Result};

/// Environment variable holding the shared admin password.
pub const ADMIN_PASSWORD_VAR: &str = "CLIPLEDGER_ADMIN_PASSWORD";
/// Environment variable holding the SMTP login password.
pub const SMTP_PASSWORD_VAR: &str = "CLIPLEDGER_SMTP_PASSWORD";
/// Environment variable holding the sheet API bearer token.
pub const SHEET_TOKEN_VAR: &str = "CLIPLEDGER_SHEET_TOKEN";

/// The configured admin password, if any.
///
/// Returns `None` when the variable is unset or blank, which disables admin
/// commands entirely.
#[must_use]
pub fn admin_password() -> Option<String> {
    std::env::var(ADMIN_PASSWORD_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// The SMTP password; required once an `[email]` section is configured.
///
/// # Errors
/// Returns a configuration error naming the variable when it is unset.
pub fn smtp_password() -> Result<String> {
    std::env::var(SMTP_PASSWORD_VAR).map_err(|_| Error::Config {
        message: format!("{SMTP_PASSWORD_VAR} is not set but [email] is configured"),
    })
}

/// The sheet API token, if any. Checked again by the store builder when the
/// sheet backend is actually selected.
#[must_use]
pub fn sheet_token() -> Option<String> {
    std::env::var(SHEET_TOKEN_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
