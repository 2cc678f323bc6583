//! Unified error types and result handling.
//!
//! Every failure in the crate - store unreachable, malformed row, bad input,
//! email trouble - flows through [`Error`]. Errors propagate with `?` inside
//! the library and are surfaced once, as a user-facing message, by `main`.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problems
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// An amount that is zero, negative, NaN or infinite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending value
        amount: f64,
    },

    /// A field the current currency requires was left blank
    #[error("Missing required field: {field}")]
    MissingField {
        /// Column name of the missing field
        field: &'static str,
    },

    /// A stored row that does not decode into a ledger entry
    #[error("Malformed row {row}: {message}")]
    MalformedRow {
        /// 1-based data row number
        row: usize,
        /// Which column failed and why
        message: String,
    },

    /// A row index that does not exist in the ledger
    #[error("No entry at row {row}")]
    EntryNotFound {
        /// The requested 1-based row number
        row: usize,
    },

    /// Admin commands used without a configured admin password
    #[error("Admin mode is disabled: no admin password is configured")]
    AdminDisabled,

    /// A wrong admin password
    #[error("Incorrect admin password")]
    IncorrectPassword,

    /// The remote worksheet answered with a non-success status
    #[error("Sheet API error ({status}): {message}")]
    Sheet {
        /// HTTP status code
        status: u16,
        /// Server-provided error message
        message: String,
    },

    /// I/O error from the CSV backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// CSV encode/decode error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP transport error talking to the remote worksheet
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Email message could not be built
    #[error("Email error: {0}")]
    Email(#[from] lettre::error::Error),

    /// Email address in the configuration does not parse
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// SMTP transport failure
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
