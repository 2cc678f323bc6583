//! Store layer - persistence of the ledger behind one trait seam.
//!
//! Both backends speak the row codec from [`row`] and expose the same three
//! operations: load everything, append one entry, rewrite everything. The
//! whole-store rewrite is deliberate: admin operations reconcile in memory
//! and write back wholesale, last-writer-wins.

/// Flat CSV file backend
pub mod csv_file;
/// The string-record codec shared by both backends
pub mod row;
/// Remote worksheet backend over a values-style REST API
pub mod sheet;

use crate::{
    config::settings::{StorageBackend, StorageSettings},
    entities::LedgerEntry,
    errors::{Error, Result},
};
use async_trait::async_trait;

/// The persistence seam. Entries are keyed by insertion order only.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Loads every entry in insertion order. An empty or absent store is an
    /// empty ledger, not an error.
    async fn load(&self) -> Result<Vec<LedgerEntry>>;

    /// Appends a single entry to the end of the store.
    async fn append(&self, entry: &LedgerEntry) -> Result<()>;

    /// Clears the store and rewrites it with exactly `entries`.
    async fn replace_all(&self, entries: &[LedgerEntry]) -> Result<()>;
}

/// Builds the store backend selected by the configuration.
///
/// # Arguments
/// * `settings` - the `[storage]` section of the config file
/// * `sheet_token` - API token for the remote backend, if one is set in the
///   environment
///
/// # Errors
/// Returns a configuration error when the sheet backend is selected but its
/// settings or token are missing.
pub fn init_store(
    settings: &StorageSettings,
    sheet_token: Option<String>,
) -> Result<Box<dyn LedgerStore>> {
    match settings.backend {
        StorageBackend::Csv => Ok(Box::new(csv_file::CsvStore::new(&settings.csv_path))),
        StorageBackend::Sheet => {
            let sheet = settings.sheet.as_ref().ok_or_else(|| Error::Config {
                message: "[storage.sheet] section is required for the sheet backend".to_string(),
            })?;
            let token = sheet_token.ok_or_else(|| Error::Config {
                message: "sheet API token is required for the sheet backend".to_string(),
            })?;
            Ok(Box::new(sheet::SheetStore::new(sheet, token)?))
        }
    }
}
