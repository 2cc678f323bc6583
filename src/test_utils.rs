//! Shared test utilities for `clipledger`.
//!
//! This module provides common helper functions for building test entries
//! with sensible defaults, plus an in-memory store for exercising command
//! flows without a filesystem or network.

use crate::{
    cli::AppContext,
    entities::{Currency, LedgerEntry},
    errors::Result,
    store::LedgerStore,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

/// Password wired into [`test_context`].
pub const TEST_ADMIN_PASSWORD: &str = "test-admin-pw";

/// Builds a `NaiveDate`, panicking on impossible inputs (tests only).
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Creates a PKR test entry with sensible defaults.
///
/// # Defaults
/// * `client`: `"Test Client"`
/// * `video_name`: `"Test video"`
/// * `length_min`: `5.0`
/// * `paid`: false
/// * `initial_date` / `deadline`: same as the entry date
#[must_use]
pub fn pkr_entry(year: i32, month: u32, day: u32, amount: f64) -> LedgerEntry {
    let entry_date = date(year, month, day);
    LedgerEntry {
        date: entry_date,
        datetime: entry_date
            .and_hms_opt(9, 30, 0)
            .expect("valid test time")
            .and_utc(),
        amount,
        currency: Currency::Pkr,
        client: "Test Client".to_string(),
        paid: false,
        video_name: "Test video".to_string(),
        length_min: 5.0,
        initial_date: entry_date,
        deadline: entry_date,
    }
}

/// Creates a USD test entry (flat payment, no video details).
#[must_use]
pub fn usd_entry(year: i32, month: u32, day: u32, amount: f64) -> LedgerEntry {
    LedgerEntry {
        currency: Currency::Usd,
        video_name: String::new(),
        length_min: 0.0,
        ..pkr_entry(year, month, day, amount)
    }
}

/// Creates a test entry with a specific client and paid flag.
/// Use this when grouping or selection behavior is under test.
#[must_use]
pub fn custom_entry(
    year: i32,
    month: u32,
    day: u32,
    amount: f64,
    currency: Currency,
    client: &str,
    paid: bool,
) -> LedgerEntry {
    let base = match currency {
        Currency::Pkr => pkr_entry(year, month, day, amount),
        Currency::Usd => usd_entry(year, month, day, amount),
    };
    LedgerEntry {
        client: client.to_string(),
        paid,
        ..base
    }
}

/// In-memory [`LedgerStore`] backed by a shared vector.
///
/// Clones share the same state, so a test can hand one clone to an
/// [`AppContext`] and inspect the other after the command ran.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Vec<LedgerEntry>>>,
}

impl MemoryStore {
    /// Creates a store pre-seeded with entries.
    #[must_use]
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Copies out the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LedgerEntry> {
        self.entries.lock().expect("store lock").clone()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn load(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self.snapshot())
    }

    async fn append(&self, entry: &LedgerEntry) -> Result<()> {
        self.entries.lock().expect("store lock").push(entry.clone());
        Ok(())
    }

    async fn replace_all(&self, entries: &[LedgerEntry]) -> Result<()> {
        *self.entries.lock().expect("store lock") = entries.to_vec();
        Ok(())
    }
}

/// Builds an [`AppContext`] over a [`MemoryStore`] with notifications off
/// and the admin password set to [`TEST_ADMIN_PASSWORD`].
#[must_use]
pub fn test_context(store: MemoryStore, pkr_rate: f64) -> AppContext {
    AppContext {
        store: Box::new(store),
        notifier: None,
        pkr_rate,
        admin_password: Some(TEST_ADMIN_PASSWORD.to_string()),
    }
}
