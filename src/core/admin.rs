//! Admin business logic - password gate and bulk ledger reconciliation.
//!
//! Admin operations never touch the store directly. They are expressed as
//! data ([`AdminOp`]) and applied by [`apply`], a pure function from the
//! current record set to the new one. The caller then rewrites the entire
//! store with the result - last-writer-wins, no conflict detection.

use crate::{
    core::entry as entry_rules,
    entities::{Currency, LedgerEntry},
    errors::{Error, Result},
};
use chrono::NaiveDate;

/// Checks the shared admin password.
///
/// Admin mode is disabled entirely when no password is configured, so an
/// empty configuration can never be "guessed" with an empty input.
///
/// # Errors
/// * [`Error::AdminDisabled`] - no (or an empty) password is configured
/// * [`Error::IncorrectPassword`] - the provided password does not match
pub fn verify_password(configured: Option<&str>, provided: &str) -> Result<()> {
    let expected = configured.ok_or(Error::AdminDisabled)?;
    if expected.is_empty() {
        return Err(Error::AdminDisabled);
    }
    if provided != expected {
        return Err(Error::IncorrectPassword);
    }
    Ok(())
}

/// Field updates for a single entry. `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    /// New earning date
    pub date: Option<NaiveDate>,
    /// New amount
    pub amount: Option<f64>,
    /// New currency
    pub currency: Option<Currency>,
    /// New client name; blank input becomes the sentinel
    pub client: Option<String>,
    /// New paid flag
    pub paid: Option<bool>,
    /// New video name
    pub video_name: Option<String>,
    /// New length in minutes
    pub length_min: Option<f64>,
    /// New engagement start date
    pub initial_date: Option<NaiveDate>,
    /// New deadline
    pub deadline: Option<NaiveDate>,
}

impl EntryPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.amount.is_none()
            && self.currency.is_none()
            && self.client.is_none()
            && self.paid.is_none()
            && self.video_name.is_none()
            && self.length_min.is_none()
            && self.initial_date.is_none()
            && self.deadline.is_none()
    }
}

/// Which entries a bulk operation targets.
#[derive(Debug, Clone)]
pub enum Selection {
    /// Every entry in the ledger
    All,
    /// Entries whose client matches exactly
    Client(String),
    /// Explicit 1-based row numbers
    Rows(Vec<usize>),
}

/// One admin operation over the ledger.
#[derive(Debug, Clone)]
pub enum AdminOp {
    /// Patch the fields of a single entry
    Edit {
        /// 1-based row number as printed by `list`
        row: usize,
        /// Fields to change
        patch: EntryPatch,
    },
    /// Remove a single entry
    Delete {
        /// 1-based row number as printed by `list`
        row: usize,
    },
    /// Flip the paid flag over a selection of entries
    SetPaid {
        /// Which entries to touch
        selection: Selection,
        /// The new paid value
        paid: bool,
    },
}

impl AdminOp {
    /// Short human-readable description, used in notification emails.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Edit { row, .. } => format!("edit row {row}"),
            Self::Delete { row } => format!("delete row {row}"),
            Self::SetPaid { selection, paid } => {
                let flag = if *paid { "paid" } else { "unpaid" };
                let target = match selection {
                    Selection::All => "all entries".to_string(),
                    Selection::Client(name) => format!("entries for client {name}"),
                    Selection::Rows(rows) => {
                        let rows: Vec<String> = rows.iter().map(usize::to_string).collect();
                        format!("rows {}", rows.join(", "))
                    }
                };
                format!("mark {flag}: {target}")
            }
        }
    }
}

/// Applies one admin operation to an in-memory record set.
///
/// Returns the new record set together with the number of affected rows.
/// Edits are re-validated, so a patch can never leave an entry that violates
/// the ledger invariants. Row numbers are 1-based, matching `list` output.
///
/// # Errors
/// * [`Error::EntryNotFound`] - a row number is out of range
/// * [`Error::Config`] - an edit patch with no fields
/// * any validation error for a patched entry
pub fn apply(mut entries: Vec<LedgerEntry>, op: &AdminOp) -> Result<(Vec<LedgerEntry>, usize)> {
    match op {
        AdminOp::Edit { row, patch } => {
            if patch.is_empty() {
                return Err(Error::Config {
                    message: "no fields to update".to_string(),
                });
            }
            let index = check_row(&entries, *row)?;
            let entry = &mut entries[index];
            apply_patch(entry, patch);
            entry_rules::validate(entry)?;
            Ok((entries, 1))
        }
        AdminOp::Delete { row } => {
            let index = check_row(&entries, *row)?;
            entries.remove(index);
            Ok((entries, 1))
        }
        AdminOp::SetPaid { selection, paid } => {
            let affected = match selection {
                Selection::All => {
                    for entry in &mut entries {
                        entry.paid = *paid;
                    }
                    entries.len()
                }
                Selection::Client(name) => {
                    let mut touched = 0;
                    for entry in &mut entries {
                        if entry.client == *name {
                            entry.paid = *paid;
                            touched += 1;
                        }
                    }
                    touched
                }
                Selection::Rows(rows) => {
                    // Validate the whole selection before mutating anything
                    let mut indices = Vec::with_capacity(rows.len());
                    for row in rows {
                        indices.push(check_row(&entries, *row)?);
                    }
                    for index in &indices {
                        entries[*index].paid = *paid;
                    }
                    indices.len()
                }
            };
            Ok((entries, affected))
        }
    }
}

/// Maps a 1-based row number to a vector index, or errors.
fn check_row(entries: &[LedgerEntry], row: usize) -> Result<usize> {
    if row == 0 || row > entries.len() {
        return Err(Error::EntryNotFound { row });
    }
    Ok(row - 1)
}

fn apply_patch(entry: &mut LedgerEntry, patch: &EntryPatch) {
    if let Some(date) = patch.date {
        entry.date = date;
    }
    if let Some(amount) = patch.amount {
        entry.amount = amount;
    }
    if let Some(currency) = patch.currency {
        entry.currency = currency;
    }
    if let Some(client) = &patch.client {
        entry.client = entry_rules::normalize_client(Some(client));
    }
    if let Some(paid) = patch.paid {
        entry.paid = paid;
    }
    if let Some(video_name) = &patch.video_name {
        entry.video_name = video_name.trim().to_string();
    }
    if let Some(length_min) = patch.length_min {
        entry.length_min = length_min;
    }
    if let Some(initial_date) = patch.initial_date {
        entry.initial_date = initial_date;
    }
    if let Some(deadline) = patch.deadline {
        entry.deadline = deadline;
    }
}
