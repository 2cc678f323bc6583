//! Entry business logic - validation and creation of ledger entries.
//!
//! This module turns raw user input into a validated [`LedgerEntry`]. The
//! rules are deliberately small: amounts must be finite and positive, PKR
//! entries must name a video and carry a positive length, and a blank client
//! falls back to the sentinel. When no explicit amount is given for a PKR
//! entry and a per-minute rate is configured, the amount is derived from the
//! video length.

use crate::{
    entities::{Currency, LedgerEntry, UNKNOWN_CLIENT},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};

/// Raw field values collected from the user before validation.
///
/// Optional fields have documented fallbacks: `client` defaults to the
/// sentinel, `initial_date` and `deadline` default to `date`, and `amount`
/// may be derived for PKR entries (see [`build_entry`]).
#[derive(Debug, Clone)]
pub struct EntryDraft {
    /// Calendar date of the earning
    pub date: NaiveDate,
    /// Explicit amount, if the user provided one
    pub amount: Option<f64>,
    /// Currency of the earning
    pub currency: Currency,
    /// Client name; blank or missing becomes [`UNKNOWN_CLIENT`]
    pub client: Option<String>,
    /// Whether the earning is already paid out
    pub paid: bool,
    /// Video name; required for PKR entries
    pub video_name: Option<String>,
    /// Video length in minutes; required positive for PKR entries
    pub length_min: Option<f64>,
    /// Engagement start date; defaults to `date`
    pub initial_date: Option<NaiveDate>,
    /// Payment/delivery deadline; defaults to `date`
    pub deadline: Option<NaiveDate>,
}

/// Builds a validated [`LedgerEntry`] from a draft.
///
/// When the draft has no explicit amount, the currency requires video
/// details and `pkr_rate` is positive, the amount is auto-calculated as
/// `length_min * pkr_rate`. A missing amount with no usable rate is an
/// error. The entry timestamp is taken at build time.
///
/// # Arguments
/// * `draft` - Raw field values from the user
/// * `pkr_rate` - Configured per-minute rate; `<= 0` disables auto-calculation
///
/// # Errors
/// Returns an error if any invariant fails: non-positive or non-finite
/// amount, blank video name or non-positive length for PKR, or no amount
/// available at all.
pub fn build_entry(draft: EntryDraft, pkr_rate: f64) -> Result<LedgerEntry> {
    let client = normalize_client(draft.client.as_deref());
    let video_name = draft
        .video_name
        .map(|name| name.trim().to_string())
        .unwrap_or_default();
    let length_min = draft.length_min.unwrap_or(0.0);
    let amount = resolve_amount(draft.amount, draft.currency, length_min, pkr_rate)?;

    let entry = LedgerEntry {
        date: draft.date,
        datetime: Utc::now(),
        amount,
        currency: draft.currency,
        client,
        paid: draft.paid,
        video_name,
        length_min,
        initial_date: draft.initial_date.unwrap_or(draft.date),
        deadline: draft.deadline.unwrap_or(draft.date),
    };

    validate(&entry)?;
    Ok(entry)
}

/// Returns the trimmed client name, or the sentinel when blank.
#[must_use]
pub fn normalize_client(raw: Option<&str>) -> String {
    match raw {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => UNKNOWN_CLIENT.to_string(),
    }
}

/// Picks the explicit amount, or derives one from length and rate.
fn resolve_amount(
    amount: Option<f64>,
    currency: Currency,
    length_min: f64,
    pkr_rate: f64,
) -> Result<f64> {
    if let Some(amount) = amount {
        return Ok(amount);
    }

    if currency.requires_video_details() && pkr_rate > 0.0 {
        return Ok(length_min * pkr_rate);
    }

    Err(Error::MissingField { field: "amount" })
}

/// Checks every entry invariant.
///
/// Used both when creating entries and when re-checking an entry after an
/// admin edit, so a patch can never leave an invalid row in the store.
///
/// # Errors
/// Returns an error on a non-positive or non-finite amount, a negative or
/// non-finite length, a blank client, or - for currencies that require video
/// details - a blank video name or non-positive length.
pub fn validate(entry: &LedgerEntry) -> Result<()> {
    if !entry.amount.is_finite() || entry.amount <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: entry.amount,
        });
    }

    if !entry.length_min.is_finite() || entry.length_min < 0.0 {
        return Err(Error::InvalidAmount {
            amount: entry.length_min,
        });
    }

    if entry.client.trim().is_empty() {
        return Err(Error::MissingField { field: "client" });
    }

    if entry.currency.requires_video_details() {
        if entry.video_name.trim().is_empty() {
            return Err(Error::MissingField {
                field: "video_name",
            });
        }
        if entry.length_min <= 0.0 {
            return Err(Error::MissingField { field: "length_min" });
        }
    }

    Ok(())
}
