//! Ledger entry - Represents one recorded video earning.
//!
//! Each entry carries the fixed column set shared by both store backends:
//! `date`, `datetime`, `amount`, `currency`, `client`, `paid`, `video_name`,
//! `length_min`, `initial_date`, `deadline`. Entries are append-only in normal
//! use; admin operations may mutate or delete arbitrary entries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client name stored when the user leaves the field blank.
pub const UNKNOWN_CLIENT: &str = "Unknown";

/// The closed set of currencies the ledger accepts.
///
/// `PKR` entries are billed per minute of produced video, so they carry a
/// video name and a length; `USD` entries are flat payments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Pakistani rupee - per-minute video production work
    #[serde(rename = "PKR")]
    Pkr,
    /// US dollar - flat payments
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// The three-letter code used in storage and display.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pkr => "PKR",
            Self::Usd => "USD",
        }
    }

    /// Whether entries in this currency must carry a video name and a
    /// positive length in minutes.
    #[must_use]
    pub const fn requires_video_details(self) -> bool {
        matches!(self, Self::Pkr)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PKR" => Ok(Self::Pkr),
            "USD" => Ok(Self::Usd),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}

/// One recorded earning transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Calendar date of the earning
    pub date: NaiveDate,
    /// When the entry was recorded
    pub datetime: DateTime<Utc>,
    /// Earning amount in `currency`; always finite and positive
    pub amount: f64,
    /// Currency of the amount
    pub currency: Currency,
    /// Client name; never blank, defaults to [`UNKNOWN_CLIENT`]
    pub client: String,
    /// Whether the amount has been paid out
    pub paid: bool,
    /// Name of the produced video; may be empty for flat-payment entries
    pub video_name: String,
    /// Video length in minutes; `0` for flat-payment entries
    pub length_min: f64,
    /// Date the engagement started
    pub initial_date: NaiveDate,
    /// Payment/delivery deadline
    pub deadline: NaiveDate,
}
