//! Row codec - the string-record encoding shared by both store backends.
//!
//! The CSV file and the remote worksheet persist the same fixed column set,
//! and neither backend interprets cells on its own: everything goes through
//! [`to_record`] and [`from_record`], so the two backends cannot drift apart.
//!
//! Normalization on read: a blank client becomes the sentinel, a blank
//! `length_min` reads as `0`, and the `paid` flag accepts the usual
//! spreadsheet spellings (`TRUE`/`true`/`1`/`yes`, case-insensitive). Any
//! other malformed cell is an error naming the column and the row number.

use crate::{
    entities::{Currency, LedgerEntry, UNKNOWN_CLIENT},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};

/// The fixed column set, in storage order.
pub const HEADERS: [&str; 10] = [
    "date",
    "datetime",
    "amount",
    "currency",
    "client",
    "paid",
    "video_name",
    "length_min",
    "initial_date",
    "deadline",
];

/// Date format used for the three date columns.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Encodes an entry as one string record in storage order.
#[must_use]
pub fn to_record(entry: &LedgerEntry) -> Vec<String> {
    vec![
        entry.date.format(DATE_FORMAT).to_string(),
        entry.datetime.to_rfc3339(),
        entry.amount.to_string(),
        entry.currency.code().to_string(),
        entry.client.clone(),
        if entry.paid { "TRUE" } else { "FALSE" }.to_string(),
        entry.video_name.clone(),
        entry.length_min.to_string(),
        entry.initial_date.format(DATE_FORMAT).to_string(),
        entry.deadline.format(DATE_FORMAT).to_string(),
    ]
}

/// Decodes one string record back into an entry.
///
/// # Arguments
/// * `row` - 1-based data row number, used in error messages
/// * `record` - the raw cells, expected in storage order
///
/// # Errors
/// Returns [`Error::MalformedRow`] naming the offending column when the
/// record has the wrong width or a cell does not parse.
pub fn from_record(row: usize, record: &[String]) -> Result<LedgerEntry> {
    if record.len() != HEADERS.len() {
        return Err(malformed(
            row,
            format!(
                "expected {} columns, got {}",
                HEADERS.len(),
                record.len()
            ),
        ));
    }

    let date = parse_date(row, "date", &record[0])?;
    let datetime = DateTime::parse_from_rfc3339(record[1].trim())
        .map(|datetime| datetime.with_timezone(&Utc))
        .map_err(|err| malformed(row, format!("datetime: {err}")))?;
    let amount = parse_number(row, "amount", &record[2])?;
    let currency: Currency = record[3]
        .parse()
        .map_err(|err| malformed(row, format!("currency: {err}")))?;
    let client = if record[4].trim().is_empty() {
        UNKNOWN_CLIENT.to_string()
    } else {
        record[4].trim().to_string()
    };
    let paid = parse_paid(row, &record[5])?;
    let video_name = record[6].trim().to_string();
    let length_min = if record[7].trim().is_empty() {
        0.0
    } else {
        parse_number(row, "length_min", &record[7])?
    };
    let initial_date = parse_date(row, "initial_date", &record[8])?;
    let deadline = parse_date(row, "deadline", &record[9])?;

    Ok(LedgerEntry {
        date,
        datetime,
        amount,
        currency,
        client,
        paid,
        video_name,
        length_min,
        initial_date,
        deadline,
    })
}

fn malformed(row: usize, message: String) -> Error {
    Error::MalformedRow { row, message }
}

fn parse_date(row: usize, column: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|err| malformed(row, format!("{column}: {err}")))
}

fn parse_number(row: usize, column: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| malformed(row, format!("{column}: {err}")))
}

fn parse_paid(row: usize, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(malformed(row, format!("paid: unrecognized value {other:?}"))),
    }
}
