//! Report generation business logic.
//!
//! Builds the monthly -> currency -> daily breakdown of the ledger and the
//! text rendering used by the CLI. All functions here are pure: they take a
//! slice of entries and return structured data, so they are testable without
//! any store backend.

use crate::entities::{Currency, LedgerEntry};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Totals for a single calendar day within a currency group.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTotal {
    /// The day being totalled
    pub date: NaiveDate,
    /// Number of entries recorded on that day
    pub entries: usize,
    /// Sum of entry amounts on that day
    pub total: f64,
}

/// Totals for one currency within a month.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyGroup {
    /// The currency all amounts in this group share
    pub currency: Currency,
    /// Sum of all entry amounts in the month
    pub total: f64,
    /// Sum over entries already paid out
    pub paid_total: f64,
    /// Sum over entries still outstanding
    pub unpaid_total: f64,
    /// Per-day totals, ascending by date
    pub days: Vec<DayTotal>,
}

/// The breakdown for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthReport {
    /// Month key in `YYYY-MM` form
    pub month: String,
    /// Per-currency groups, PKR before USD
    pub groups: Vec<CurrencyGroup>,
}

/// The grouping key for a date: `YYYY-MM`.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Groups entries month -> currency -> day and totals each level.
///
/// Months and days are sorted ascending; currencies are sorted by their
/// declaration order (PKR before USD). An entry contributes to exactly one
/// day bucket, so every monthly total equals the sum of its constituent
/// entry amounts.
#[must_use]
pub fn monthly_breakdown(entries: &[LedgerEntry]) -> Vec<MonthReport> {
    // month -> currency -> day -> (count, total)
    let mut months: BTreeMap<String, BTreeMap<Currency, BTreeMap<NaiveDate, (usize, f64)>>> =
        BTreeMap::new();
    // month -> currency -> (paid, unpaid)
    let mut paid_split: BTreeMap<(String, Currency), (f64, f64)> = BTreeMap::new();

    for entry in entries {
        let month = month_key(entry.date);
        let bucket = months
            .entry(month.clone())
            .or_default()
            .entry(entry.currency)
            .or_default()
            .entry(entry.date)
            .or_insert((0, 0.0));
        bucket.0 += 1;
        bucket.1 += entry.amount;

        let split = paid_split.entry((month, entry.currency)).or_insert((0.0, 0.0));
        if entry.paid {
            split.0 += entry.amount;
        } else {
            split.1 += entry.amount;
        }
    }

    months
        .into_iter()
        .map(|(month, currencies)| {
            let groups = currencies
                .into_iter()
                .map(|(currency, days)| {
                    let days: Vec<DayTotal> = days
                        .into_iter()
                        .map(|(date, (entries, total))| DayTotal {
                            date,
                            entries,
                            total,
                        })
                        .collect();
                    let total = days.iter().map(|day| day.total).sum();
                    let (paid_total, unpaid_total) = paid_split
                        .get(&(month.clone(), currency))
                        .copied()
                        .unwrap_or((0.0, 0.0));
                    CurrencyGroup {
                        currency,
                        total,
                        paid_total,
                        unpaid_total,
                        days,
                    }
                })
                .collect();
            MonthReport { month, groups }
        })
        .collect()
}

/// Renders a breakdown into the text block printed by the `report` command.
#[must_use]
pub fn format_breakdown(reports: &[MonthReport]) -> String {
    use std::fmt::Write;

    if reports.is_empty() {
        return "No entries recorded.\n".to_string();
    }

    let mut out = String::new();
    for report in reports {
        // write! to a String is infallible
        writeln!(out, "== {} ==", report.month).unwrap();
        for group in &report.groups {
            writeln!(
                out,
                "  {}: total {:.2} (paid {:.2}, unpaid {:.2})",
                group.currency, group.total, group.paid_total, group.unpaid_total
            )
            .unwrap();
            for day in &group.days {
                writeln!(
                    out,
                    "    {}  {:>2} entries  {:>12.2}",
                    day.date, day.entries, day.total
                )
                .unwrap();
            }
        }
    }
    out
}

/// Renders one ledger entry as a `list` line with its 1-based row number.
#[must_use]
pub fn format_entry_line(row: usize, entry: &LedgerEntry) -> String {
    let paid = if entry.paid { "paid" } else { "unpaid" };
    let video = if entry.video_name.is_empty() {
        "-"
    } else {
        entry.video_name.as_str()
    };

    format!(
        "{row:>4}  {}  {} {:>12.2}  {paid:>6}  {}  {video} ({} min)  due {}",
        entry.date, entry.currency, entry.amount, entry.client, entry.length_min, entry.deadline
    )
}
