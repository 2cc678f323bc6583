//! Report command - the monthly -> currency -> daily breakdown.

use crate::{
    cli::{AppContext, ReportArgs},
    core::report::{format_breakdown, monthly_breakdown},
    errors::{Error, Result},
};
use chrono::NaiveDate;

/// Prints the breakdown, optionally restricted to a single month.
pub async fn report(ctx: &AppContext, args: &ReportArgs) -> Result<()> {
    let filter = args.month.as_deref().map(normalize_month).transpose()?;

    let entries = ctx.store.load().await?;
    let mut reports = monthly_breakdown(&entries);
    if let Some(month) = filter {
        reports.retain(|report| report.month == month);
    }

    print!("{}", format_breakdown(&reports));
    Ok(())
}

/// Validates a `YYYY-MM` month argument and normalizes its padding.
fn normalize_month(raw: &str) -> Result<String> {
    let parsed =
        NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").map_err(|_| Error::Config {
            message: format!("invalid month {raw:?}, expected YYYY-MM"),
        })?;
    Ok(parsed.format("%Y-%m").to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_normalize_month_accepts_padded_and_unpadded() {
        assert_eq!(normalize_month("2026-07").unwrap(), "2026-07");
        assert_eq!(normalize_month("2026-7").unwrap(), "2026-07");
    }

    #[test]
    fn test_normalize_month_rejects_garbage() {
        assert!(normalize_month("july").is_err());
        assert!(normalize_month("2026-13").is_err());
        assert!(normalize_month("2026-07-01").is_err());
    }

    #[tokio::test]
    async fn test_report_runs_with_filter() {
        let store = MemoryStore::new(vec![
            pkr_entry(2026, 6, 10, 500.0),
            pkr_entry(2026, 7, 1, 700.0),
        ]);
        let ctx = test_context(store, 0.0);

        let args = ReportArgs {
            month: Some("2026-07".to_string()),
        };
        assert!(report(&ctx, &args).await.is_ok());
    }

    #[tokio::test]
    async fn test_report_bad_month_fails_before_load() {
        let ctx = test_context(MemoryStore::default(), 0.0);
        let args = ReportArgs {
            month: Some("not-a-month".to_string()),
        };
        assert!(report(&ctx, &args).await.is_err());
    }
}
