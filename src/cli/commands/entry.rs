//! Entry commands - `add` and `list`.

use crate::{
    cli::{AddArgs, AppContext},
    core::{
        entry::{EntryDraft, build_entry},
        report::format_entry_line,
    },
    errors::Result,
};
use chrono::Utc;
use tracing::{info, warn};

/// Records a new ledger entry.
///
/// Validates the draft, appends it to the store and - when a notifier is
/// configured - sends the entry-created email. A failed email is reported
/// as a warning and never fails the command.
pub async fn add(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let draft = EntryDraft {
        date,
        amount: args.amount,
        currency: args.currency,
        client: args.client,
        paid: args.paid,
        video_name: args.video,
        length_min: args.length,
        initial_date: args.initial_date,
        deadline: args.deadline,
    };

    let entry = build_entry(draft, ctx.pkr_rate)?;
    ctx.store.append(&entry).await?;
    info!(
        client = %entry.client,
        amount = entry.amount,
        currency = %entry.currency,
        "recorded new entry"
    );
    println!(
        "Recorded {} {} for {} on {}.",
        entry.amount, entry.currency, entry.client, entry.date
    );

    if let Some(notifier) = &ctx.notifier {
        if let Err(err) = notifier.entry_added(&entry).await {
            warn!("notification email failed: {err}");
            println!("Warning: notification email failed: {err}");
        }
    }

    Ok(())
}

/// Prints every entry with its 1-based row number.
pub async fn list(ctx: &AppContext) -> Result<()> {
    let entries = ctx.store.load().await?;
    if entries.is_empty() {
        println!("No entries recorded.");
        return Ok(());
    }

    for (index, entry) in entries.iter().enumerate() {
        println!("{}", format_entry_line(index + 1, entry));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::Currency;
    use crate::test_utils::*;

    fn add_args() -> AddArgs {
        AddArgs {
            date: Some(date(2026, 7, 14)),
            amount: Some(1500.0),
            currency: Currency::Pkr,
            client: Some("Acme".to_string()),
            paid: false,
            video: Some("Teaser".to_string()),
            length: Some(6.0),
            initial_date: None,
            deadline: None,
        }
    }

    #[tokio::test]
    async fn test_add_appends_to_store() {
        let store = MemoryStore::default();
        let ctx = test_context(store.clone(), 0.0);

        add(&ctx, add_args()).await.unwrap();

        let entries = store.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].client, "Acme");
        assert_eq!(entries[0].amount, 1500.0);
    }

    #[tokio::test]
    async fn test_add_auto_calculates_from_rate() {
        let store = MemoryStore::default();
        let ctx = test_context(store.clone(), 250.0);

        let args = AddArgs {
            amount: None,
            length: Some(4.0),
            ..add_args()
        };
        add(&ctx, args).await.unwrap();

        assert_eq!(store.snapshot()[0].amount, 1000.0);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_draft_without_touching_store() {
        let store = MemoryStore::default();
        let ctx = test_context(store.clone(), 0.0);

        let args = AddArgs {
            video: None,
            ..add_args()
        };
        assert!(add(&ctx, args).await.is_err());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_list_on_empty_store() {
        let ctx = test_context(MemoryStore::default(), 0.0);
        assert!(list(&ctx).await.is_ok());
    }
}
