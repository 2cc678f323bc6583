//! Admin commands - password-gated edit, delete and bulk updates.
//!
//! Every admin operation follows the same shape: verify the password, load
//! the whole ledger, reconcile in memory, rewrite the whole store, notify.

use crate::{
    cli::{AdminArgs, AdminCommand, AppContext, EditArgs, SetPaidArgs},
    core::admin::{AdminOp, EntryPatch, Selection, apply, verify_password},
    errors::{Error, Result},
};
use tracing::{info, warn};

/// Verifies the password, then runs the requested admin operation.
///
/// # Errors
/// Fails before any store access when the password is wrong or admin mode is
/// disabled.
pub async fn dispatch(ctx: &AppContext, args: AdminArgs) -> Result<()> {
    verify_password(ctx.admin_password.as_deref(), &args.password)?;

    let op = match args.command {
        AdminCommand::Edit(edit) => AdminOp::Edit {
            row: edit.row,
            patch: patch_from(edit),
        },
        AdminCommand::Delete(delete) => AdminOp::Delete { row: delete.row },
        AdminCommand::SetPaid(set) => AdminOp::SetPaid {
            paid: !set.unpaid,
            selection: selection_from(set)?,
        },
    };

    let entries = ctx.store.load().await?;
    let (updated, affected) = apply(entries, &op)?;
    ctx.store.replace_all(&updated).await?;

    let description = op.describe();
    info!(affected, operation = %description, "ledger rewritten");
    println!("{description} - {affected} row(s) affected.");

    if let Some(notifier) = &ctx.notifier {
        if let Err(err) = notifier.ledger_updated(&description, affected).await {
            warn!("notification email failed: {err}");
            println!("Warning: notification email failed: {err}");
        }
    }

    Ok(())
}

fn patch_from(args: EditArgs) -> EntryPatch {
    EntryPatch {
        date: args.date,
        amount: args.amount,
        currency: args.currency,
        client: args.client,
        paid: args.paid,
        video_name: args.video,
        length_min: args.length,
        initial_date: args.initial_date,
        deadline: args.deadline,
    }
}

fn selection_from(args: SetPaidArgs) -> Result<Selection> {
    if args.all {
        Ok(Selection::All)
    } else if let Some(client) = args.client {
        Ok(Selection::Client(client))
    } else if !args.rows.is_empty() {
        Ok(Selection::Rows(args.rows))
    } else {
        Err(Error::Config {
            message: "set-paid needs --all, --client or --rows".to_string(),
        })
    }
}
