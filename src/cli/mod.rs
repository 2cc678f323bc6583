//! CLI layer - argument parsing and command dispatch.
//!
//! This module defines the `clipledger` command tree and the shared
//! [`AppContext`] every handler receives. Handlers live in [`commands`] and
//! talk to the core modules and the store seam; nothing below this layer
//! reads arguments or prints.

/// Command implementations (entry recording, reports, admin operations)
pub mod commands;

use crate::{entities::Currency, notify::EmailNotifier, store::LedgerStore};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Shared data available to all commands.
pub struct AppContext {
    /// The selected store backend
    pub store: Box<dyn LedgerStore>,
    /// Email notifier; `None` disables notifications
    pub notifier: Option<EmailNotifier>,
    /// Configured PKR-per-minute rate; `0` disables amount auto-calculation
    pub pkr_rate: f64,
    /// Configured admin password; `None` disables admin commands
    pub admin_password: Option<String>,
}

/// Bookkeeping for video earnings.
#[derive(Parser, Debug)]
#[command(name = "clipledger")]
#[command(about = "Bookkeeping for video earnings - CSV file or remote worksheet")]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, env = "CLIPLEDGER_CONFIG", default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new ledger entry
    Add(AddArgs),
    /// Print every entry with its row number
    List,
    /// Monthly breakdown by currency and day
    Report(ReportArgs),
    /// Password-gated edit, delete and bulk operations
    Admin(AdminArgs),
}

/// Arguments for `add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Earning date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Amount; may be omitted for PKR entries when a rate is configured
    #[arg(long)]
    pub amount: Option<f64>,
    /// Currency (PKR or USD)
    #[arg(long)]
    pub currency: Currency,
    /// Client name; blank becomes "Unknown"
    #[arg(long)]
    pub client: Option<String>,
    /// Mark the entry as already paid
    #[arg(long)]
    pub paid: bool,
    /// Video name (required for PKR)
    #[arg(long)]
    pub video: Option<String>,
    /// Video length in minutes (required for PKR)
    #[arg(long)]
    pub length: Option<f64>,
    /// Engagement start date; defaults to the entry date
    #[arg(long)]
    pub initial_date: Option<NaiveDate>,
    /// Payment/delivery deadline; defaults to the entry date
    #[arg(long)]
    pub deadline: Option<NaiveDate>,
}

/// Arguments for `report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Restrict the report to one month (YYYY-MM)
    #[arg(long)]
    pub month: Option<String>,
}

/// Arguments for `admin`.
#[derive(Args, Debug)]
pub struct AdminArgs {
    /// Shared admin password
    #[arg(long)]
    pub password: String,

    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands.
#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Patch fields of one entry
    Edit(EditArgs),
    /// Delete one entry
    Delete(DeleteArgs),
    /// Bulk update the paid flag
    SetPaid(SetPaidArgs),
}

/// Arguments for `admin edit`.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// 1-based row number as printed by `list`
    pub row: usize,
    /// New earning date
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// New amount
    #[arg(long)]
    pub amount: Option<f64>,
    /// New currency (PKR or USD)
    #[arg(long)]
    pub currency: Option<Currency>,
    /// New client name
    #[arg(long)]
    pub client: Option<String>,
    /// New paid flag (true/false)
    #[arg(long)]
    pub paid: Option<bool>,
    /// New video name
    #[arg(long)]
    pub video: Option<String>,
    /// New length in minutes
    #[arg(long)]
    pub length: Option<f64>,
    /// New engagement start date
    #[arg(long)]
    pub initial_date: Option<NaiveDate>,
    /// New deadline
    #[arg(long)]
    pub deadline: Option<NaiveDate>,
}

/// Arguments for `admin delete`.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// 1-based row number as printed by `list`
    pub row: usize,
}

/// Arguments for `admin set-paid`.
#[derive(Args, Debug)]
pub struct SetPaidArgs {
    /// Target every entry
    #[arg(long, conflicts_with_all = ["client", "rows"])]
    pub all: bool,
    /// Target entries of one client (exact name)
    #[arg(long, conflicts_with = "rows")]
    pub client: Option<String>,
    /// Target explicit row numbers (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub rows: Vec<usize>,
    /// Mark as unpaid instead of paid
    #[arg(long)]
    pub unpaid: bool,
}

/// Dispatches a parsed command to its handler.
///
/// # Errors
/// Propagates whatever the handler returns; `main` turns it into a
/// user-facing message.
pub async fn run(ctx: &AppContext, command: Command) -> crate::errors::Result<()> {
    match command {
        Command::Add(args) => commands::entry::add(ctx, args).await,
        Command::List => commands::entry::list(ctx).await,
        Command::Report(args) => commands::report::report(ctx, &args).await,
        Command::Admin(args) => commands::admin::dispatch(ctx, args).await,
    }
}
