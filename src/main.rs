//! Binary entry point - wires configuration, logging, the store backend and
//! the optional email notifier, then dispatches the parsed command.

use clap::Parser;
use clipledger::{
    cli::{self, AppContext, Cli},
    config::{secrets, settings},
    errors::Result,
    notify::EmailNotifier,
    store,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenvy::dotenv().ok();

    // All failures surface as one user-facing message, never a panic
    if let Err(err) = run().await {
        error!("command failed: {err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // 3. Load the application configuration
    let settings = settings::load_settings(&cli.config)?;
    info!(config = %cli.config, "loaded configuration");

    // 4. Build the selected store backend
    let store = store::init_store(&settings.storage, secrets::sheet_token())?;

    // 5. Build the notifier when email is configured
    let notifier = match &settings.email {
        Some(email) => Some(EmailNotifier::from_settings(email, secrets::smtp_password()?)?),
        None => None,
    };

    let ctx = AppContext {
        store,
        notifier,
        pkr_rate: settings.rates.pkr_per_minute,
        admin_password: secrets::admin_password(),
    };

    cli::run(&ctx, cli.command).await
}
