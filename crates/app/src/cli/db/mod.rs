use clap::{Args, Subcommand};
use pool_ledger_app::{config::LedgerConfig, database};

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate,
}

pub(crate) async fn run(command: DbCommand, config: &LedgerConfig) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate => migrate(config).await,
    }
}

async fn migrate(config: &LedgerConfig) -> Result<(), String> {
    let url = config
        .database_url
        .as_deref()
        .ok_or("DATABASE_URL is not set")?;

    let pool = database::connect(url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}
