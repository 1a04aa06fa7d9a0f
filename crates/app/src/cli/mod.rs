use clap::{Parser, Subcommand};
use pool_ledger_app::{config::LedgerConfig, context::AppContext};

mod db;
mod pool;
mod report;
mod stats;
mod supplier;
mod table;

#[derive(Debug, Parser)]
#[command(name = "pool-ledger-app", about = "Discount pool ledger CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: LedgerConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Supplier(supplier::SupplierCommand),
    Pool(pool::PoolCommand),
    /// Applied discounts grouped by supplier and product
    Report(report::ReportArgs),
    /// Dashboard figures and recent activity
    Stats(stats::StatsArgs),
}

impl Cli {
    pub(crate) fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let Self { config, command } = self;

        match command {
            Commands::Db(command) => db::run(command, &config).await,
            Commands::Supplier(command) => supplier::run(command, &context(&config).await?).await,
            Commands::Pool(command) => pool::run(command, &context(&config).await?).await,
            Commands::Report(args) => report::run(args, &context(&config).await?).await,
            Commands::Stats(args) => stats::run(args, &context(&config).await?).await,
        }
    }
}

async fn context(config: &LedgerConfig) -> Result<AppContext, String> {
    AppContext::from_config(config)
        .await
        .map_err(|error| format!("failed to initialise: {error}"))
}
