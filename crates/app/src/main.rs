//! Pool Ledger Admin CLI

use std::process;

use clap::Parser;
use pool_ledger_app::logging;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = logging::init_subscriber(cli.config()) {
        eprintln!("failed to initialise logging: {error}");
    }

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
