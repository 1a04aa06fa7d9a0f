use clap::{Args, Subcommand};
use pool_ledger_app::context::AppContext;

mod create;
mod list;
mod replenish;

#[derive(Debug, Args)]
pub(crate) struct PoolCommand {
    #[command(subcommand)]
    command: PoolSubcommand,
}

#[derive(Debug, Subcommand)]
enum PoolSubcommand {
    /// Fund a new discount pool
    Create(create::CreatePoolArgs),
    /// List discount pools
    List(list::ListPoolsArgs),
    /// Top up a pool's balance
    Replenish(replenish::ReplenishPoolArgs),
}

pub(crate) async fn run(command: PoolCommand, ctx: &AppContext) -> Result<(), String> {
    match command.command {
        PoolSubcommand::Create(args) => create::run(args, ctx).await,
        PoolSubcommand::List(args) => list::run(args, ctx).await,
        PoolSubcommand::Replenish(args) => replenish::run(args, ctx).await,
    }
}
