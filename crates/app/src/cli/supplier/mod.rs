use clap::{Args, Subcommand};
use pool_ledger_app::context::AppContext;

mod create;
mod delete;
mod list;

#[derive(Debug, Args)]
pub(crate) struct SupplierCommand {
    #[command(subcommand)]
    command: SupplierSubcommand,
}

#[derive(Debug, Subcommand)]
enum SupplierSubcommand {
    /// Register a supplier
    Create(create::CreateSupplierArgs),
    /// List suppliers
    List(list::ListSuppliersArgs),
    /// Delete a supplier that funds no pools
    Delete(delete::DeleteSupplierArgs),
}

pub(crate) async fn run(command: SupplierCommand, ctx: &AppContext) -> Result<(), String> {
    match command.command {
        SupplierSubcommand::Create(args) => create::run(args, ctx).await,
        SupplierSubcommand::List(args) => list::run(args, ctx).await,
        SupplierSubcommand::Delete(args) => delete::run(args, ctx).await,
    }
}
