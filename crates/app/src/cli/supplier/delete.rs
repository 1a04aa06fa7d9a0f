use clap::Args;
use pool_ledger::suppliers::SupplierUuid;
use pool_ledger_app::context::AppContext;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct DeleteSupplierArgs {
    /// Supplier to delete
    #[arg(long)]
    supplier_uuid: Uuid,
}

pub(crate) async fn run(args: DeleteSupplierArgs, ctx: &AppContext) -> Result<(), String> {
    ctx.suppliers
        .delete_supplier(SupplierUuid::from_uuid(args.supplier_uuid))
        .await
        .map_err(|error| format!("failed to delete supplier: {error}"))?;

    println!("deleted supplier {}", args.supplier_uuid);

    Ok(())
}
