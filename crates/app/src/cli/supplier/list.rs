use clap::Args;
use pool_ledger_app::context::AppContext;

use crate::cli::table;

#[derive(Debug, Args)]
pub(crate) struct ListSuppliersArgs {
    /// Only list active suppliers
    #[arg(long)]
    active_only: bool,
}

pub(crate) async fn run(args: ListSuppliersArgs, ctx: &AppContext) -> Result<(), String> {
    let suppliers = ctx
        .suppliers
        .list_suppliers(args.active_only)
        .await
        .map_err(|error| format!("failed to list suppliers: {error}"))?;

    if suppliers.is_empty() {
        println!("no suppliers found");
        return Ok(());
    }

    let rows = suppliers.into_iter().map(|supplier| {
        [
            supplier.uuid.to_string(),
            supplier.name,
            supplier.email.unwrap_or_default(),
            supplier.phone.unwrap_or_default(),
            if supplier.active { "active" } else { "inactive" }.to_string(),
        ]
    });

    println!(
        "{}",
        table::render(["UUID", "Name", "Email", "Phone", "Status"], rows, 0..0)
    );

    Ok(())
}
