use clap::Args;
use pool_ledger::products::ProductUuid;
use pool_ledger_app::{config::format_minor, context::AppContext};
use uuid::Uuid;

use crate::cli::table;

#[derive(Debug, Args)]
pub(crate) struct ListPoolsArgs {
    /// Only list pools for this product
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: ListPoolsArgs, ctx: &AppContext) -> Result<(), String> {
    let pools = match args.product_uuid {
        Some(product) => {
            ctx.pools
                .list_product_pools(ProductUuid::from_uuid(product))
                .await
        }
        None => ctx.pools.list_pools().await,
    }
    .map_err(|error| format!("failed to list pools: {error}"))?;

    if pools.is_empty() {
        println!("no pools found");
        return Ok(());
    }

    let rows = pools.into_iter().map(|pool| {
        [
            pool.uuid.to_string(),
            pool.supplier_name,
            pool.product_uuid.to_string(),
            format!("{}%", pool.percentage),
            format_minor(pool.remaining_amount, ctx.currency),
            format_minor(pool.initial_amount, ctx.currency),
            if pool.active && pool.supplier_active {
                "active"
            } else {
                "inactive"
            }
            .to_string(),
        ]
    });

    println!(
        "{}",
        table::render(
            [
                "UUID",
                "Supplier",
                "Product",
                "Discount",
                "Remaining",
                "Initial",
                "Status"
            ],
            rows,
            3..6,
        )
    );

    Ok(())
}
