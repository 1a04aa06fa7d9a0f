use clap::Args;
use pool_ledger::{pools::PoolUuid, products::ProductUuid, suppliers::SupplierUuid};
use pool_ledger_app::{
    config::{format_minor, to_minor_units},
    context::AppContext,
    domain::pools::data::NewPool,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreatePoolArgs {
    /// Funding supplier
    #[arg(long)]
    supplier_uuid: Uuid,

    /// Discounted product
    #[arg(long)]
    product_uuid: Uuid,

    /// Funding in major units, e.g. 500.00
    #[arg(long)]
    amount: Decimal,

    /// Percentage taken off every second unit, e.g. 10
    #[arg(long)]
    percentage: Decimal,
}

pub(crate) async fn run(args: CreatePoolArgs, ctx: &AppContext) -> Result<(), String> {
    let initial = to_minor_units(args.amount, ctx.currency).map_err(|error| error.to_string())?;

    let pool = ctx
        .pools
        .create_pool(NewPool {
            uuid: PoolUuid::new(),
            supplier: SupplierUuid::from_uuid(args.supplier_uuid),
            product: ProductUuid::from_uuid(args.product_uuid),
            initial,
            percentage: args.percentage,
        })
        .await
        .map_err(|error| format!("failed to create pool: {error}"))?;

    println!("pool_uuid: {}", pool.uuid);
    println!("supplier: {}", pool.supplier_name);
    println!("balance: {}", format_minor(pool.remaining_amount, ctx.currency));
    println!("percentage: {}%", pool.percentage);

    Ok(())
}
