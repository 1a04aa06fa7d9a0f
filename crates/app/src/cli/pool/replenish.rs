use clap::Args;
use pool_ledger::pools::PoolUuid;
use pool_ledger_app::{
    config::{format_minor, to_minor_units},
    context::AppContext,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ReplenishPoolArgs {
    /// Pool to top up
    #[arg(long)]
    pool_uuid: Uuid,

    /// Amount to add in major units, e.g. 250.00
    #[arg(long)]
    amount: Decimal,
}

pub(crate) async fn run(args: ReplenishPoolArgs, ctx: &AppContext) -> Result<(), String> {
    let amount = to_minor_units(args.amount, ctx.currency).map_err(|error| error.to_string())?;

    let pool = ctx
        .pools
        .replenish_pool(PoolUuid::from_uuid(args.pool_uuid), amount)
        .await
        .map_err(|error| format!("failed to replenish pool: {error}"))?;

    println!("pool_uuid: {}", pool.uuid);
    println!("balance: {}", format_minor(pool.remaining_amount, ctx.currency));
    println!("initial: {}", format_minor(pool.initial_amount, ctx.currency));

    Ok(())
}
