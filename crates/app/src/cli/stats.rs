use clap::Args;
use jiff::Timestamp;
use pool_ledger_app::{config::format_minor, context::AppContext};

use crate::cli::table;

#[derive(Debug, Args)]
pub(crate) struct StatsArgs {
    /// Number of recent applied discounts to show
    #[arg(long, default_value_t = 10)]
    recent: u32,
}

pub(crate) async fn run(args: StatsArgs, ctx: &AppContext) -> Result<(), String> {
    let stats = ctx
        .reports
        .dashboard_stats(Timestamp::now())
        .await
        .map_err(|error| format!("failed to load stats: {error}"))?;

    println!("active suppliers: {}", stats.active_suppliers);
    println!("funded pools: {}", stats.funded_pools);
    println!(
        "total remaining: {}",
        format_minor(stats.total_remaining, ctx.currency)
    );
    println!("applied today: {}", stats.applied_today);

    if args.recent == 0 {
        return Ok(());
    }

    let activity = ctx
        .reports
        .recent_activity(args.recent)
        .await
        .map_err(|error| format!("failed to load recent activity: {error}"))?;

    if activity.is_empty() {
        println!("no recent activity");
        return Ok(());
    }

    let rows = activity.into_iter().map(|entry| {
        [
            entry.applied.applied_at.to_string(),
            entry.applied.order_uuid.to_string(),
            entry.supplier_name,
            entry.applied.product_uuid.to_string(),
            entry.applied.quantity.to_string(),
            format_minor(entry.applied.amount, ctx.currency),
            format_minor(entry.applied.remaining_amount, ctx.currency),
        ]
    });

    println!(
        "\n{}",
        table::render(
            [
                "Applied at",
                "Order",
                "Supplier",
                "Product",
                "Qty",
                "Deducted",
                "Remaining"
            ],
            rows,
            4..7,
        )
    );

    Ok(())
}
