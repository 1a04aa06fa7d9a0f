use clap::Args;
use jiff::civil::Date;
use pool_ledger::{products::ProductUuid, suppliers::SupplierUuid};
use pool_ledger_app::{
    config::format_minor, context::AppContext, domain::reports::data::ReportFilter,
};
use uuid::Uuid;

use crate::cli::table;

#[derive(Debug, Args)]
pub(crate) struct ReportArgs {
    /// First day to include (YYYY-MM-DD, UTC)
    #[arg(long)]
    from: Option<Date>,

    /// Last day to include (YYYY-MM-DD, UTC)
    #[arg(long)]
    to: Option<Date>,

    /// Only this supplier
    #[arg(long)]
    supplier_uuid: Option<Uuid>,

    /// Only this product
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: ReportArgs, ctx: &AppContext) -> Result<(), String> {
    let rows = ctx
        .reports
        .discount_report(ReportFilter {
            from: args.from,
            to: args.to,
            supplier: args.supplier_uuid.map(SupplierUuid::from_uuid),
            product: args.product_uuid.map(ProductUuid::from_uuid),
        })
        .await
        .map_err(|error| format!("failed to build report: {error}"))?;

    if rows.is_empty() {
        println!("no discounts applied in this period");
        return Ok(());
    }

    let total: i64 = rows.iter().map(|row| row.total_amount).sum();

    let rows = rows.into_iter().map(|row| {
        [
            row.supplier_name,
            row.product_uuid.to_string(),
            format_minor(row.total_amount, ctx.currency),
            row.applications.to_string(),
            row.last_applied_at.to_string(),
        ]
    });

    println!(
        "{}",
        table::render(
            ["Supplier", "Product", "Deducted", "Applications", "Last applied"],
            rows,
            2..4,
        )
    );
    println!("total deducted: {}", format_minor(total, ctx.currency));

    Ok(())
}
