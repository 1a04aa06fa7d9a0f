use clap::Args;
use pool_ledger::suppliers::{SupplierDetails, SupplierUuid};
use pool_ledger_app::{context::AppContext, domain::suppliers::data::NewSupplier};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateSupplierArgs {
    /// Supplier display name
    #[arg(long)]
    name: String,

    /// Contact email
    #[arg(long)]
    email: Option<String>,

    /// Contact phone
    #[arg(long)]
    phone: Option<String>,

    /// Create the supplier inactive
    #[arg(long)]
    inactive: bool,

    /// Optional supplier UUID; generated when omitted
    #[arg(long)]
    supplier_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateSupplierArgs, ctx: &AppContext) -> Result<(), String> {
    let uuid = args
        .supplier_uuid
        .map_or_else(SupplierUuid::new, SupplierUuid::from_uuid);

    let supplier = ctx
        .suppliers
        .create_supplier(NewSupplier {
            uuid,
            details: SupplierDetails {
                name: args.name,
                email: args.email,
                phone: args.phone,
                active: !args.inactive,
            },
        })
        .await
        .map_err(|error| format!("failed to create supplier: {error}"))?;

    println!("supplier_uuid: {}", supplier.uuid);
    println!("supplier_name: {}", supplier.name);

    Ok(())
}
