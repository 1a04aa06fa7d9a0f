//! Suppliers service.

use async_trait::async_trait;
use mockall::automock;
use pool_ledger::suppliers::{Supplier, SupplierDetails, SupplierUuid};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::suppliers::{
        data::NewSupplier, errors::SuppliersServiceError, repository::PgSuppliersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgSuppliersService {
    db: Db,
    repository: PgSuppliersRepository,
}

impl PgSuppliersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSuppliersRepository::new(),
        }
    }
}

#[async_trait]
impl SuppliersService for PgSuppliersService {
    #[tracing::instrument(
        name = "suppliers.service.list_suppliers",
        skip(self),
        fields(supplier_count = tracing::field::Empty),
        err
    )]
    async fn list_suppliers(
        &self,
        active_only: bool,
    ) -> Result<Vec<Supplier>, SuppliersServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_suppliers(&mut tx, active_only).await?;

        tx.commit().await?;

        Span::current().record("supplier_count", records.len());

        Ok(records.into_iter().map(Supplier::from).collect())
    }

    #[tracing::instrument(
        name = "suppliers.service.get_supplier",
        skip(self),
        fields(supplier_uuid = %supplier),
        err
    )]
    async fn get_supplier(&self, supplier: SupplierUuid) -> Result<Supplier, SuppliersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_supplier(&mut tx, supplier).await?;

        tx.commit().await?;

        Ok(record.into())
    }

    #[tracing::instrument(
        name = "suppliers.service.create_supplier",
        skip(self, supplier),
        fields(supplier_uuid = %supplier.uuid),
        err
    )]
    async fn create_supplier(
        &self,
        supplier: NewSupplier,
    ) -> Result<Supplier, SuppliersServiceError> {
        let details = supplier.details.validate()?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .create_supplier(
                &mut tx,
                NewSupplier {
                    uuid: supplier.uuid,
                    details,
                },
            )
            .await?;

        tx.commit().await?;

        info!(name = %record.name, "created supplier");

        Ok(record.into())
    }

    #[tracing::instrument(
        name = "suppliers.service.update_supplier",
        skip(self, details),
        fields(supplier_uuid = %supplier),
        err
    )]
    async fn update_supplier(
        &self,
        supplier: SupplierUuid,
        details: SupplierDetails,
    ) -> Result<Supplier, SuppliersServiceError> {
        let details = details.validate()?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .update_supplier(&mut tx, supplier, details)
            .await?;

        tx.commit().await?;

        Ok(record.into())
    }

    #[tracing::instrument(
        name = "suppliers.service.delete_supplier",
        skip(self),
        fields(supplier_uuid = %supplier),
        err
    )]
    async fn delete_supplier(&self, supplier: SupplierUuid) -> Result<(), SuppliersServiceError> {
        let mut tx = self.db.begin().await?;

        let pools = self
            .repository
            .count_supplier_pools(&mut tx, supplier)
            .await?;

        if pools > 0 {
            return Err(SuppliersServiceError::HasPools(pools));
        }

        let rows_affected = self.repository.delete_supplier(&mut tx, supplier).await?;

        if rows_affected == 0 {
            return Err(SuppliersServiceError::NotFound);
        }

        tx.commit().await?;

        info!("deleted supplier");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SuppliersService: Send + Sync {
    /// Retrieve suppliers ordered by name, optionally only the active ones.
    async fn list_suppliers(&self, active_only: bool)
    -> Result<Vec<Supplier>, SuppliersServiceError>;

    /// Retrieve a single supplier.
    async fn get_supplier(&self, supplier: SupplierUuid) -> Result<Supplier, SuppliersServiceError>;

    /// Validate and store a new supplier.
    async fn create_supplier(&self, supplier: NewSupplier)
    -> Result<Supplier, SuppliersServiceError>;

    /// Replace a supplier's name, contact details and active flag.
    async fn update_supplier(
        &self,
        supplier: SupplierUuid,
        details: SupplierDetails,
    ) -> Result<Supplier, SuppliersServiceError>;

    /// Delete a supplier that no longer funds any pool.
    async fn delete_supplier(&self, supplier: SupplierUuid) -> Result<(), SuppliersServiceError>;
}

#[cfg(test)]
mod tests {
    use pool_ledger::suppliers::SupplierError;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::create_supplier};

    use super::*;

    fn details(name: &str, email: Option<&str>) -> SupplierDetails {
        SupplierDetails {
            name: name.to_string(),
            email: email.map(str::to_string),
            phone: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn create_supplier_normalises_details() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = SupplierUuid::new();

        let supplier = ctx
            .suppliers
            .create_supplier(NewSupplier {
                uuid,
                details: SupplierDetails {
                    name: "  Viña Alta ".to_string(),
                    email: Some("Ventas@VinaAlta.cl".to_string()),
                    phone: Some("   ".to_string()),
                    active: true,
                },
            })
            .await?;

        assert_eq!(supplier.uuid, uuid);
        assert_eq!(supplier.name, "Viña Alta");
        assert_eq!(supplier.email.as_deref(), Some("ventas@vinaalta.cl"));
        assert_eq!(supplier.phone, None);

        Ok(())
    }

    #[tokio::test]
    async fn create_supplier_rejects_invalid_email_before_storage() {
        let ctx = TestContext::new().await;

        let result = ctx
            .suppliers
            .create_supplier(NewSupplier {
                uuid: SupplierUuid::new(),
                details: details("Cervecera Sur", Some("not-an-email")),
            })
            .await;

        assert!(
            matches!(
                result,
                Err(SuppliersServiceError::Validation(SupplierError::InvalidEmail(_)))
            ),
            "expected InvalidEmail, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_supplier_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        create_supplier(&ctx, "Cervecera Sur", Some("ventas@sur.cl")).await?;

        let result = create_supplier(&ctx, "Cervecera Sur II", Some("VENTAS@sur.cl")).await;

        assert!(
            matches!(result, Err(SuppliersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_suppliers_can_filter_inactive() -> TestResult {
        let ctx = TestContext::new().await;

        let active = create_supplier(&ctx, "Andes Spirits", None).await?;
        let inactive = create_supplier(&ctx, "Bodega Vieja", None).await?;

        ctx.suppliers
            .update_supplier(
                inactive.uuid,
                SupplierDetails {
                    active: false,
                    ..details("Bodega Vieja", None)
                },
            )
            .await?;

        let all = ctx.suppliers.list_suppliers(false).await?;
        let active_only = ctx.suppliers.list_suppliers(true).await?;

        assert_eq!(
            all.iter().map(|s| s.uuid).collect::<Vec<_>>(),
            vec![active.uuid, inactive.uuid]
        );
        assert_eq!(
            active_only.iter().map(|s| s.uuid).collect::<Vec<_>>(),
            vec![active.uuid]
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_supplier_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .suppliers
            .update_supplier(SupplierUuid::new(), details("Nadie", None))
            .await;

        assert!(
            matches!(result, Err(SuppliersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_supplier_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let supplier = create_supplier(&ctx, "Andes Spirits", None).await?;

        ctx.suppliers.delete_supplier(supplier.uuid).await?;

        let result = ctx.suppliers.get_supplier(supplier.uuid).await;

        assert!(
            matches!(result, Err(SuppliersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_supplier_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.suppliers.delete_supplier(SupplierUuid::new()).await;

        assert!(
            matches!(result, Err(SuppliersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
