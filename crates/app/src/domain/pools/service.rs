//! Pools service.

use async_trait::async_trait;
use mockall::automock;
use pool_ledger::{
    discounts::{percentage_from_points, percentage_points},
    ledger::offers::{ProductOffer, product_offers},
    pools::{DiscountPool, PoolError, PoolUuid},
    products::ProductUuid,
};
use rusty_money::{Money, iso::Currency};
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::pools::{
        data::{NewPool, PoolUpdate},
        errors::PoolsServiceError,
        records::PoolRecord,
        repository::PgPoolsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgPoolsService {
    db: Db,
    currency: &'static Currency,
    repository: PgPoolsRepository,
}

impl PgPoolsService {
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        Self {
            db,
            currency,
            repository: PgPoolsRepository::new(),
        }
    }
}

#[async_trait]
impl PoolsService for PgPoolsService {
    #[tracing::instrument(
        name = "pools.service.list_pools",
        skip(self),
        fields(pool_count = tracing::field::Empty),
        err
    )]
    async fn list_pools(&self) -> Result<Vec<PoolRecord>, PoolsServiceError> {
        let mut tx = self.db.begin().await?;

        let pools = self.repository.list_pools(&mut tx).await?;

        tx.commit().await?;

        Span::current().record("pool_count", pools.len());

        Ok(pools)
    }

    #[tracing::instrument(
        name = "pools.service.list_product_pools",
        skip(self),
        fields(product_uuid = %product, pool_count = tracing::field::Empty),
        err
    )]
    async fn list_product_pools(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<PoolRecord>, PoolsServiceError> {
        let mut tx = self.db.begin().await?;

        let pools = self.repository.list_product_pools(&mut tx, product).await?;

        tx.commit().await?;

        Span::current().record("pool_count", pools.len());

        Ok(pools)
    }

    #[tracing::instrument(
        name = "pools.service.get_pool",
        skip(self),
        fields(pool_uuid = %pool),
        err
    )]
    async fn get_pool(&self, pool: PoolUuid) -> Result<PoolRecord, PoolsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_pool(&mut tx, pool).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "pools.service.create_pool",
        skip(self, pool),
        fields(
            pool_uuid = %pool.uuid,
            supplier_uuid = %pool.supplier,
            product_uuid = %pool.product,
        ),
        err
    )]
    async fn create_pool(&self, pool: NewPool) -> Result<PoolRecord, PoolsServiceError> {
        let validated = DiscountPool::new(
            pool.uuid,
            pool.supplier,
            pool.product,
            Money::from_minor(pool.initial, self.currency),
            pool.percentage,
        )?;

        let pool = NewPool {
            percentage: validated.percentage_points(),
            ..pool
        };

        let mut tx = self.db.begin().await?;

        let record = self.repository.create_pool(&mut tx, &pool).await?;

        tx.commit().await?;

        info!(
            initial = record.initial_amount,
            percentage = %record.percentage,
            "created discount pool"
        );

        Ok(record)
    }

    #[tracing::instrument(
        name = "pools.service.update_pool",
        skip(self, update),
        fields(pool_uuid = %pool),
        err
    )]
    async fn update_pool(
        &self,
        pool: PoolUuid,
        update: PoolUpdate,
    ) -> Result<PoolRecord, PoolsServiceError> {
        let percentage = percentage_from_points(update.percentage).map_err(PoolError::from)?;

        let update = PoolUpdate {
            percentage: percentage_points(&percentage),
            ..update
        };

        let mut tx = self.db.begin().await?;

        let record = self.repository.update_pool(&mut tx, pool, &update).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "pools.service.replenish_pool",
        skip(self),
        fields(pool_uuid = %pool),
        err
    )]
    async fn replenish_pool(
        &self,
        pool: PoolUuid,
        amount: i64,
    ) -> Result<PoolRecord, PoolsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .lock_pool(&mut tx, pool)
            .await?
            .to_candidate(self.currency)?;

        let (initial, remaining) = current
            .pool
            .replenish(&Money::from_minor(amount, self.currency))?;

        let record = self
            .repository
            .set_pool_amounts(
                &mut tx,
                pool,
                initial.to_minor_units(),
                remaining.to_minor_units(),
            )
            .await?;

        tx.commit().await?;

        info!(
            amount,
            remaining = record.remaining_amount,
            initial = record.initial_amount,
            "replenished discount pool"
        );

        Ok(record)
    }

    #[tracing::instrument(
        name = "pools.service.delete_pool",
        skip(self),
        fields(pool_uuid = %pool),
        err
    )]
    async fn delete_pool(&self, pool: PoolUuid) -> Result<(), PoolsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_pool(&mut tx, pool)
            .await
            .map_err(|error| match PoolsServiceError::from(error) {
                PoolsServiceError::InvalidReference => PoolsServiceError::InUse,
                other => other,
            })?;

        if rows_affected == 0 {
            return Err(PoolsServiceError::NotFound);
        }

        tx.commit().await?;

        info!("deleted discount pool");

        Ok(())
    }

    #[tracing::instrument(
        name = "pools.service.product_offers",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn product_offers(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ProductOffer<'static>>, PoolsServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_product_pools(&mut tx, product).await?;

        tx.commit().await?;

        let mut candidates = Vec::with_capacity(records.len());

        for record in &records {
            match record.to_candidate(self.currency) {
                Ok(candidate) => candidates.push(candidate),
                Err(error) => warn!(pool_uuid = %record.uuid, %error, "skipping invalid pool"),
            }
        }

        Ok(product_offers(&candidates))
    }
}

#[automock]
#[async_trait]
pub trait PoolsService: Send + Sync {
    /// Retrieve every pool, grouped by product with the largest balance first.
    async fn list_pools(&self) -> Result<Vec<PoolRecord>, PoolsServiceError>;

    /// Retrieve all pools for one product, active or not.
    async fn list_product_pools(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<PoolRecord>, PoolsServiceError>;

    /// Retrieve a single pool.
    async fn get_pool(&self, pool: PoolUuid) -> Result<PoolRecord, PoolsServiceError>;

    /// Validate and store a new pool whose remaining balance equals its funding.
    async fn create_pool(&self, pool: NewPool) -> Result<PoolRecord, PoolsServiceError>;

    /// Change a pool's percentage and active flag.
    async fn update_pool(
        &self,
        pool: PoolUuid,
        update: PoolUpdate,
    ) -> Result<PoolRecord, PoolsServiceError>;

    /// Add `amount` minor units to a pool's balance.
    async fn replenish_pool(&self, pool: PoolUuid, amount: i64)
    -> Result<PoolRecord, PoolsServiceError>;

    /// Delete a pool that has never funded a discount.
    async fn delete_pool(&self, pool: PoolUuid) -> Result<(), PoolsServiceError>;

    /// Funded pools for a product page.
    async fn product_offers(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ProductOffer<'static>>, PoolsServiceError>;
}

#[cfg(test)]
mod tests {
    use pool_ledger::{discounts::DiscountError, suppliers::SupplierUuid};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::suppliers::{SuppliersService, SuppliersServiceError},
        test::{
            TestContext,
            helpers::{create_pool, create_supplier},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_pool_starts_with_full_balance() -> TestResult {
        let ctx = TestContext::new().await;
        let supplier = create_supplier(&ctx, "Andes Spirits", None).await?;
        let product = ProductUuid::new();

        let pool = create_pool(&ctx, supplier.uuid, product, 50_000, Decimal::new(125, 1)).await?;

        assert_eq!(pool.supplier_uuid, supplier.uuid);
        assert_eq!(pool.supplier_name, "Andes Spirits");
        assert_eq!(pool.product_uuid, product);
        assert_eq!(pool.initial_amount, 50_000);
        assert_eq!(pool.remaining_amount, 50_000);
        assert_eq!(pool.percentage, Decimal::new(1_250, 2));
        assert!(pool.active);

        Ok(())
    }

    #[tokio::test]
    async fn create_pool_rejects_non_positive_initial() -> TestResult {
        let ctx = TestContext::new().await;
        let supplier = create_supplier(&ctx, "Andes Spirits", None).await?;

        let result = create_pool(&ctx, supplier.uuid, ProductUuid::new(), 0, Decimal::TEN).await;

        assert!(
            matches!(
                result,
                Err(PoolsServiceError::Validation(PoolError::NonPositiveInitial))
            ),
            "expected NonPositiveInitial, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_pool_rejects_out_of_range_percentage() -> TestResult {
        let ctx = TestContext::new().await;
        let supplier = create_supplier(&ctx, "Andes Spirits", None).await?;

        let result = create_pool(
            &ctx,
            supplier.uuid,
            ProductUuid::new(),
            10_000,
            Decimal::new(101, 0),
        )
        .await;

        assert!(
            matches!(
                result,
                Err(PoolsServiceError::Validation(PoolError::Discount(
                    DiscountError::PercentOutOfRange(_)
                )))
            ),
            "expected PercentOutOfRange, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_pool_duplicate_pair_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let supplier = create_supplier(&ctx, "Andes Spirits", None).await?;
        let product = ProductUuid::new();

        create_pool(&ctx, supplier.uuid, product, 10_000, Decimal::TEN).await?;

        let result = create_pool(&ctx, supplier.uuid, product, 20_000, Decimal::TEN).await;

        assert!(
            matches!(result, Err(PoolsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_pool_unknown_supplier_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = create_pool(
            &ctx,
            SupplierUuid::new(),
            ProductUuid::new(),
            10_000,
            Decimal::TEN,
        )
        .await;

        assert!(
            matches!(result, Err(PoolsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn replenish_raises_initial_when_balance_would_exceed_it() -> TestResult {
        let ctx = TestContext::new().await;
        let supplier = create_supplier(&ctx, "Andes Spirits", None).await?;
        let pool = create_pool(&ctx, supplier.uuid, ProductUuid::new(), 10_000, Decimal::TEN).await?;

        let replenished = ctx.pools.replenish_pool(pool.uuid, 2_500).await?;

        assert_eq!(replenished.remaining_amount, 12_500);
        assert_eq!(replenished.initial_amount, 12_500);

        Ok(())
    }

    #[tokio::test]
    async fn update_pool_changes_percentage_and_active_flag() -> TestResult {
        let ctx = TestContext::new().await;
        let supplier = create_supplier(&ctx, "Andes Spirits", None).await?;
        let pool = create_pool(&ctx, supplier.uuid, ProductUuid::new(), 10_000, Decimal::TEN).await?;

        let updated = ctx
            .pools
            .update_pool(
                pool.uuid,
                PoolUpdate {
                    percentage: Decimal::new(15, 0),
                    active: false,
                },
            )
            .await?;

        assert_eq!(updated.percentage, Decimal::new(1_500, 2));
        assert!(!updated.active);
        assert_eq!(updated.remaining_amount, 10_000);

        Ok(())
    }

    #[tokio::test]
    async fn product_offers_lists_funded_pools_only() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ProductUuid::new();

        let andes = create_supplier(&ctx, "Andes Spirits", None).await?;
        let bodega = create_supplier(&ctx, "Bodega Vieja", None).await?;

        let funded = create_pool(&ctx, andes.uuid, product, 10_000, Decimal::TEN).await?;
        let paused = create_pool(&ctx, bodega.uuid, product, 20_000, Decimal::TEN).await?;

        ctx.pools
            .update_pool(
                paused.uuid,
                PoolUpdate {
                    percentage: Decimal::TEN,
                    active: false,
                },
            )
            .await?;

        let offers = ctx.pools.product_offers(product).await?;

        assert_eq!(
            offers.iter().map(|offer| offer.pool).collect::<Vec<_>>(),
            vec![funded.uuid]
        );

        Ok(())
    }

    #[tokio::test]
    async fn supplier_with_pools_cannot_be_deleted() -> TestResult {
        let ctx = TestContext::new().await;
        let supplier = create_supplier(&ctx, "Andes Spirits", None).await?;

        create_pool(&ctx, supplier.uuid, ProductUuid::new(), 10_000, Decimal::TEN).await?;

        let result = ctx.suppliers.delete_supplier(supplier.uuid).await;

        assert!(
            matches!(result, Err(SuppliersServiceError::HasPools(1))),
            "expected HasPools(1), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_pool_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let supplier = create_supplier(&ctx, "Andes Spirits", None).await?;
        let pool = create_pool(&ctx, supplier.uuid, ProductUuid::new(), 10_000, Decimal::TEN).await?;

        ctx.pools.delete_pool(pool.uuid).await?;

        let result = ctx.pools.get_pool(pool.uuid).await;

        assert!(
            matches!(result, Err(PoolsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
