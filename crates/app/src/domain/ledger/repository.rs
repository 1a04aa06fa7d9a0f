//! PostgreSQL ledger store

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use pool_ledger::{
    ledger::commit::NewAppliedDiscount,
    orders::OrderUuid,
    pools::{PoolCandidate, PoolUuid},
    products::ProductUuid,
    suppliers::SupplierUuid,
};
use rusty_money::iso::Currency;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use tracing::warn;

use crate::{
    database::Db,
    domain::{
        ledger::{
            errors::LedgerStoreError,
            records::{AppliedDiscountRecord, AppliedDiscountUuid},
            store::{AppliedDiscountStore, OrderMetaStore, PoolStore},
        },
        pools::records::PoolRecord,
    },
};

const CANDIDATES_FOR_PRODUCT_SQL: &str = include_str!("sql/candidates_for_product.sql");
const SET_REMAINING_SQL: &str = include_str!("sql/set_remaining.sql");
const APPEND_APPLIED_DISCOUNT_SQL: &str = include_str!("sql/append_applied_discount.sql");
const GET_ORDER_META_SQL: &str = include_str!("sql/get_order_meta.sql");
const SET_ORDER_META_SQL: &str = include_str!("sql/set_order_meta.sql");

/// Ledger stores backed by `PostgreSQL`.
///
/// Every call runs on its own connection with no surrounding transaction, so a
/// balance written by one commit can be overwritten by a concurrent one.
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    db: Db,
    currency: &'static Currency,
}

impl PgLedgerStore {
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        Self { db, currency }
    }
}

#[async_trait]
impl PoolStore for PgLedgerStore {
    async fn candidates_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<PoolCandidate<'static>>, LedgerStoreError> {
        let records = query_as::<Postgres, PoolRecord>(CANDIDATES_FOR_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_all(self.db.pool())
            .await?;

        let mut candidates = Vec::with_capacity(records.len());

        for record in records {
            match record.to_candidate(self.currency) {
                Ok(candidate) => candidates.push(candidate),
                Err(error) => warn!(pool_uuid = %record.uuid, %error, "skipping invalid pool"),
            }
        }

        Ok(candidates)
    }

    async fn set_remaining(&self, pool: PoolUuid, remaining: i64) -> Result<(), LedgerStoreError> {
        let rows_affected = query(SET_REMAINING_SQL)
            .bind(pool.into_uuid())
            .bind(remaining)
            .execute(self.db.pool())
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(LedgerStoreError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl AppliedDiscountStore for PgLedgerStore {
    async fn append(
        &self,
        record: NewAppliedDiscount<'static>,
    ) -> Result<AppliedDiscountRecord, LedgerStoreError> {
        let quantity = i32::try_from(record.quantity)
            .map_err(|_| LedgerStoreError::QuantityOutOfRange(record.quantity))?;

        let stored = query_as::<Postgres, AppliedDiscountRecord>(APPEND_APPLIED_DISCOUNT_SQL)
            .bind(AppliedDiscountUuid::new().into_uuid())
            .bind(record.order.into_uuid())
            .bind(record.product.into_uuid())
            .bind(record.supplier.into_uuid())
            .bind(record.pool.into_uuid())
            .bind(record.amount.to_minor_units())
            .bind(record.remaining.to_minor_units())
            .bind(record.percentage_points())
            .bind(quantity)
            .fetch_one(self.db.pool())
            .await?;

        Ok(stored)
    }
}

#[async_trait]
impl OrderMetaStore for PgLedgerStore {
    async fn get(&self, order: OrderUuid, field: &str) -> Result<Option<String>, LedgerStoreError> {
        let value: Option<String> = query_scalar(GET_ORDER_META_SQL)
            .bind(order.into_uuid())
            .bind(field)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(value)
    }

    async fn set(
        &self,
        order: OrderUuid,
        field: &str,
        value: &str,
    ) -> Result<(), LedgerStoreError> {
        query(SET_ORDER_META_SQL)
            .bind(order.into_uuid())
            .bind(field)
            .bind(value)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for AppliedDiscountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;

        Ok(Self {
            uuid: AppliedDiscountUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            supplier_uuid: SupplierUuid::from_uuid(row.try_get("supplier_uuid")?),
            pool_uuid: PoolUuid::from_uuid(row.try_get("pool_uuid")?),
            amount: row.try_get("amount")?,
            remaining_amount: row.try_get("remaining_amount")?,
            percentage: row.try_get("percentage")?,
            quantity: u32::try_from(quantity).map_err(|error| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(error),
            })?,
            applied_at: row.try_get::<SqlxTimestamp, _>("applied_at")?.to_jiff(),
        })
    }
}
