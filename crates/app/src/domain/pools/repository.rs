//! Pools Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use pool_ledger::{pools::PoolUuid, products::ProductUuid, suppliers::SupplierUuid};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::pools::{
    data::{NewPool, PoolUpdate},
    records::PoolRecord,
};

const LIST_POOLS_SQL: &str = include_str!("sql/list_pools.sql");
const LIST_PRODUCT_POOLS_SQL: &str = include_str!("sql/list_product_pools.sql");
const GET_POOL_SQL: &str = include_str!("sql/get_pool.sql");
const LOCK_POOL_SQL: &str = include_str!("sql/lock_pool.sql");
const CREATE_POOL_SQL: &str = include_str!("sql/create_pool.sql");
const UPDATE_POOL_SQL: &str = include_str!("sql/update_pool.sql");
const SET_POOL_AMOUNTS_SQL: &str = include_str!("sql/set_pool_amounts.sql");
const DELETE_POOL_SQL: &str = include_str!("sql/delete_pool.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPoolsRepository;

impl PgPoolsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_pools(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PoolRecord>, sqlx::Error> {
        query_as::<Postgres, PoolRecord>(LIST_POOLS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_product_pools(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<PoolRecord>, sqlx::Error> {
        query_as::<Postgres, PoolRecord>(LIST_PRODUCT_POOLS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_pool(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pool: PoolUuid,
    ) -> Result<PoolRecord, sqlx::Error> {
        query_as::<Postgres, PoolRecord>(GET_POOL_SQL)
            .bind(pool.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a pool and hold its row lock until the transaction ends.
    pub(crate) async fn lock_pool(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pool: PoolUuid,
    ) -> Result<PoolRecord, sqlx::Error> {
        query_as::<Postgres, PoolRecord>(LOCK_POOL_SQL)
            .bind(pool.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_pool(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pool: &NewPool,
    ) -> Result<PoolRecord, sqlx::Error> {
        query_as::<Postgres, PoolRecord>(CREATE_POOL_SQL)
            .bind(pool.uuid.into_uuid())
            .bind(pool.supplier.into_uuid())
            .bind(pool.product.into_uuid())
            .bind(pool.initial)
            .bind(pool.percentage)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_pool(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pool: PoolUuid,
        update: &PoolUpdate,
    ) -> Result<PoolRecord, sqlx::Error> {
        query_as::<Postgres, PoolRecord>(UPDATE_POOL_SQL)
            .bind(pool.into_uuid())
            .bind(update.percentage)
            .bind(update.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_pool_amounts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pool: PoolUuid,
        initial: i64,
        remaining: i64,
    ) -> Result<PoolRecord, sqlx::Error> {
        query_as::<Postgres, PoolRecord>(SET_POOL_AMOUNTS_SQL)
            .bind(pool.into_uuid())
            .bind(initial)
            .bind(remaining)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_pool(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pool: PoolUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_POOL_SQL)
            .bind(pool.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PoolRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PoolUuid::from_uuid(row.try_get("uuid")?),
            supplier_uuid: SupplierUuid::from_uuid(row.try_get("supplier_uuid")?),
            supplier_name: row.try_get("supplier_name")?,
            supplier_active: row.try_get("supplier_active")?,
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            initial_amount: row.try_get("initial_amount")?,
            remaining_amount: row.try_get("remaining_amount")?,
            percentage: row.try_get("percentage")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
