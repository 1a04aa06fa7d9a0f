//! Suppliers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use pool_ledger::suppliers::{SupplierDetails, SupplierUuid};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::suppliers::{data::NewSupplier, records::SupplierRecord};

const LIST_SUPPLIERS_SQL: &str = include_str!("sql/list_suppliers.sql");
const GET_SUPPLIER_SQL: &str = include_str!("sql/get_supplier.sql");
const CREATE_SUPPLIER_SQL: &str = include_str!("sql/create_supplier.sql");
const UPDATE_SUPPLIER_SQL: &str = include_str!("sql/update_supplier.sql");
const COUNT_SUPPLIER_POOLS_SQL: &str = include_str!("sql/count_supplier_pools.sql");
const DELETE_SUPPLIER_SQL: &str = include_str!("sql/delete_supplier.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSuppliersRepository;

impl PgSuppliersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_suppliers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        active_only: bool,
    ) -> Result<Vec<SupplierRecord>, sqlx::Error> {
        query_as::<Postgres, SupplierRecord>(LIST_SUPPLIERS_SQL)
            .bind(active_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_supplier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        supplier: SupplierUuid,
    ) -> Result<SupplierRecord, sqlx::Error> {
        query_as::<Postgres, SupplierRecord>(GET_SUPPLIER_SQL)
            .bind(supplier.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_supplier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        supplier: NewSupplier,
    ) -> Result<SupplierRecord, sqlx::Error> {
        let NewSupplier { uuid, details } = supplier;

        query_as::<Postgres, SupplierRecord>(CREATE_SUPPLIER_SQL)
            .bind(uuid.into_uuid())
            .bind(details.name)
            .bind(details.email)
            .bind(details.phone)
            .bind(details.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_supplier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        supplier: SupplierUuid,
        details: SupplierDetails,
    ) -> Result<SupplierRecord, sqlx::Error> {
        query_as::<Postgres, SupplierRecord>(UPDATE_SUPPLIER_SQL)
            .bind(supplier.into_uuid())
            .bind(details.name)
            .bind(details.email)
            .bind(details.phone)
            .bind(details.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_supplier_pools(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        supplier: SupplierUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_SUPPLIER_POOLS_SQL)
            .bind(supplier.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_supplier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        supplier: SupplierUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SUPPLIER_SQL)
            .bind(supplier.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for SupplierRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SupplierUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
