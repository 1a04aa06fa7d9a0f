//! Reports Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use pool_ledger::{products::ProductUuid, suppliers::SupplierUuid};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    ledger::records::AppliedDiscountRecord,
    reports::records::{ActivityRecord, DashboardStats, ReportRow},
};

const DISCOUNT_REPORT_SQL: &str = include_str!("sql/discount_report.sql");
const DASHBOARD_STATS_SQL: &str = include_str!("sql/dashboard_stats.sql");
const RECENT_ACTIVITY_SQL: &str = include_str!("sql/recent_activity.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn discount_report(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        (start, end): (Option<Timestamp>, Option<Timestamp>),
        supplier: Option<SupplierUuid>,
        product: Option<ProductUuid>,
    ) -> Result<Vec<ReportRow>, sqlx::Error> {
        query_as::<Postgres, ReportRow>(DISCOUNT_REPORT_SQL)
            .bind(start.map(SqlxTimestamp::from))
            .bind(end.map(SqlxTimestamp::from))
            .bind(supplier.map(SupplierUuid::into_uuid))
            .bind(product.map(ProductUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn dashboard_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        (start, end): (Timestamp, Timestamp),
    ) -> Result<DashboardStats, sqlx::Error> {
        query_as::<Postgres, DashboardStats>(DASHBOARD_STATS_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn recent_activity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<ActivityRecord>, sqlx::Error> {
        query_as::<Postgres, ActivityRecord>(RECENT_ACTIVITY_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ReportRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            supplier_uuid: SupplierUuid::from_uuid(row.try_get("supplier_uuid")?),
            supplier_name: row.try_get("supplier_name")?,
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            total_amount: row.try_get("total_amount")?,
            applications: row.try_get("applications")?,
            last_applied_at: row
                .try_get::<SqlxTimestamp, _>("last_applied_at")?
                .to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for DashboardStats {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            active_suppliers: row.try_get("active_suppliers")?,
            funded_pools: row.try_get("funded_pools")?,
            total_remaining: row.try_get("total_remaining")?,
            applied_today: row.try_get("applied_today")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActivityRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            applied: AppliedDiscountRecord::from_row(row)?,
            supplier_name: row.try_get("supplier_name")?,
        })
    }
}
