//! Reports service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::Span;

use crate::{
    database::Db,
    domain::reports::{
        data::{ReportFilter, day_bounds},
        errors::ReportsServiceError,
        records::{ActivityRecord, DashboardStats, ReportRow},
        repository::PgReportsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    repository: PgReportsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReportsRepository::new(),
        }
    }
}

#[async_trait]
impl ReportsService for PgReportsService {
    #[tracing::instrument(
        name = "reports.service.discount_report",
        skip(self),
        fields(row_count = tracing::field::Empty),
        err
    )]
    async fn discount_report(
        &self,
        filter: ReportFilter,
    ) -> Result<Vec<ReportRow>, ReportsServiceError> {
        let bounds = filter.bounds()?;

        let mut tx = self.db.begin().await?;

        let rows = self
            .repository
            .discount_report(&mut tx, bounds, filter.supplier, filter.product)
            .await?;

        tx.commit().await?;

        Span::current().record("row_count", rows.len());

        Ok(rows)
    }

    #[tracing::instrument(name = "reports.service.dashboard_stats", skip(self), err)]
    async fn dashboard_stats(
        &self,
        point_in_time: Timestamp,
    ) -> Result<DashboardStats, ReportsServiceError> {
        let today = day_bounds(point_in_time)?;

        let mut tx = self.db.begin().await?;

        let stats = self.repository.dashboard_stats(&mut tx, today).await?;

        tx.commit().await?;

        Ok(stats)
    }

    #[tracing::instrument(name = "reports.service.recent_activity", skip(self), err)]
    async fn recent_activity(&self, limit: u32) -> Result<Vec<ActivityRecord>, ReportsServiceError> {
        let mut tx = self.db.begin().await?;

        let activity = self
            .repository
            .recent_activity(&mut tx, i64::from(limit))
            .await?;

        tx.commit().await?;

        Ok(activity)
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Applied discounts grouped by supplier and product, most recently active first.
    async fn discount_report(
        &self,
        filter: ReportFilter,
    ) -> Result<Vec<ReportRow>, ReportsServiceError>;

    /// Headline figures, counting discounts applied on the UTC day of `point_in_time`.
    async fn dashboard_stats(
        &self,
        point_in_time: Timestamp,
    ) -> Result<DashboardStats, ReportsServiceError>;

    /// The latest `limit` applied discounts.
    async fn recent_activity(&self, limit: u32) -> Result<Vec<ActivityRecord>, ReportsServiceError>;
}
