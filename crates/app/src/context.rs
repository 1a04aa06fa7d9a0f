//! App Context

use std::sync::Arc;

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    config::{ConfigError, LedgerConfig},
    database::{self, Db},
    domain::{
        ledger::{LedgerService, PgLedgerStore, PoolLedger},
        pools::{PgPoolsService, PoolsService},
        reports::{PgReportsService, ReportsService},
        suppliers::{PgSuppliersService, SuppliersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub currency: &'static Currency,
    pub suppliers: Arc<dyn SuppliersService>,
    pub pools: Arc<dyn PoolsService>,
    pub reports: Arc<dyn ReportsService>,
    pub ledger: Arc<dyn LedgerService>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the database URL or currency is missing or invalid, or when
    /// establishing a database connection fails.
    pub async fn from_config(config: &LedgerConfig) -> Result<Self, AppInitError> {
        let url = config
            .database_url
            .as_deref()
            .ok_or(AppInitError::MissingDatabaseUrl)?;

        let currency = config.currency()?;

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::new(Db::new(pool), currency))
    }

    /// Wire every service to one database.
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        let store = Arc::new(PgLedgerStore::new(db.clone(), currency));

        Self {
            currency,
            suppliers: Arc::new(PgSuppliersService::new(db.clone())),
            pools: Arc::new(PgPoolsService::new(db.clone(), currency)),
            reports: Arc::new(PgReportsService::new(db)),
            ledger: Arc::new(PoolLedger::new(
                store.clone(),
                store.clone(),
                store,
                currency,
            )),
        }
    }
}
