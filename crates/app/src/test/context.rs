//! Test context for service-level integration tests.

use std::sync::Arc;

use rusty_money::iso::{Currency, USD};

use crate::{
    database::Db,
    domain::{
        ledger::{PgLedgerStore, PoolLedger},
        pools::PgPoolsService,
        reports::PgReportsService,
        suppliers::PgSuppliersService,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub currency: &'static Currency,
    pub suppliers: PgSuppliersService,
    pub pools: PgPoolsService,
    pub reports: PgReportsService,
    pub ledger: PoolLedger,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());
        let store = Arc::new(PgLedgerStore::new(db.clone(), USD));

        Self {
            currency: USD,
            suppliers: PgSuppliersService::new(db.clone()),
            pools: PgPoolsService::new(db.clone(), USD),
            reports: PgReportsService::new(db),
            ledger: PoolLedger::new(store.clone(), store.clone(), store, USD),
            db: test_db,
        }
    }
}
