//! Test support: a shared `PostgreSQL` container, per-test databases, and an
//! in-memory ledger store.

mod context;
mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
