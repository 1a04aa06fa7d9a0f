//! Discount Pool Ledger
//!
//! Cart previews and order commits over injected stores. Previews read pool
//! balances only; commits debit them once per order, guarded by an order
//! metadata flag.

pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod store;

pub use errors::{LedgerServiceError, LedgerStoreError};
pub use repository::PgLedgerStore;
pub use service::*;
pub use store::*;
