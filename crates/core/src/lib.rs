//! Pool Ledger
//!
//! Supplier-funded "every second unit" discounts. Each (supplier, product)
//! pair can hold a pool with a balance and a percentage; cart lines of two or
//! more units are discounted from the best-funded pool, and the pool is
//! debited exactly once when the order is finalised.
//!
//! This crate holds the pure rules. Persistence and orchestration live in
//! `pool-ledger-app`.

pub mod discounts;
pub mod ledger;
pub mod orders;
pub mod pools;
pub mod prelude;
pub mod products;
pub mod suppliers;
pub mod uuids;
