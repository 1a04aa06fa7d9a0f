//! Pool Ledger Domain Concerns

pub mod ledger;
pub mod pools;
pub mod reports;
pub mod suppliers;
