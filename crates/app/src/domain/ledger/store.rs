//! Ledger stores
//!
//! The ledger service only talks to storage through these traits.

use async_trait::async_trait;
use mockall::automock;
use pool_ledger::{
    ledger::commit::NewAppliedDiscount,
    orders::OrderUuid,
    pools::{PoolCandidate, PoolUuid},
    products::ProductUuid,
};

use crate::domain::ledger::{errors::LedgerStoreError, records::AppliedDiscountRecord};

#[automock]
#[async_trait]
pub trait PoolStore: Send + Sync {
    /// Selectable pools for a product: active, funded, with an active supplier.
    async fn candidates_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<PoolCandidate<'static>>, LedgerStoreError>;

    /// Overwrite a pool's remaining balance, in minor units.
    async fn set_remaining(&self, pool: PoolUuid, remaining: i64) -> Result<(), LedgerStoreError>;
}

#[automock]
#[async_trait]
pub trait AppliedDiscountStore: Send + Sync {
    /// Append an audit record.
    async fn append(
        &self,
        record: NewAppliedDiscount<'static>,
    ) -> Result<AppliedDiscountRecord, LedgerStoreError>;
}

#[automock]
#[async_trait]
pub trait OrderMetaStore: Send + Sync {
    /// Read an order metadata value.
    async fn get(&self, order: OrderUuid, field: &str) -> Result<Option<String>, LedgerStoreError>;

    /// Write an order metadata value, replacing any previous one.
    async fn set(&self, order: OrderUuid, field: &str, value: &str)
    -> Result<(), LedgerStoreError>;
}
