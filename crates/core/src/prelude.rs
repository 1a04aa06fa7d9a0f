//! Pool Ledger prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    discounts::{DiscountError, SecondUnitDiscount, eligible_units},
    ledger::{
        LedgerError,
        commit::{Debit, LineCommit, NewAppliedDiscount, plan_line},
        offers::{ProductOffer, product_offers},
        preview::{CartLine, CartPreview, LinePreview, preview_line},
        selection::{PoolSelection, rank_candidates, select_pool},
    },
    orders::{
        DISCOUNTS_PROCESSED_FIELD, DISCOUNTS_PROCESSED_VALUE, Order, OrderLine, OrderStatus,
        OrderUuid,
    },
    pools::{DiscountPool, PoolCandidate, PoolError, PoolUuid},
    products::{Product, ProductUuid},
    suppliers::{Supplier, SupplierDetails, SupplierError, SupplierUuid},
    uuids::TypedUuid,
};
