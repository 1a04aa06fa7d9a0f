//! Orders
//!
//! The host platform owns orders; the ledger only sees the parts it needs to
//! commit discounts: the status and the lines.

use std::{fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{products::ProductUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<Order<'static>>;

/// Order metadata field holding the "discounts already committed" flag.
pub const DISCOUNTS_PROCESSED_FIELD: &str = "pool_ledger.discounts_processed";

/// Value stored under [`DISCOUNTS_PROCESSED_FIELD`] once an order is committed.
pub const DISCOUNTS_PROCESSED_VALUE: &str = "1";

/// Order status as reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Awaiting payment
    Pending,

    /// Paid and being fulfilled
    Processing,

    /// Awaiting manual confirmation
    OnHold,

    /// Fulfilled
    Completed,

    /// Cancelled by the store or customer
    Cancelled,

    /// Refunded
    Refunded,

    /// Payment failed
    Failed,
}

impl OrderStatus {
    /// Statuses at which discounts are committed against pools.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Processing | Self::Completed)
    }

    /// Statuses that never commit, however the order got there.
    pub const fn is_void(self) -> bool {
        matches!(self, Self::Cancelled | Self::Refunded | Self::Failed)
    }

    /// Status slug used by the host platform.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown order status slug.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let slug = value.trim().trim_start_matches("wc-").to_ascii_lowercase();

        match slug.as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "on-hold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            "failed" => Ok(Self::Failed),
            _ => Err(UnknownOrderStatus(value.to_string())),
        }
    }
}

/// A product line of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine<'a> {
    /// Product bought
    pub product: ProductUuid,

    /// Units bought
    pub quantity: u32,

    /// Current catalogue price of one unit
    pub unit_price: Money<'a, Currency>,
}

/// Order
#[derive(Debug, Clone, PartialEq)]
pub struct Order<'a> {
    /// Order identifier
    pub uuid: OrderUuid,

    /// Current status
    pub status: OrderStatus,

    /// Product lines
    pub lines: Vec<OrderLine<'a>>,
}
