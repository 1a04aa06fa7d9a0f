//! Ledger service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use pool_ledger::{
    discounts::eligible_units,
    ledger::{
        LedgerError,
        commit::plan_line,
        preview::{self, CartLine, CartPreview, LinePreview},
    },
    orders::{
        DISCOUNTS_PROCESSED_FIELD, DISCOUNTS_PROCESSED_VALUE, Order, OrderLine, OrderStatus,
        OrderUuid,
    },
    products::ProductUuid,
};
use rusty_money::{MoneyError, iso::Currency};
use smallvec::SmallVec;
use tracing::{Span, error, info, warn};

use crate::domain::ledger::{
    errors::LedgerServiceError,
    records::AppliedDiscountRecord,
    store::{AppliedDiscountStore, OrderMetaStore, PoolStore},
};

/// Why an order line was committed without a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than two units
    SingleUnit,

    /// More units than the audit log can record
    QuantityOutOfRange,

    /// No pool could fund the whole line discount
    NoFundedPool,

    /// Pools could not be loaded
    PoolsUnavailable,

    /// Pool selection failed, e.g. a pool held in another currency
    SelectionFailed,

    /// The pool balance could not be written; no audit record exists
    DebitFailed,

    /// The pool was debited but the audit record could not be written
    AuditWriteFailed,
}

/// An order line committed without a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedLine {
    pub product: ProductUuid,
    pub reason: SkipReason,
}

/// What committing an order's lines did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitReport {
    /// Audit records written, in line order
    pub applied: SmallVec<[AppliedDiscountRecord; 4]>,

    /// Lines left undiscounted
    pub skipped: Vec<SkippedLine>,

    /// Whether the processed flag was written
    pub marked: bool,
}

/// Result of asking the ledger to commit an order.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Order is not in a final status; nothing was read or written.
    NotFinal(OrderStatus),

    /// The processed flag was already set.
    AlreadyProcessed,

    /// Lines were committed and the order marked.
    Committed(CommitReport),
}

/// Ledger service over injected stores.
#[derive(Clone)]
pub struct PoolLedger {
    pools: Arc<dyn PoolStore>,
    applied: Arc<dyn AppliedDiscountStore>,
    meta: Arc<dyn OrderMetaStore>,
    currency: &'static Currency,
}

impl PoolLedger {
    #[must_use]
    pub fn new(
        pools: Arc<dyn PoolStore>,
        applied: Arc<dyn AppliedDiscountStore>,
        meta: Arc<dyn OrderMetaStore>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            pools,
            applied,
            meta,
            currency,
        }
    }

    async fn price_line(&self, line: CartLine<'static>) -> Result<LinePreview<'static>, LedgerError> {
        let currency = line.unit_price.currency();

        if currency != self.currency {
            return Err(LedgerError::Money(MoneyError::CurrencyMismatch {
                expected: self.currency.iso_alpha_code,
                actual: currency.iso_alpha_code,
            }));
        }

        if eligible_units(line.quantity) == 0 {
            return preview::preview_line(line, &[]);
        }

        let candidates = match self.pools.candidates_for_product(line.product).await {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(product_uuid = %line.product, %error, "pools unavailable, pricing line without discount");

                return preview::preview_line(line, &[]);
            }
        };

        match preview::preview_line(line.clone(), &candidates) {
            Ok(preview) => Ok(preview),
            Err(error) => {
                warn!(product_uuid = %line.product, %error, "pool selection failed, pricing line without discount");

                preview::preview_line(line, &[])
            }
        }
    }

    async fn commit_line(
        &self,
        order: OrderUuid,
        line: &OrderLine<'static>,
    ) -> Result<AppliedDiscountRecord, SkipReason> {
        if eligible_units(line.quantity) == 0 {
            return Err(SkipReason::SingleUnit);
        }

        if i32::try_from(line.quantity).is_err() {
            error!(product_uuid = %line.product, quantity = line.quantity, "quantity does not fit the audit log");

            return Err(SkipReason::QuantityOutOfRange);
        }

        let candidates = self
            .pools
            .candidates_for_product(line.product)
            .await
            .map_err(|error| {
                error!(product_uuid = %line.product, %error, "failed to load discount pools");

                SkipReason::PoolsUnavailable
            })?;

        let commit = plan_line(order, line, &candidates)
            .map_err(|error| {
                error!(product_uuid = %line.product, %error, "pool selection failed");

                SkipReason::SelectionFailed
            })?
            .ok_or(SkipReason::NoFundedPool)?;

        self.pools
            .set_remaining(commit.debit.pool, commit.debit.remaining.to_minor_units())
            .await
            .map_err(|error| {
                error!(pool_uuid = %commit.debit.pool, %error, "failed to debit discount pool");

                SkipReason::DebitFailed
            })?;

        let record = self.applied.append(commit.record).await.map_err(|error| {
            error!(
                pool_uuid = %commit.debit.pool,
                amount = commit.debit.amount.to_minor_units(),
                %error,
                "pool debited but applied discount was not recorded"
            );

            SkipReason::AuditWriteFailed
        })?;

        info!(
            pool_uuid = %record.pool_uuid,
            amount = record.amount,
            remaining = record.remaining_amount,
            "debited discount pool"
        );

        Ok(record)
    }
}

#[async_trait]
impl LedgerService for PoolLedger {
    #[tracing::instrument(
        name = "ledger.service.preview_cart",
        skip(self, lines),
        fields(line_count = lines.len(), discounted = tracing::field::Empty),
        err
    )]
    async fn preview_cart(
        &self,
        lines: Vec<CartLine<'static>>,
    ) -> Result<CartPreview<'static>, LedgerServiceError> {
        let mut previews = Vec::with_capacity(lines.len());

        for line in lines {
            previews.push(self.price_line(line).await?);
        }

        let preview = CartPreview::new(self.currency, previews);

        Span::current().record("discounted", preview.discounted_lines().count());

        Ok(preview)
    }

    #[tracing::instrument(
        name = "ledger.service.commit_order",
        skip(self, order),
        fields(
            order_uuid = %order.uuid,
            status = %order.status,
            applied = tracing::field::Empty,
        ),
        err
    )]
    async fn commit_order(&self, order: Order<'static>) -> Result<CommitOutcome, LedgerServiceError> {
        if !order.status.is_final() {
            if order.status.is_void() {
                info!("order is void, discounts will never be committed");
            } else {
                info!("order is not final, discounts left uncommitted");
            }

            return Ok(CommitOutcome::NotFinal(order.status));
        }

        let flag = self
            .meta
            .get(order.uuid, DISCOUNTS_PROCESSED_FIELD)
            .await
            .map_err(|source| LedgerServiceError::FlagUnavailable {
                order: order.uuid,
                source,
            })?;

        if flag.as_deref() == Some(DISCOUNTS_PROCESSED_VALUE) {
            info!("order discounts already processed");

            return Ok(CommitOutcome::AlreadyProcessed);
        }

        let mut report = CommitReport::default();

        for line in &order.lines {
            match self.commit_line(order.uuid, line).await {
                Ok(record) => report.applied.push(record),
                Err(reason) => report.skipped.push(SkippedLine {
                    product: line.product,
                    reason,
                }),
            }
        }

        report.marked = match self
            .meta
            .set(order.uuid, DISCOUNTS_PROCESSED_FIELD, DISCOUNTS_PROCESSED_VALUE)
            .await
        {
            Ok(()) => true,
            Err(error) => {
                error!(%error, "failed to mark order discounts as processed");

                false
            }
        };

        Span::current().record("applied", report.applied.len());

        info!(
            skipped = report.skipped.len(),
            marked = report.marked,
            "committed order discounts"
        );

        Ok(CommitOutcome::Committed(report))
    }
}

#[automock]
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Price cart lines against current pool balances without changing them.
    async fn preview_cart(
        &self,
        lines: Vec<CartLine<'static>>,
    ) -> Result<CartPreview<'static>, LedgerServiceError>;

    /// Debit pools for a finalised order, once.
    async fn commit_order(&self, order: Order<'static>) -> Result<CommitOutcome, LedgerServiceError>;
}
