//! Ledger errors.

use pool_ledger::{ledger::LedgerError, orders::OrderUuid};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Errors raised by ledger stores.
#[derive(Debug, Error)]
pub enum LedgerStoreError {
    #[error("record already exists")]
    AlreadyExists,

    #[error("record not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("quantity {0} does not fit the audit log")]
    QuantityOutOfRange(u32),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for LedgerStoreError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

/// Errors returned by the ledger service.
#[derive(Debug, Error)]
pub enum LedgerServiceError {
    /// The processed flag could not be read, so committing could debit twice.
    #[error("cannot read the processed flag of order {order}")]
    FlagUnavailable {
        order: OrderUuid,

        #[source]
        source: LedgerStoreError,
    },

    #[error(transparent)]
    Pricing(#[from] LedgerError),
}
