//! Reports service errors.

use jiff::civil::Date;
use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error("report range starts on {from} after it ends on {to}")]
    InvalidDateRange { from: Date, to: Date },

    #[error("invalid report date")]
    InvalidDate(#[from] jiff::Error),

    #[error("not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ReportsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
