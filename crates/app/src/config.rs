//! Ledger configuration

use clap::{Args, ValueEnum};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Errors raised while interpreting configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("amount {0} cannot be represented in minor units")]
    InvalidAmount(Decimal),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human readable, one line per event
    #[default]
    Compact,

    /// One JSON object per event
    Json,
}

/// Settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct LedgerConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    pub database_url: Option<String>,

    /// ISO 4217 code of the store currency
    #[arg(long, env = "LEDGER_CURRENCY", default_value = "USD", global = true)]
    pub currency: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t, global = true)]
    pub log_format: LogFormat,
}

impl LedgerConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the code is not an ISO 4217 currency.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        resolve_currency(&self.currency)
    }
}

/// Look up an ISO 4217 currency by code, ignoring case.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] if no currency matches.
pub fn resolve_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    iso::find(&code.trim().to_ascii_uppercase())
        .ok_or_else(|| ConfigError::UnknownCurrency(code.to_string()))
}

/// Convert a major-unit amount such as `12.50` into minor units.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidAmount`] if the amount does not fit in `i64` minor units.
pub fn to_minor_units(amount: Decimal, currency: &Currency) -> Result<i64, ConfigError> {
    Decimal::from(10_i64.pow(currency.exponent))
        .checked_mul(amount)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_i64())
        .ok_or(ConfigError::InvalidAmount(amount))
}

/// Format minor units for display, e.g. `$12.50`.
pub fn format_minor(minor: i64, currency: &Currency) -> String {
    Money::from_minor(minor, currency).to_string()
}
