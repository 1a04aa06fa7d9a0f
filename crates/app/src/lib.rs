//! Discount pool ledger application layer: stores, services and configuration.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod logging;

#[cfg(test)]
mod test;
