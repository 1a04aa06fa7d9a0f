//! Reporting over applied discounts

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::ReportsServiceError;
pub use service::*;
