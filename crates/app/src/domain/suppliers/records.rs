//! Supplier Records

use jiff::Timestamp;
use pool_ledger::suppliers::{Supplier, SupplierUuid};

/// Supplier Record
#[derive(Debug, Clone)]
pub struct SupplierRecord {
    pub uuid: SupplierUuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SupplierRecord> for Supplier {
    fn from(record: SupplierRecord) -> Self {
        Self {
            uuid: record.uuid,
            name: record.name,
            email: record.email,
            phone: record.phone,
            active: record.active,
        }
    }
}
