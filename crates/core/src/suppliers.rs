//! Suppliers
//!
//! Suppliers fund discount pools. They are referenced by pools and audit
//! records and can be deactivated, which takes all their pools out of
//! selection without touching balances.

use thiserror::Error;

use crate::uuids::TypedUuid;

/// Supplier UUID
pub type SupplierUuid = TypedUuid<Supplier>;

/// Errors raised while validating supplier details.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SupplierError {
    /// Name was empty after trimming.
    #[error("supplier name is required")]
    MissingName,

    /// Email was present but not a plausible address.
    #[error("invalid supplier email: {0}")]
    InvalidEmail(String),
}

/// Supplier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    /// Supplier identifier
    pub uuid: SupplierUuid,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: Option<String>,

    /// Contact phone
    pub phone: Option<String>,

    /// Inactive suppliers fund no discounts
    pub active: bool,
}

/// Editable supplier details, normalised by [`SupplierDetails::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierDetails {
    /// Display name
    pub name: String,

    /// Contact email
    pub email: Option<String>,

    /// Contact phone
    pub phone: Option<String>,

    /// Whether the supplier is active
    pub active: bool,
}

impl SupplierDetails {
    /// Trim every field, drop blank optional fields and check the name and email.
    ///
    /// # Errors
    ///
    /// - [`SupplierError::MissingName`]: the name is blank.
    /// - [`SupplierError::InvalidEmail`]: the email is present but malformed.
    pub fn validate(self) -> Result<Self, SupplierError> {
        let name = self.name.trim().to_string();

        if name.is_empty() {
            return Err(SupplierError::MissingName);
        }

        let email = non_blank(self.email);

        if let Some(email) = &email
            && !is_plausible_email(email)
        {
            return Err(SupplierError::InvalidEmail(email.clone()));
        }

        Ok(Self {
            name,
            email: email.map(|email| email.to_lowercase()),
            phone: non_blank(self.phone),
            active: self.active,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// A single `@`, a non-empty local part, and a dotted domain with no empty labels.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn details(name: &str, email: Option<&str>) -> SupplierDetails {
        SupplierDetails {
            name: name.to_string(),
            email: email.map(str::to_string),
            phone: Some("  ".to_string()),
            active: true,
        }
    }

    #[test]
    fn validate_trims_and_drops_blank_fields() -> TestResult {
        let validated = details("  Destileria Norte  ", Some(" Ventas@Norte.CL ")).validate()?;

        assert_eq!(validated.name, "Destileria Norte");
        assert_eq!(validated.email.as_deref(), Some("ventas@norte.cl"));
        assert_eq!(validated.phone, None);

        Ok(())
    }

    #[test]
    fn validate_rejects_blank_name() {
        assert_eq!(
            details("   ", None).validate(),
            Err(SupplierError::MissingName)
        );
    }

    #[test]
    fn validate_rejects_malformed_emails() {
        for email in ["nope", "@norte.cl", "ventas@", "ventas@norte", "a@b@c.cl", "a b@c.cl", "a@.cl"] {
            let result = details("Norte", Some(email)).validate();

            assert!(
                matches!(result, Err(SupplierError::InvalidEmail(_))),
                "expected {email} to be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn validate_allows_missing_email() -> TestResult {
        let validated = details("Norte", Some("")).validate()?;

        assert_eq!(validated.email, None);

        Ok(())
    }
}
