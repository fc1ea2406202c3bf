//! Document identity for deduplication.

use crate::models::record::InvoiceFields;

/// Deduplication key of an invoice record.
///
/// Two successfully-extracted records with the same invoice code and
/// number represent the same invoice. A failed record carries
/// `NoIdentity`, which never compares equal to anything, its own kind
/// included, so failed records can never collide with each other on an
/// empty key.
#[derive(Debug, Clone)]
pub enum Identity {
    /// Invoice code + invoice number, empty string for a missing component.
    Key(String),
    /// Extraction failed; the record belongs to the failed bucket.
    NoIdentity,
}

impl Identity {
    /// Compute the identity for a set of extracted fields.
    pub fn of(fields: &InvoiceFields, extraction_succeeded: bool) -> Self {
        if !extraction_succeeded {
            return Identity::NoIdentity;
        }
        let code = fields.code.as_deref().unwrap_or("");
        let number = fields.number.as_deref().unwrap_or("");
        Identity::Key(format!("{code}{number}"))
    }

    /// The grouping key, or `None` for a failed record.
    pub fn key(&self) -> Option<&str> {
        match self {
            Identity::Key(key) => Some(key),
            Identity::NoIdentity => None,
        }
    }
}

// NaN-like equality: NoIdentity != NoIdentity, so Eq is deliberately
// not implemented.
impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Identity::Key(a), Identity::Key(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(code: &str, number: &str) -> InvoiceFields {
        InvoiceFields {
            code: Some(code.to_string()),
            number: Some(number.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn identity_is_code_then_number() {
        let identity = Identity::of(&fields("044031900111", "12345678"), true);
        assert_eq!(identity.key(), Some("04403190011112345678"));
    }

    #[test]
    fn identity_is_pure() {
        let a = Identity::of(&fields("044031900111", "12345678"), true);
        let b = Identity::of(&fields("044031900111", "12345678"), true);
        assert!(a == b);
    }

    #[test]
    fn missing_component_becomes_empty_string() {
        let f = InvoiceFields {
            number: Some("12345678".to_string()),
            ..Default::default()
        };
        let identity = Identity::of(&f, true);
        assert_eq!(identity.key(), Some("12345678"));
    }

    #[test]
    fn failed_records_never_share_identity() {
        let a = Identity::of(&fields("044031900111", "12345678"), false);
        let b = Identity::of(&fields("044031900111", "12345678"), false);
        assert!(a.key().is_none());
        assert!(a != b);
        assert!(a != Identity::Key("04403190011112345678".to_string()));
    }
}
