//! Duplicate detection by content fingerprint.
//!
//! A fingerprint is the SHA-256 digest of the invoice number, invoice date,
//! and total value of supply. Two records agreeing on those three fields
//! share a fingerprint no matter what else differs.
//!
//! # Example
//!
//! ```
//! use sezcheck::core::InvoiceRecord;
//! use sezcheck::fingerprint::*;
//!
//! let store = MemoryStore::new();
//! let record = InvoiceRecord::new()
//!     .with("invoice_number", "EXP/24-25/0042")
//!     .with("invoice_date", "2024-01-31")
//!     .with("total_value_of_supply", 12500);
//!
//! let fp = fingerprint(&record);
//! assert_eq!(fp.as_str().len(), 64);
//! assert!(is_duplicate(&fp, &store).unwrap().is_none());
//! ```

mod store;

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::{FieldValue, InvoiceRecord};

pub use store::{FingerprintStore, MemoryStore, PriorRecord, StoreError};

/// Record keys the fingerprint is computed from, in digest order.
pub const FINGERPRINT_FIELDS: [&str; 3] =
    ["invoice_number", "invoice_date", "total_value_of_supply"];

/// Joins the normalized fields before hashing.
pub const SEPARATOR: &str = "-";

/// Lowercase hex SHA-256 digest identifying an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compute the fingerprint of a record. Pure.
///
/// Each field is string-cast and trimmed; absent or null fields become the
/// empty string.
pub fn fingerprint(record: &InvoiceRecord) -> Fingerprint {
    let key = FINGERPRINT_FIELDS
        .iter()
        .map(|field| normalized(record, field))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let digest = hex::encode(Sha256::digest(key.as_bytes()));
    tracing::debug!(fingerprint = %digest, "invoice fingerprint computed");
    Fingerprint(digest)
}

fn normalized(record: &InvoiceRecord, field: &str) -> String {
    match record.get(field) {
        None | Some(FieldValue::Null) => String::new(),
        Some(value) => value.to_string().trim().to_string(),
    }
}

/// Look up an earlier submission with the same fingerprint.
///
/// # Errors
///
/// A failing store is reported as [`StoreError`], never as "not a
/// duplicate".
pub fn is_duplicate<S: FingerprintStore + ?Sized>(
    fingerprint: &Fingerprint,
    store: &S,
) -> Result<Option<PriorRecord>, StoreError> {
    match store.get(fingerprint) {
        Ok(Some(prior)) => {
            tracing::warn!(
                fingerprint = %fingerprint,
                first_seen = %prior.recorded_at,
                "duplicate invoice"
            );
            Ok(Some(prior))
        }
        Ok(None) => Ok(None),
        Err(e) => {
            tracing::warn!(fingerprint = %fingerprint, error = %e, "duplicate lookup failed");
            Err(e)
        }
    }
}
