use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Fingerprint;
use crate::core::InvoiceRecord;

/// Metadata kept for an accepted invoice, keyed by its fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorRecord {
    /// Name of the uploaded file, if known.
    pub filename: Option<String>,
    /// Conversation or batch the invoice arrived in.
    pub session_id: Option<String>,
    /// When the invoice was first accepted.
    pub recorded_at: DateTime<Utc>,
    /// Record as extracted at the time.
    #[serde(rename = "extracted_data")]
    pub record: InvoiceRecord,
}

/// Failure of the persistence layer behind a [`FingerprintStore`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The store cannot be reached.
    #[error("fingerprint store unavailable: {0}")]
    Unavailable(String),

    /// The caller's deadline elapsed before the store answered.
    #[error("fingerprint store timed out")]
    Timeout,

    /// The store answered with an error.
    #[error("fingerprint store error: {0}")]
    Backend(String),
}

/// Persistence capability for fingerprints of accepted invoices.
///
/// Lookups are exact matches on the fingerprint string. Consistency and
/// durability are the implementation's concern.
pub trait FingerprintStore {
    /// `Ok(None)` means not seen before; errors mean the answer is unknown.
    fn get(&self, fingerprint: &Fingerprint) -> Result<Option<PriorRecord>, StoreError>;

    fn put(&self, fingerprint: &Fingerprint, record: PriorRecord) -> Result<(), StoreError>;
}

impl<T: FingerprintStore + ?Sized> FingerprintStore for &T {
    fn get(&self, fingerprint: &Fingerprint) -> Result<Option<PriorRecord>, StoreError> {
        (**self).get(fingerprint)
    }

    fn put(&self, fingerprint: &Fingerprint, record: PriorRecord) -> Result<(), StoreError> {
        (**self).put(fingerprint, record)
    }
}

/// Process-local store. Safe to share between threads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<Fingerprint, PriorRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".into())
}

impl FingerprintStore for MemoryStore {
    fn get(&self, fingerprint: &Fingerprint) -> Result<Option<PriorRecord>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(fingerprint).cloned())
    }

    fn put(&self, fingerprint: &Fingerprint, record: PriorRecord) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(fingerprint.clone(), record);
        Ok(())
    }
}
