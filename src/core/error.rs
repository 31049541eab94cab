use thiserror::Error;

/// Checklist catalog misconfiguration, detected once at construction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// The catalog has no items.
    #[error("catalog must contain at least one item")]
    Empty,

    /// Item numbers start at 1.
    #[error("item number must be at least 1 (item '{description}')")]
    InvalidItemNumber { description: String },

    /// Two items share a number.
    #[error("duplicate item number {0}")]
    DuplicateItemNumber(u32),

    /// An item reads no record field.
    #[error("item {0} has an empty extracted key")]
    EmptyExtractedKey(u32),

    /// An item has no human-readable description.
    #[error("item {0} has an empty description")]
    EmptyDescription(u32),

    /// Catalog JSON is malformed or does not define every option.
    #[cfg(feature = "json")]
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
