//! Checklist catalog, option classification, and validation.
//!
//! This module provides the pure engine: a flat [`InvoiceRecord`] is
//! classified into an [`OptionTag`] and validated against a
//! [`ChecklistCatalog`], producing a [`ValidationReport`].

mod catalog;
mod classify;
mod error;
mod report;
mod types;
mod validation;
mod value;

pub use catalog::*;
pub use classify::{
    CLASSIFICATION_RULES, ClassificationRule, FALLBACK_OPTION, OPTION_1_REMARKS, OPTION_2_REMARKS,
    Signals, classify, has_tax_signal, normalized_remarks,
};
pub use error::*;
pub use report::*;
pub use types::*;
pub use validation::*;
pub use value::*;
