//! # sezcheck
//!
//! Checklist engine for GST tax invoices covering supplies to Special
//! Economic Zone (SEZ) units. A flat record extracted from an invoice is
//! classified into one of three IGST options, validated against the
//! option's checklist, and fingerprinted to catch re-submissions.
//!
//! Extraction (OCR, language models), persistence, and presentation are
//! external; the crate defines the traits they plug into.
//!
//! ## Quick Start
//!
//! ```rust
//! use sezcheck::core::*;
//!
//! let record = InvoiceRecord::new()
//!     .with("supplier_details", "Acme Exports Pvt Ltd, Chennai, 33AABCA1234F1Z5")
//!     .with("invoice_number", "EXP/24-25/0042")
//!     .with("invoice_date", "2024-01-31")
//!     .with("recipient_details", "Zenith SEZ Unit, Sriperumbudur, 33AACCZ9876K1Z2")
//!     .with("hsn_sac_code", "8471")
//!     .with("hsn_description", "Data processing machines")
//!     .with("quantity", 10)
//!     .with("total_value_of_supply", 12500)
//!     .with("taxable_value_of_supply", 12500)
//!     .with("tax_rate", "0%")
//!     .with("tax_amount_charged", 0)
//!     .with("place_of_supply", "Tamil Nadu (33)")
//!     .with("reverse_charge_applicable", false)
//!     .with("supplier_signature_present", true)
//!     .with("remarks", "Supply to SEZ for authorised operations under bond or LUT without payment of IGST");
//!
//! let report = check_invoice(&record, ChecklistCatalog::standard());
//! assert_eq!(report.option_applied(), OptionTag::Option1);
//! assert_eq!(report.status(), ReportStatus::Accepted);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Catalog, classification, validation, reports |
//! | `fingerprint` | SHA-256 fingerprints, store trait, intake pipeline |
//! | `json` | Load catalogs and records from JSON |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "fingerprint")]
pub mod fingerprint;

#[cfg(feature = "fingerprint")]
pub mod intake;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
