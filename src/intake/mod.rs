//! End-to-end handling of one submitted invoice.
//!
//! [`Intake`] wires the pure engine to the external capabilities: it
//! classifies and validates a record, checks the fingerprint store for an
//! earlier submission, hands the report to a [`Presenter`], and records
//! accepted invoices so later re-submissions are caught.
//!
//! The report is always complete before the store is consulted. A failing
//! store surfaces as [`IntakeError::Store`] and the report is not presented.

use chrono::Utc;
use thiserror::Error;

use crate::core::{ChecklistCatalog, InvoiceRecord, ValidationReport, check_invoice};
use crate::fingerprint::{Fingerprint, FingerprintStore, PriorRecord, StoreError};

/// Turns raw document text into a flat record.
pub trait Extractor {
    fn extract(&self, text: &str) -> Result<InvoiceRecord, ExtractionError>;
}

/// Consumes finished reports, e.g. to render them for a user.
pub trait Presenter {
    fn present(&self, report: &ValidationReport<'_>) -> Result<(), PresentError>;
}

/// Extraction failure reported by an [`Extractor`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    /// The document contained no readable text.
    #[error("no readable text in document")]
    NoText,

    /// The extractor produced something other than a flat record.
    #[error("malformed extraction result: {0}")]
    Malformed(String),

    /// The extraction service failed.
    #[error("extraction backend error: {0}")]
    Backend(String),
}

/// Failure reported by a [`Presenter`].
#[derive(Debug, Error)]
#[error("presenter error: {0}")]
pub struct PresentError(pub String);

/// Errors that stop a submission from being processed.
///
/// None of these mean the invoice was rejected; they mean no reliable
/// verdict could be delivered.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IntakeError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Present(#[from] PresentError),
}

/// Where an invoice came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub filename: Option<String>,
    pub session_id: Option<String>,
}

impl Submission {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            session_id: None,
        }
    }

    pub fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// How a processed submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Accepted and recorded in the store.
    Accepted,
    /// Failed one or more checklist items.
    Rejected,
    /// Matches an earlier submission; forced to rejected.
    Duplicate,
}

/// Result of [`Intake::process`].
#[derive(Debug, Clone)]
pub struct IntakeOutcome<'r> {
    pub report: ValidationReport<'r>,
    /// `None` for an empty record, which is never fingerprinted.
    pub fingerprint: Option<Fingerprint>,
    pub disposition: Disposition,
}

/// Processes submissions against one catalog, store, and presenter.
pub struct Intake<'a, S: ?Sized, P: ?Sized> {
    catalog: &'a ChecklistCatalog,
    store: &'a S,
    presenter: &'a P,
}

impl<'a, S, P> Intake<'a, S, P>
where
    S: FingerprintStore + ?Sized,
    P: Presenter + ?Sized,
{
    pub fn new(catalog: &'a ChecklistCatalog, store: &'a S, presenter: &'a P) -> Self {
        Self {
            catalog,
            store,
            presenter,
        }
    }

    /// Run an extractor over document text.
    ///
    /// # Errors
    ///
    /// [`ExtractionError::NoText`] for blank text; otherwise whatever the
    /// extractor reports.
    pub fn extract<E: Extractor + ?Sized>(
        &self,
        extractor: &E,
        text: &str,
    ) -> Result<InvoiceRecord, IntakeError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::NoText.into());
        }
        Ok(extractor.extract(text)?)
    }

    /// Validate, de-duplicate, present, and record one invoice.
    ///
    /// # Errors
    ///
    /// Store and presenter failures. A store failure during the duplicate
    /// lookup aborts before anything is presented or recorded.
    pub fn process<'r>(
        &self,
        record: &'r InvoiceRecord,
        submission: &Submission,
    ) -> Result<IntakeOutcome<'r>, IntakeError> {
        let mut report = check_invoice(record, self.catalog);

        let fingerprint = (!record.is_empty()).then(|| crate::fingerprint::fingerprint(record));

        if let Some(fp) = &fingerprint {
            if let Some(prior) = crate::fingerprint::is_duplicate(fp, self.store)? {
                report.flag_duplicate(fp.as_str(), prior.recorded_at);
                self.presenter.present(&report)?;
                return Ok(IntakeOutcome {
                    report,
                    fingerprint,
                    disposition: Disposition::Duplicate,
                });
            }
        }

        self.presenter.present(&report)?;

        let disposition = if report.is_accepted() {
            if let Some(fp) = &fingerprint {
                self.store.put(
                    fp,
                    PriorRecord {
                        filename: submission.filename.clone(),
                        session_id: submission.session_id.clone(),
                        recorded_at: Utc::now(),
                        record: record.clone(),
                    },
                )?;
                tracing::info!(
                    fingerprint = %fp,
                    filename = submission.filename.as_deref().unwrap_or(""),
                    "accepted invoice recorded"
                );
            }
            Disposition::Accepted
        } else {
            Disposition::Rejected
        };

        Ok(IntakeOutcome {
            report,
            fingerprint,
            disposition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReportStatus;
    use crate::fingerprint::MemoryStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<ReportStatus>>);

    impl Presenter for Collect {
        fn present(&self, report: &ValidationReport<'_>) -> Result<(), PresentError> {
            self.0
                .lock()
                .map_err(|e| PresentError(e.to_string()))?
                .push(report.status());
            Ok(())
        }
    }

    struct Fixed(InvoiceRecord);

    impl Extractor for Fixed {
        fn extract(&self, _text: &str) -> Result<InvoiceRecord, ExtractionError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn blank_text_is_not_extracted() {
        let store = MemoryStore::new();
        let presenter = Collect::default();
        let intake = Intake::new(ChecklistCatalog::standard(), &store, &presenter);
        let extractor = Fixed(InvoiceRecord::new());

        let err = intake.extract(&extractor, "  \n").unwrap_err();
        assert!(matches!(err, IntakeError::Extraction(ExtractionError::NoText)));
        assert!(intake.extract(&extractor, "INVOICE").is_ok());
    }

    #[test]
    fn empty_record_is_rejected_without_fingerprint() {
        let store = MemoryStore::new();
        let presenter = Collect::default();
        let intake = Intake::new(ChecklistCatalog::standard(), &store, &presenter);

        let record = InvoiceRecord::new();
        let outcome = intake.process(&record, &Submission::default()).unwrap();
        assert_eq!(outcome.disposition, Disposition::Rejected);
        assert!(outcome.fingerprint.is_none());
        assert!(store.is_empty());
        assert_eq!(*presenter.0.lock().unwrap(), vec![ReportStatus::Rejected]);
    }

    #[test]
    fn rejected_invoices_are_not_recorded() {
        let store = MemoryStore::new();
        let presenter = Collect::default();
        let intake = Intake::new(ChecklistCatalog::standard(), &store, &presenter);

        let record = InvoiceRecord::new().with("invoice_number", "INV-1");
        let outcome = intake.process(&record, &Submission::new("a.pdf")).unwrap();
        assert_eq!(outcome.disposition, Disposition::Rejected);
        assert!(outcome.fingerprint.is_some());
        assert!(store.is_empty());
    }
}
