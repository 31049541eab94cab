use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::types::{ChecklistOutcome, ItemStatus, OptionTag, ReportStatus};
use super::value::InvoiceRecord;

/// Summary used once a record has been identified as a re-submission.
pub const DUPLICATE_SUMMARY: &str = "Duplicate invoice detected.";

/// Result of validating one record.
///
/// The report borrows the record it was built from. Apart from
/// [`flag_duplicate`](Self::flag_duplicate) it cannot be changed after
/// construction, and `status` is `Rejected` exactly when `issues` is
/// non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport<'a> {
    status: ReportStatus,
    summary: String,
    option_applied: OptionTag,
    #[serde(rename = "checklist_breakdown")]
    outcomes: Vec<ChecklistOutcome>,
    issues: Vec<String>,
    #[serde(rename = "extracted_data")]
    record: &'a InvoiceRecord,
}

impl<'a> ValidationReport<'a> {
    pub(crate) fn new(
        option: OptionTag,
        outcomes: Vec<ChecklistOutcome>,
        record: &'a InvoiceRecord,
    ) -> Self {
        let issues: Vec<String> = outcomes
            .iter()
            .filter(|o| o.status == ItemStatus::Failed)
            .map(|o| o.notes.clone())
            .collect();
        let status = if issues.is_empty() {
            ReportStatus::Accepted
        } else {
            ReportStatus::Rejected
        };
        Self {
            status,
            summary: option.summary().to_string(),
            option_applied: option,
            outcomes,
            issues,
            record,
        }
    }

    pub fn status(&self) -> ReportStatus {
        self.status
    }

    pub fn is_accepted(&self) -> bool {
        self.status == ReportStatus::Accepted
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn option_applied(&self) -> OptionTag {
        self.option_applied
    }

    /// Per-item outcomes in item-number order.
    pub fn outcomes(&self) -> &[ChecklistOutcome] {
        &self.outcomes
    }

    /// One entry per failed item, in checklist order, plus any duplicate
    /// notice appended afterwards.
    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    pub fn record(&self) -> &'a InvoiceRecord {
        self.record
    }

    pub fn outcome(&self, item_number: u32) -> Option<&ChecklistOutcome> {
        self.outcomes.iter().find(|o| o.item_number == item_number)
    }

    pub fn failed_outcomes(&self) -> impl Iterator<Item = &ChecklistOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == ItemStatus::Failed)
    }

    pub fn passed(&self) -> usize {
        self.count(ItemStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(ItemStatus::Failed)
    }

    pub fn not_applicable(&self) -> usize {
        self.count(ItemStatus::NotApplicable)
    }

    fn count(&self, status: ItemStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Mark the record as a re-submission of an invoice first seen at
    /// `first_seen`. Forces `Rejected` and appends a duplicate issue.
    pub fn flag_duplicate(&mut self, fingerprint: &str, first_seen: DateTime<Utc>) {
        self.status = ReportStatus::Rejected;
        self.summary = DUPLICATE_SUMMARY.to_string();
        self.issues.push(format!(
            "This invoice (Hash: {fingerprint}) was previously processed on {}.",
            first_seen.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
}
