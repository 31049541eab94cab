#![no_main]

use libfuzzer_sys::fuzz_target;
use sezcheck::core::{ChecklistCatalog, InvoiceRecord, ReportStatus, check_invoice};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Any flat record must validate without panicking, and the verdict
        // must agree with the issue list.
        if let Ok(record) = InvoiceRecord::from_json(s) {
            let report = check_invoice(&record, ChecklistCatalog::standard());
            assert_eq!(
                report.status() == ReportStatus::Rejected,
                !report.issues().is_empty()
            );
            let _ = sezcheck::fingerprint::fingerprint(&record);
        }
    }
});
