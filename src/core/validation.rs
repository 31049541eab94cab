use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::catalog::ChecklistCatalog;
use super::classify::classify;
use super::report::ValidationReport;
use super::types::{ChecklistItem, ChecklistOutcome, FieldType, ItemStatus, OptionTag, Rule};
use super::value::{FieldValue, InvoiceRecord};

/// Note attached to items the option does not require.
pub const NOT_REQUIRED_NOTE: &str = "Not required for this option.";

/// Classify a record and validate it under the resulting option.
pub fn check_invoice<'a>(
    record: &'a InvoiceRecord,
    catalog: &ChecklistCatalog,
) -> ValidationReport<'a> {
    validate(record, classify(record), catalog)
}

/// Validate a record against every catalog item under `option`.
///
/// Malformed input never fails the call: every anomaly becomes a failed
/// outcome with a descriptive note.
pub fn validate<'a>(
    record: &'a InvoiceRecord,
    option: OptionTag,
    catalog: &ChecklistCatalog,
) -> ValidationReport<'a> {
    let outcomes: Vec<ChecklistOutcome> = catalog
        .iter()
        .map(|item| check_item(item, item.rule(option), record.get(&item.extracted_key)))
        .collect();

    let report = ValidationReport::new(option, outcomes, record);
    tracing::info!(
        option = %option,
        status = %report.status(),
        passed = report.passed(),
        failed = report.failed(),
        "checklist validated"
    );
    report
}

/// Evaluate one item.
///
/// The type check runs before the fixed-value check. Both may fail, in
/// which case the fixed-value note replaces the type note.
pub fn check_item(
    item: &ChecklistItem,
    rule: &Rule,
    value: Option<&FieldValue>,
) -> ChecklistOutcome {
    let extracted_value = value.cloned().unwrap_or_default();

    if !rule.required {
        return outcome(item, ItemStatus::NotApplicable, NOT_REQUIRED_NOTE, extracted_value);
    }

    let Some(value) = value.filter(|v| !v.is_missing()) else {
        let note = format!("Missing required field: '{}'.", item.description);
        tracing::debug!(item = item.item_number, "{note}");
        return outcome(item, ItemStatus::Failed, note, extracted_value);
    };

    let mut failure = check_type(rule.expected_type, value).err().map(|expected| {
        match rule.expected_type {
            FieldType::Date => format!(
                "Invalid date format for '{}'. Expected {expected}.",
                item.description
            ),
            _ => format!(
                "Invalid type for '{}'. Expected {expected}.",
                item.description
            ),
        }
    });

    if let Some(expected) = &rule.expected_value {
        if !matches_fixed_value(value, expected) {
            failure = Some(format!(
                "Value for '{}' is '{value}', expected '{expected}'.",
                item.description
            ));
        }
    }

    match failure {
        Some(note) => {
            tracing::debug!(item = item.item_number, "{note}");
            outcome(item, ItemStatus::Failed, note, extracted_value)
        }
        None => outcome(item, ItemStatus::Passed, String::new(), extracted_value),
    }
}

/// Check a present value against the expected type. On mismatch returns
/// the expectation wording used in the failure note.
pub fn check_type(expected: FieldType, value: &FieldValue) -> Result<(), &'static str> {
    match expected {
        FieldType::String => Ok(()),
        FieldType::Number if is_number(value) => Ok(()),
        FieldType::Date if value.as_text().is_some_and(is_iso_date) => Ok(()),
        FieldType::Boolean if matches!(value, FieldValue::Bool(_)) => Ok(()),
        FieldType::Number => Err("number"),
        FieldType::Date => Err("YYYY-MM-DD"),
        FieldType::Boolean => Err("boolean (true/false)"),
    }
}

/// Numbers, or text that parses as a floating-point number.
fn is_number(value: &FieldValue) -> bool {
    match value {
        FieldValue::Number(_) => true,
        FieldValue::Text(s) => s.trim().parse::<f64>().is_ok(),
        FieldValue::Null | FieldValue::Bool(_) => false,
    }
}

/// ISO 8601 calendar date, optionally followed by a time and offset.
/// A trailing `Z` is read as `+00:00`.
pub fn is_iso_date(s: &str) -> bool {
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    if !has_iso_date_shape(s) {
        return false;
    }

    let normalized = match s.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };
    let s = normalized.as_str();

    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(s).is_ok()
        || DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%:z").is_ok()
        || DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z").is_ok()
        || NAIVE_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
}

/// `YYYY-MM-DD` with zero-padded ASCII digits, optionally followed by a
/// `T` or space separated time. chrono alone accepts signs, padding
/// whitespace and single-digit fields.
fn has_iso_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 10 {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| b[range].iter().all(u8::is_ascii_digit);
    digits(0..4)
        && b[4] == b'-'
        && digits(5..7)
        && b[7] == b'-'
        && digits(8..10)
        && matches!(b.get(10), None | Some(b'T' | b' '))
}

/// Case-insensitive comparison of the trimmed display forms.
pub fn matches_fixed_value(value: &FieldValue, expected: &FieldValue) -> bool {
    let normalize = |v: &FieldValue| v.to_string().trim().to_lowercase();
    normalize(value) == normalize(expected)
}

fn outcome(
    item: &ChecklistItem,
    status: ItemStatus,
    notes: impl Into<String>,
    extracted_value: FieldValue,
) -> ChecklistOutcome {
    ChecklistOutcome {
        item_number: item.item_number,
        description: item.description.clone(),
        status,
        notes: notes.into(),
        extracted_value,
    }
}
