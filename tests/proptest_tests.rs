//! Property-based tests for classification, validation, and fingerprints.
//!
//! Run with: `cargo test --features all --test proptest_tests`

use proptest::prelude::*;
use rust_decimal::Decimal;
use sezcheck::core::*;

const KEYS: &[&str] = &[
    "supplier_details",
    "invoice_number",
    "invoice_date",
    "recipient_details",
    "hsn_sac_code",
    "hsn_description",
    "quantity",
    "total_value_of_supply",
    "taxable_value_of_supply",
    "tax_rate",
    "tax_amount_charged",
    "place_of_supply",
    "reverse_charge_applicable",
    "supplier_signature_present",
    "remarks",
];

// ── Proptest Strategies ─────────────────────────────────────────────────────

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("0%".to_string()),
        Just("18%".to_string()),
        Just("2024-01-31".to_string()),
        Just("31-01-2024".to_string()),
        Just(
            "Supply to SEZ for authorised operations under bond or LUT without payment of IGST"
                .to_string()
        ),
        Just("supply to sez for authorised operations on payment of igst".to_string()),
        "[ -~]{0,24}",
    ]
}

fn arb_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        arb_text().prop_map(FieldValue::Text),
        (-100_000i64..100_000i64, 0u32..3u32)
            .prop_map(|(n, scale)| FieldValue::Number(Decimal::new(n, scale))),
        any::<bool>().prop_map(FieldValue::Bool),
    ]
}

/// Records using a random subset of the checklist keys.
fn arb_record() -> impl Strategy<Value = InvoiceRecord> {
    proptest::collection::vec((0..KEYS.len(), arb_value()), 0..KEYS.len() * 2)
        .prop_map(|pairs| pairs.into_iter().map(|(k, v)| (KEYS[k], v)).collect())
}

fn arb_option() -> impl Strategy<Value = OptionTag> {
    prop_oneof![
        Just(OptionTag::Option1),
        Just(OptionTag::Option2),
        Just(OptionTag::Option3),
    ]
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn classify_is_deterministic(record in arb_record()) {
        let first = classify(&record);
        prop_assert!(OptionTag::ALL.contains(&first));
        prop_assert_eq!(first, classify(&record));
    }

    #[test]
    fn status_matches_issues(record in arb_record(), option in arb_option()) {
        let report = validate(&record, option, ChecklistCatalog::standard());
        prop_assert_eq!(report.status() == ReportStatus::Rejected, !report.issues().is_empty());
        prop_assert_eq!(report.failed(), report.issues().len());
        prop_assert_eq!(report.outcomes().len(), ChecklistCatalog::standard().len());
    }

    #[test]
    fn accepted_means_every_required_item_passed(record in arb_record(), option in arb_option()) {
        let catalog = ChecklistCatalog::standard();
        let report = validate(&record, option, catalog);
        let required_passed = catalog
            .iter()
            .zip(report.outcomes())
            .filter(|(item, _)| item.rule(option).required)
            .all(|(_, outcome)| outcome.status == ItemStatus::Passed);
        prop_assert_eq!(report.is_accepted(), required_passed);
    }

    #[test]
    fn not_required_items_are_not_applicable(record in arb_record(), option in arb_option()) {
        let catalog = ChecklistCatalog::standard();
        let report = validate(&record, option, catalog);
        for (item, outcome) in catalog.iter().zip(report.outcomes()) {
            prop_assert_eq!(item.item_number, outcome.item_number);
            if !item.rule(option).required {
                prop_assert_eq!(outcome.status, ItemStatus::NotApplicable);
            }
        }
    }

    #[test]
    fn validation_is_idempotent(record in arb_record()) {
        let catalog = ChecklistCatalog::standard();
        prop_assert_eq!(check_invoice(&record, catalog), check_invoice(&record, catalog));
    }
}

#[cfg(feature = "fingerprint")]
mod fingerprints {
    use super::*;
    use sezcheck::fingerprint::{FINGERPRINT_FIELDS, fingerprint};

    proptest! {
        #[test]
        fn unrelated_fields_do_not_change_fingerprint(
            a in arb_record(),
            noise in arb_value()
        ) {
            let b = a.clone().with("hsn_description", noise.clone()).with("remarks", noise);
            prop_assert_eq!(fingerprint(&a), fingerprint(&b));
        }

        #[test]
        fn key_field_change_changes_fingerprint(
            a in arb_record(),
            field in 0..FINGERPRINT_FIELDS.len(),
            suffix in "[A-Z0-9]{1,6}"
        ) {
            let key = FINGERPRINT_FIELDS[field];
            let current = match a.get(key) {
                None | Some(FieldValue::Null) => String::new(),
                Some(v) => v.to_string(),
            };
            let changed = a.clone().with(key, format!("{}{suffix}", current.trim()));
            prop_assert_ne!(fingerprint(&a), fingerprint(&changed));
        }
    }
}
