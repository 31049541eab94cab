//! Option classification for SEZ supply invoices.

use rust_decimal::Decimal;

use super::types::OptionTag;
use super::value::{FieldValue, InvoiceRecord};

/// Remarks prefix for supplies under bond or LUT (option 1).
pub const OPTION_1_REMARKS: &str =
    "supply to sez for authorised operations under bond or lut without payment of igst";

/// Remarks prefix for supplies on payment of IGST (option 2).
pub const OPTION_2_REMARKS: &str = "supply to sez for authorised operations on payment of igst";

/// Option used when no rule matches.
pub const FALLBACK_OPTION: OptionTag = OptionTag::Option3;

/// Content signals the classification rules decide on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    pub has_tax: bool,
    pub option_1_remarks: bool,
    pub option_2_remarks: bool,
}

impl Signals {
    pub fn from_record(record: &InvoiceRecord) -> Self {
        let remarks = normalized_remarks(record);
        Self {
            has_tax: has_tax_signal(record),
            option_1_remarks: remarks.starts_with(OPTION_1_REMARKS),
            option_2_remarks: remarks.starts_with(OPTION_2_REMARKS),
        }
    }
}

/// One step of the classification chain.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub option: OptionTag,
    pub applies: fn(&Signals) -> bool,
}

/// Rules in evaluation order; the first match wins, otherwise
/// [`FALLBACK_OPTION`].
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        option: OptionTag::Option1,
        applies: zero_rated_under_bond,
    },
    ClassificationRule {
        option: OptionTag::Option2,
        applies: taxed_on_payment_of_igst,
    },
];

fn zero_rated_under_bond(s: &Signals) -> bool {
    !s.has_tax && s.option_1_remarks
}

fn taxed_on_payment_of_igst(s: &Signals) -> bool {
    s.has_tax && s.option_2_remarks
}

/// Decide which option applies to a record. Never fails.
pub fn classify(record: &InvoiceRecord) -> OptionTag {
    let signals = Signals::from_record(record);
    let option = CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.applies)(&signals))
        .map_or(FALLBACK_OPTION, |rule| rule.option);
    tracing::debug!(
        option = %option,
        has_tax = signals.has_tax,
        option_1_remarks = signals.option_1_remarks,
        option_2_remarks = signals.option_2_remarks,
        "invoice classified"
    );
    option
}

/// Positive tax amount, or a tax rate other than "0%".
///
/// Absent, null, or non-numeric amounts and absent, null, blank, or
/// non-string rates carry no signal.
pub fn has_tax_signal(record: &InvoiceRecord) -> bool {
    let amount_charged = matches!(
        record.get("tax_amount_charged"),
        Some(FieldValue::Number(n)) if *n > Decimal::ZERO
    );
    let non_zero_rate = match record.get("tax_rate") {
        Some(FieldValue::Text(rate)) => {
            let rate = rate.trim();
            !rate.is_empty() && rate != "0%"
        }
        _ => false,
    };
    amount_charged || non_zero_rate
}

/// Remarks lower-cased and trimmed; empty when absent or not text.
pub fn normalized_remarks(record: &InvoiceRecord) -> String {
    record
        .get("remarks")
        .and_then(FieldValue::as_text)
        .map(|r| r.trim().to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BOND_REMARKS: &str =
        "Supply to SEZ for authorised operations under bond or LUT without payment of IGST";
    const IGST_REMARKS: &str = "Supply to SEZ for authorised operations on payment of IGST";

    #[test]
    fn zero_rated_with_bond_remarks_is_option_1() {
        let record = InvoiceRecord::new()
            .with("tax_amount_charged", 0)
            .with("tax_rate", "0%")
            .with("remarks", BOND_REMARKS);
        assert_eq!(classify(&record), OptionTag::Option1);
    }

    #[test]
    fn taxed_with_igst_remarks_is_option_2() {
        let record = InvoiceRecord::new()
            .with("tax_amount_charged", dec!(450))
            .with("tax_rate", "18%")
            .with("remarks", IGST_REMARKS);
        assert_eq!(classify(&record), OptionTag::Option2);
    }

    #[test]
    fn conflicting_signals_fall_back() {
        // Bond remarks, but IGST was charged.
        let record = InvoiceRecord::new()
            .with("tax_amount_charged", 450)
            .with("remarks", BOND_REMARKS);
        assert_eq!(classify(&record), OptionTag::Option3);

        // IGST remarks, but nothing charged.
        let record = InvoiceRecord::new()
            .with("tax_rate", "0%")
            .with("remarks", IGST_REMARKS);
        assert_eq!(classify(&record), OptionTag::Option3);
    }

    #[test]
    fn empty_record_falls_back() {
        assert_eq!(classify(&InvoiceRecord::new()), OptionTag::Option3);
    }

    #[test]
    fn remarks_are_trimmed_and_case_folded() {
        let padded = format!("   {}  ", BOND_REMARKS.to_uppercase());
        let record = InvoiceRecord::new().with("remarks", padded);
        assert_eq!(normalized_remarks(&record), OPTION_1_REMARKS);
        assert_eq!(classify(&record), OptionTag::Option1);
    }

    #[test]
    fn remarks_prefix_may_be_followed_by_text() {
        let record = InvoiceRecord::new()
            .with("tax_rate", "18%")
            .with("remarks", format!("{IGST_REMARKS}. LUT ARN AD290324000123"));
        assert_eq!(classify(&record), OptionTag::Option2);
    }

    #[test]
    fn tax_signal_sources() {
        assert!(!has_tax_signal(&InvoiceRecord::new()));
        assert!(has_tax_signal(
            &InvoiceRecord::new().with("tax_amount_charged", dec!(0.01))
        ));
        assert!(!has_tax_signal(
            &InvoiceRecord::new().with("tax_amount_charged", "450")
        ));
        assert!(!has_tax_signal(
            &InvoiceRecord::new().with("tax_amount_charged", FieldValue::Null)
        ));
        assert!(has_tax_signal(&InvoiceRecord::new().with("tax_rate", "18%")));
        assert!(!has_tax_signal(&InvoiceRecord::new().with("tax_rate", " 0% ")));
        assert!(!has_tax_signal(&InvoiceRecord::new().with("tax_rate", "  ")));
        assert!(!has_tax_signal(&InvoiceRecord::new().with("tax_rate", 18)));
    }

    #[test]
    fn non_text_remarks_are_ignored() {
        let record = InvoiceRecord::new().with("remarks", true);
        assert_eq!(normalized_remarks(&record), "");
        assert_eq!(classify(&record), OptionTag::Option3);
    }

    #[test]
    fn rules_are_evaluated_in_order() {
        let options: Vec<OptionTag> = CLASSIFICATION_RULES.iter().map(|r| r.option).collect();
        assert_eq!(options, vec![OptionTag::Option1, OptionTag::Option2]);

        let signals = Signals {
            has_tax: false,
            option_1_remarks: true,
            option_2_remarks: false,
        };
        assert!((CLASSIFICATION_RULES[0].applies)(&signals));
        assert!(!(CLASSIFICATION_RULES[1].applies)(&signals));
    }
}
