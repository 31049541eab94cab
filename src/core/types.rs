use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::FieldValue;

/// Regulatory treatment applied to an invoice for supply to an SEZ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionTag {
    /// Supply under bond or LUT, without payment of IGST.
    #[serde(rename = "option_1")]
    Option1,
    /// Supply on payment of IGST.
    #[serde(rename = "option_2")]
    Option2,
    /// Not for authorised operations, or no specific option could be
    /// determined. Always reachable.
    #[serde(rename = "option_3")]
    Option3,
}

impl OptionTag {
    /// All options in declaration order.
    pub const ALL: [OptionTag; 3] = [Self::Option1, Self::Option2, Self::Option3];

    /// Wire name, e.g. `"option_1"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Option1 => "option_1",
            Self::Option2 => "option_2",
            Self::Option3 => "option_3",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "option_1" => Some(Self::Option1),
            "option_2" => Some(Self::Option2),
            "option_3" => Some(Self::Option3),
            _ => None,
        }
    }

    /// Canned report summary for invoices processed under this option.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Option1 => {
                "Invoice processed under Option 1 (WITHOUT IGST, Authorised Operations)."
            }
            Self::Option2 => "Invoice processed under Option 2 (WITH IGST, Authorised Operations).",
            Self::Option3 => {
                "Invoice processed under Option 3 (Not for Authorised operations) or unable to determine a specific authorized option."
            }
        }
    }
}

impl fmt::Display for OptionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Expected shape of a checklist field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    /// ISO 8601 calendar date (`YYYY-MM-DD`), optionally with a time part.
    Date,
    Boolean,
}

/// Per-option rule for one checklist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    pub required: bool,
    #[serde(rename = "type")]
    pub expected_type: FieldType,
    /// Fixed value the field must equal (e.g. tax rate "0%").
    #[serde(rename = "value", default, skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<FieldValue>,
}

impl Rule {
    /// A required field of the given type.
    pub fn required(expected_type: FieldType) -> Self {
        Self {
            required: true,
            expected_type,
            expected_value: None,
        }
    }

    /// A field that is not checked for this option.
    pub fn not_required(expected_type: FieldType) -> Self {
        Self {
            required: false,
            expected_type,
            expected_value: None,
        }
    }

    /// Require the field to equal a fixed value.
    pub fn expecting(mut self, value: impl Into<FieldValue>) -> Self {
        self.expected_value = Some(value.into());
        self
    }
}

/// Rules for every option. A struct rather than a map, so an item cannot
/// omit an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionRules {
    pub option_1: Rule,
    pub option_2: Rule,
    pub option_3: Rule,
}

impl OptionRules {
    pub fn new(option_1: Rule, option_2: Rule, option_3: Rule) -> Self {
        Self {
            option_1,
            option_2,
            option_3,
        }
    }

    /// Same rule for all options.
    pub fn uniform(rule: Rule) -> Self {
        Self {
            option_1: rule.clone(),
            option_2: rule.clone(),
            option_3: rule,
        }
    }

    pub fn get(&self, option: OptionTag) -> &Rule {
        match option {
            OptionTag::Option1 => &self.option_1,
            OptionTag::Option2 => &self.option_2,
            OptionTag::Option3 => &self.option_3,
        }
    }
}

/// One regulatory requirement on the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecklistItem {
    /// Position in the checklist (1-based, unique).
    pub item_number: u32,
    pub description: String,
    /// Record key the item reads.
    pub extracted_key: String,
    pub rules: OptionRules,
}

impl ChecklistItem {
    pub fn new(
        item_number: u32,
        description: impl Into<String>,
        extracted_key: impl Into<String>,
        rules: OptionRules,
    ) -> Self {
        Self {
            item_number,
            description: description.into(),
            extracted_key: extracted_key.into(),
            rules,
        }
    }

    pub fn rule(&self, option: OptionTag) -> &Rule {
        self.rules.get(option)
    }
}

/// Verdict for a single checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Passed,
    Failed,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::NotApplicable => "N/A",
        })
    }
}

/// Overall verdict for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    Accepted,
    Rejected,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        })
    }
}

/// Per-item result of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistOutcome {
    pub item_number: u32,
    pub description: String,
    pub status: ItemStatus,
    /// Diagnostic note; empty for passed items.
    pub notes: String,
    /// Raw record value, echoed for audit. `Null` when the key is absent.
    pub extracted_value: FieldValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_codes_roundtrip() {
        for option in OptionTag::ALL {
            assert_eq!(OptionTag::from_code(option.code()), Some(option));
        }
        assert_eq!(OptionTag::from_code("option_4"), None);
        assert_eq!(OptionTag::Option2.to_string(), "option_2");
    }

    #[test]
    fn rules_lookup_by_option() {
        let rules = OptionRules::new(
            Rule::required(FieldType::String).expecting("0%"),
            Rule::required(FieldType::String),
            Rule::not_required(FieldType::String),
        );
        assert_eq!(
            rules.get(OptionTag::Option1).expected_value,
            Some(FieldValue::from("0%"))
        );
        assert!(rules.get(OptionTag::Option2).required);
        assert!(!rules.get(OptionTag::Option3).required);
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ItemStatus::NotApplicable).unwrap(),
            "\"N/A\""
        );
        assert_eq!(ItemStatus::NotApplicable.to_string(), "N/A");
        assert_eq!(
            serde_json::to_string(&OptionTag::Option3).unwrap(),
            "\"option_3\""
        );
    }
}
