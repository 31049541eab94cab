use std::collections::HashSet;
use std::sync::LazyLock;

use serde::Serialize;

use super::error::CatalogError;
use super::types::{ChecklistItem, FieldType, OptionRules, Rule};

/// Ordered, immutable checklist.
///
/// Items are sorted by item number on construction and never change
/// afterwards, so a catalog can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChecklistCatalog {
    items: Vec<ChecklistItem>,
}

static STANDARD: LazyLock<ChecklistCatalog> = LazyLock::new(|| ChecklistCatalog {
    items: standard_items(),
});

impl ChecklistCatalog {
    /// Build a catalog, rejecting misconfigured items.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the list is empty, an item number is 0 or
    /// repeated, or an item has a blank key or description.
    pub fn new(mut items: Vec<ChecklistItem>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for item in &items {
            if item.item_number == 0 {
                return Err(CatalogError::InvalidItemNumber {
                    description: item.description.clone(),
                });
            }
            if !seen.insert(item.item_number) {
                return Err(CatalogError::DuplicateItemNumber(item.item_number));
            }
            if item.extracted_key.trim().is_empty() {
                return Err(CatalogError::EmptyExtractedKey(item.item_number));
            }
            if item.description.trim().is_empty() {
                return Err(CatalogError::EmptyDescription(item.item_number));
            }
        }

        items.sort_by_key(|item| item.item_number);
        tracing::debug!(items = items.len(), "checklist catalog built");
        Ok(Self { items })
    }

    /// The 17-item IGST checklist for supplies to SEZ units.
    pub fn standard() -> &'static ChecklistCatalog {
        &STANDARD
    }

    /// Load a catalog from a JSON array of items.
    ///
    /// Every item must carry rules for `option_1`, `option_2` and
    /// `option_3`; a missing option is a deserialization error.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<ChecklistItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Items in item-number order.
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChecklistItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item by its number.
    pub fn get(&self, item_number: u32) -> Option<&ChecklistItem> {
        self.items
            .binary_search_by_key(&item_number, |item| item.item_number)
            .ok()
            .map(|idx| &self.items[idx])
    }
}

impl<'a> IntoIterator for &'a ChecklistCatalog {
    type Item = &'a ChecklistItem;
    type IntoIter = std::slice::Iter<'a, ChecklistItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn item(number: u32, description: &str, key: &str, rules: OptionRules) -> ChecklistItem {
    ChecklistItem::new(number, description, key, rules)
}

fn required_for_sez(expected_type: FieldType) -> OptionRules {
    OptionRules::new(
        Rule::required(expected_type),
        Rule::required(expected_type),
        Rule::not_required(expected_type),
    )
}

fn always_required(expected_type: FieldType) -> OptionRules {
    OptionRules::uniform(Rule::required(expected_type))
}

fn never_required(expected_type: FieldType) -> OptionRules {
    OptionRules::uniform(Rule::not_required(expected_type))
}

fn standard_items() -> Vec<ChecklistItem> {
    use FieldType::{Boolean, Date, Number, String as Text};

    vec![
        item(
            1,
            "Name, address and GSTIN of supplier",
            "supplier_details",
            required_for_sez(Text),
        ),
        item(
            2,
            "Invoice No - Consecutive Serial Number",
            "invoice_number",
            always_required(Text),
        ),
        item(3, "Invoice Date", "invoice_date", always_required(Date)),
        item(
            4,
            "Name, address and GSTIN of recipient, if recipient registered",
            "recipient_details",
            required_for_sez(Text),
        ),
        item(
            5,
            "Name, address of recipient and the address of delivery (with name of state and code), if recipient not registered",
            "delivery_address_if_unregistered",
            never_required(Text),
        ),
        item(6, "HSN/ SAC Code", "hsn_sac_code", always_required(Text)),
        item(
            7,
            "HSN Code Description Category",
            "hsn_description",
            always_required(Text),
        ),
        item(
            8,
            "Quantity (Unit or Unique Quantity code) in case of goods",
            "quantity",
            always_required(Number),
        ),
        item(
            9,
            "Total Value of supply",
            "total_value_of_supply",
            required_for_sez(Number),
        ),
        item(
            10,
            "Taxable Value of supply",
            "taxable_value_of_supply",
            required_for_sez(Number),
        ),
        // Option 1 is zero-rated; option 2 carries the actual IGST rate.
        item(
            11,
            "Tax rate -- (for supply to SEZ, only IGST is applicable)",
            "tax_rate",
            OptionRules::new(
                Rule::required(Text).expecting("0%"),
                Rule::required(Text),
                Rule::not_required(Text),
            ),
        ),
        item(
            12,
            "Amount of tax charged",
            "tax_amount_charged",
            OptionRules::new(
                Rule::required(Number).expecting(0),
                Rule::required(Number),
                Rule::not_required(Number),
            ),
        ),
        item(
            13,
            "Place of supply - State name and State code",
            "place_of_supply",
            always_required(Text),
        ),
        item(
            14,
            "Address of delivery where different than place of supply",
            "delivery_address_different",
            never_required(Text),
        ),
        item(
            15,
            "Tax payable on reverse charge basis - Yes or No",
            "reverse_charge_applicable",
            always_required(Boolean),
        ),
        item(
            16,
            "Manual Signature or digital signature of supplier or his authorised signatory",
            "supplier_signature_present",
            always_required(Boolean),
        ),
        item(17, "Remarks on Invoice", "remarks", required_for_sez(Text)),
    ]
}
