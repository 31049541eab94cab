use rust_decimal_macros::dec;
use sezcheck::core::*;

fn main() {
    // An SEZ supply under bond, but the date was extracted in Indian format
    let record = InvoiceRecord::new()
        .with("supplier_details", "Acme Exports Pvt Ltd, Chennai, 33AABCA1234F1Z5")
        .with("invoice_number", "EXP/24-25/0042")
        .with("invoice_date", "31-01-2024")
        .with("recipient_details", "Zenith SEZ Unit, Sriperumbudur, 33AACCZ9876K1Z2")
        .with("hsn_sac_code", "8471")
        .with("hsn_description", "Automatic data processing machines")
        .with("quantity", 10)
        .with("total_value_of_supply", dec!(12500))
        .with("taxable_value_of_supply", dec!(12500))
        .with("tax_rate", "0%")
        .with("tax_amount_charged", 0)
        .with("place_of_supply", "Tamil Nadu (33)")
        .with("reverse_charge_applicable", false)
        .with("supplier_signature_present", true)
        .with(
            "remarks",
            "Supply to SEZ for authorised operations under bond or LUT without payment of IGST",
        );

    let report = check_invoice(&record, ChecklistCatalog::standard());

    println!("Status:  {}", report.status());
    println!("Option:  {}", report.option_applied());
    println!("Summary: {}", report.summary());
    println!(
        "Items:   {} passed, {} failed, {} n/a",
        report.passed(),
        report.failed(),
        report.not_applicable()
    );

    println!("\nChecklist:");
    for outcome in report.outcomes() {
        println!(
            "  {:>2}. [{:<6}] {}: {}",
            outcome.item_number, outcome.status, outcome.description, outcome.notes
        );
    }

    if !report.is_accepted() {
        println!("\nIssues:");
        for issue in report.issues() {
            println!("  - {}", issue);
        }
    }

    // Fix the date and check again
    let fixed = record.with("invoice_date", "2024-01-31");
    let report = check_invoice(&fixed, ChecklistCatalog::standard());
    println!("\nAfter fixing the date: {}", report.status());
}
