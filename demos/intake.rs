use rust_decimal_macros::dec;
use sezcheck::core::*;
use sezcheck::fingerprint::MemoryStore;
use sezcheck::intake::*;

/// Prints each report to stdout.
struct Console;

impl Presenter for Console {
    fn present(&self, report: &ValidationReport<'_>) -> Result<(), PresentError> {
        println!("{} ({})", report.status(), report.option_applied());
        println!("  {}", report.summary());
        for issue in report.issues() {
            println!("  - {}", issue);
        }
        Ok(())
    }
}

fn main() -> Result<(), IntakeError> {
    // RUST_LOG=sezcheck=debug shows classification and fingerprint events
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let record = InvoiceRecord::new()
        .with("supplier_details", "Acme Exports Pvt Ltd, Chennai, 33AABCA1234F1Z5")
        .with("invoice_number", "EXP/24-25/0107")
        .with("invoice_date", "2024-04-02")
        .with("recipient_details", "Zenith SEZ Unit, Sriperumbudur, 33AACCZ9876K1Z2")
        .with("hsn_sac_code", "8471")
        .with("hsn_description", "Automatic data processing machines")
        .with("quantity", 5)
        .with("total_value_of_supply", dec!(2950))
        .with("taxable_value_of_supply", dec!(2500))
        .with("tax_rate", "18%")
        .with("tax_amount_charged", dec!(450))
        .with("place_of_supply", "Tamil Nadu (33)")
        .with("reverse_charge_applicable", false)
        .with("supplier_signature_present", true)
        .with(
            "remarks",
            "Supply to SEZ for authorised operations on payment of IGST",
        );

    let store = MemoryStore::new();
    let intake = Intake::new(ChecklistCatalog::standard(), &store, &Console);

    println!("First upload:");
    let first = intake.process(&record, &Submission::new("invoice-0107.pdf").session("demo"))?;
    println!("  -> {:?}\n", first.disposition);

    // The same invoice scanned again under another name
    println!("Second upload:");
    let second = intake.process(&record, &Submission::new("scan_0107.png").session("demo"))?;
    println!("  -> {:?}", second.disposition);
    if let Some(fp) = &second.fingerprint {
        println!("  fingerprint {}", fp);
    }

    Ok(())
}
