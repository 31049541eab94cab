use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use sezcheck::core::*;

fn option_2_record(n: u32) -> InvoiceRecord {
    InvoiceRecord::new()
        .with("supplier_details", "Acme Exports Pvt Ltd, Chennai, 33AABCA1234F1Z5")
        .with("invoice_number", format!("EXP/24-25/{n:04}"))
        .with("invoice_date", "2024-01-31")
        .with("recipient_details", "Zenith SEZ Unit, Sriperumbudur, 33AACCZ9876K1Z2")
        .with("hsn_sac_code", "8471")
        .with("hsn_description", "Automatic data processing machines")
        .with("quantity", 10)
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
        )
}

fn bench_classify(c: &mut Criterion) {
    let record = option_2_record(1);
    c.bench_function("classify", |b| {
        b.iter(|| black_box(classify(black_box(&record))));
    });
}

fn bench_check_invoice(c: &mut Criterion) {
    let record = option_2_record(1);
    let catalog = ChecklistCatalog::standard();
    c.bench_function("check_invoice", |b| {
        b.iter(|| black_box(check_invoice(black_box(&record), catalog).status()));
    });
}

fn bench_check_100_invoices(c: &mut Criterion) {
    let records: Vec<InvoiceRecord> = (1..=100).map(option_2_record).collect();
    let catalog = ChecklistCatalog::standard();
    c.bench_function("check_100_invoices", |b| {
        b.iter(|| {
            records
                .iter()
                .filter(|r| check_invoice(black_box(r), catalog).is_accepted())
                .count()
        });
    });
}

#[cfg(feature = "fingerprint")]
fn bench_fingerprint(c: &mut Criterion) {
    let record = option_2_record(1);
    c.bench_function("fingerprint", |b| {
        b.iter(|| black_box(sezcheck::fingerprint::fingerprint(black_box(&record))));
    });
}

#[cfg(not(feature = "fingerprint"))]
fn bench_fingerprint(_: &mut Criterion) {}

criterion_group!(
    benches,
    bench_classify,
    bench_check_invoice,
    bench_check_100_invoices,
    bench_fingerprint,
);
criterion_main!(benches);
