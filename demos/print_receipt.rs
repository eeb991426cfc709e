//! Print a payment receipt through the spool backend
//! Run with: cargo run -p template --example print_receipt
//!
//! The receipt is projected from a sale and one payment, then printed with
//! the detached strategy. Each "window" becomes a file under output/spool.

use chrono::NaiveDate;
use template::{
    Designer, DocumentKind, DocumentRecord, MemoryTemplateStore, Party, PrintJob, ReceiptRecord,
    RenderOptions, SaleRecord, SessionContext, ShowroomProfile, SpoolBackend, TemplateStore,
    Vehicle,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    println!("=== Print Receipt ===\n");

    let sale = SaleRecord {
        reference: Some("VTE-2026-0042".to_string()),
        client: Party {
            name: Some("Karim Benali".to_string()),
            ..Party::default()
        },
        vehicle: Vehicle {
            make: Some("Renault".to_string()),
            model: Some("Clio".to_string()),
            ..Vehicle::default()
        },
        total_price: 2_350_000.0,
        amount_paid: 1_500_000.0,
        ..SaleRecord::default()
    };
    let mut receipt =
        ReceiptRecord::from_sale_payment(&sale, 850_000.0, NaiveDate::from_ymd_opt(2026, 10, 17));
    receipt.reference = Some("REC-2026-0108".to_string());
    println!(
        "1. Receipt: {} received, {} remaining",
        fr_text::format_money(receipt.amount_received, "DA"),
        fr_text::format_money(receipt.remaining_balance, "DA")
    );

    let session = SessionContext::new();
    session.login("Amina");

    let mut designer = Designer::new(DocumentKind::Receipt);
    designer.set_font_size_base(13.0);
    let mut store = MemoryTemplateStore::new();
    let saved = designer.save_as_template("Reçu compact", &mut store, &session)?;
    println!(
        "2. Saved template {} by {:?} ({} in store)",
        saved.id,
        saved.created_by,
        store.list(Some(DocumentKind::Receipt))?.len()
    );

    let profile = ShowroomProfile::new("Auto Prestige Oran");
    let options = RenderOptions::default();
    let rendered = designer.preview_with(&DocumentRecord::Receipt(receipt), &profile, options.clone());

    let mut backend = SpoolBackend::new("output/spool")?;
    let mut job = PrintJob::detached(&rendered, &options)
        .on_status(|status| println!("   status: {status:?}"));
    let status = job.run(&mut backend);
    println!("3. Print finished: {status:?}");

    for path in backend.printed() {
        println!("   spooled {}", path.display());
    }

    Ok(())
}
