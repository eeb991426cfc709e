//! Render a sale invoice with a customized design
//! Run with: cargo run -p template --example render_invoice
//!
//! Writes output/invoice.html (self-contained, ready to print) and
//! output/invoice-design.json (the edited design).

use std::fs;
use template::{
    design_to_json, parse_record, ColorToken, Designer, DocumentKind, LabelKey, RenderOptions,
    ShowroomProfile,
};

const SALE: &str = r#"{
    "kind": "sale",
    "reference": "VTE-2026-0042",
    "date": "2026-10-17",
    "client": { "name": "Karim Benali", "phone": "0555 12 34 56", "address": "Oran" },
    "vehicle": { "make": "Renault", "model": "Clio", "year": 2021, "plate": "01234-121-31", "mileage": 48000 },
    "totalPrice": 2350000,
    "amountPaid": 1500000,
    "paymentMethod": "Virement"
}"#;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Render Invoice ===\n");
    fs::create_dir_all("output")?;

    let mut profile = ShowroomProfile::new("Auto Prestige Oran");
    profile.address = Some("12 boulevard de la Soummam, Oran".to_string());
    profile.phone = Some("041 00 00 00".to_string());
    println!("1. Profile: {} ({})", profile.name, profile.initials());

    let record = parse_record(SALE)?;
    println!("2. Record: {:?} {:?}", record.kind(), record.reference());

    let mut designer = Designer::new(DocumentKind::Sale);
    designer.set_label(LabelKey::Title, "Facture de vente");
    designer.set_color(ColorToken::Primary, "#0f4c81");
    designer.set_header_padding(40);
    designer.select_tag("logo");
    designer.set_position(10, -5);
    let id = designer.add_text();
    designer.set_text_content("Garantie moteur 6 mois");
    designer.set_text_bold(true);
    designer.clear_selection();
    println!("3. Design edited, added text {id}");

    let options = RenderOptions::default();
    let rendered = designer.preview_with(&record, &profile, options.clone());
    let html = rendered.to_document(options.page_setup()).to_html();
    fs::write("output/invoice.html", &html)?;
    println!("4. Wrote output/invoice.html ({} bytes)", html.len());

    fs::write("output/invoice-design.json", design_to_json(designer.design())?)?;
    println!("5. Wrote output/invoice-design.json");

    Ok(())
}
