//! Integration tests for document rendering, designing and printing

use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;
use std::io::Cursor;
use std::time::Duration;
use template::{
    parse_record, Designer, DocumentKind, DocumentRecord, DocumentRenderer, InspectionRecord,
    JsonFileTemplateStore, LabelKey, PrintJob, PrintStatus, PrintStrategy, ReceiptRecord,
    RenderOptions, SaleRecord, Selection, SessionContext, ShowroomProfile, SpoolBackend,
    TemplateStore, PRINTABLE_ID,
};
use template::{Design, LogoSource, Position, PrintBackend, TemplateError};

fn profile() -> ShowroomProfile {
    ShowroomProfile::from_json(
        r#"{
            "name": "Auto Prestige",
            "address": "12 rue Didouche Mourad, Alger",
            "phone": "0555 12 34 56"
        }"#,
    )
    .unwrap()
}

fn sale_record(total: f64, paid: f64) -> DocumentRecord {
    parse_record(
        &json!({
            "kind": "sale",
            "reference": "V-2026-014",
            "date": "2026-10-17",
            "client": { "name": "Yacine Benali", "phone": "0661 00 11 22" },
            "vehicle": { "make": "Renault", "model": "Clio", "year": 2021, "vin": "VF1RJA00067000001" },
            "totalPrice": total,
            "amountPaid": paid
        })
        .to_string(),
    )
    .unwrap()
}

fn inspection_record() -> DocumentRecord {
    parse_record(
        r#"{
            "kind": "inspection",
            "reference": "INS-7",
            "vehicle": { "make": "Dacia", "model": "Logan", "mileage": 88000 },
            "safety": { "lights": true, "brakes": false }
        }"#,
    )
    .unwrap()
}

fn png_base64() -> String {
    use base64::Engine as _;
    let img = image::RgbImage::from_pixel(120, 60, image::Rgb([30, 58, 138]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[test]
fn test_balance_is_never_negative() {
    for (total, paid) in [(35000.0, 0.0), (35000.0, 35000.0), (35000.0, 50000.0), (0.0, 10.0)] {
        let DocumentRecord::Sale(sale) = sale_record(total, paid) else {
            panic!("Expected sale");
        };
        assert!(sale.balance() >= 0.0);
        assert_eq!(sale.balance(), f64::max(0.0, total - paid));
    }
}

#[test]
fn test_new_text_ids_are_unique() {
    let mut designer = Designer::new(DocumentKind::Sale);
    let mut ids = HashSet::new();
    for _ in 0..5 {
        ids.insert(designer.add_text());
    }
    assert_eq!(ids.len(), 5);
    // free a low id and keep adding
    designer.delete_text("text-2");
    for _ in 0..3 {
        let id = designer.add_text();
        assert!(designer.design().custom_texts.iter().filter(|t| t.id == id).count() == 1);
    }

    let all: HashSet<&str> = designer
        .design()
        .custom_texts
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(all.len(), designer.design().custom_texts.len());
}

#[test]
fn test_delete_removes_exactly_one_text() {
    let mut designer = Designer::new(DocumentKind::Receipt);
    let a = designer.add_text();
    let b = designer.add_text();
    let c = designer.add_text();

    designer.select(Selection::Extra(b.clone()));
    let removed = designer.delete_selected_text().unwrap();

    assert_eq!(removed.id, b);
    assert_eq!(designer.selection(), &Selection::None);
    let remaining: Vec<&str> = designer
        .design()
        .custom_texts
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(remaining, vec![a.as_str(), c.as_str()]);
}

#[test]
fn test_rendering_is_deterministic() {
    let mut design = Design::for_kind(DocumentKind::Sale);
    design.insert_text("Garantie 3 mois", -40, 200);
    let profile = profile();
    let record = sale_record(35000.0, 20000.0);
    let selection = Selection::Title;

    let render = || {
        DocumentRenderer::new(&design, &profile)
            .with_selection(&selection)
            .render(&record)
            .to_document(RenderOptions::default().page_setup())
            .to_html()
    };
    assert_eq!(render(), render());
}

#[test]
fn test_toggle_checklist_keeps_positions() {
    let mut designer = Designer::new(DocumentKind::Inspection);
    designer.select(Selection::Financials);
    designer.set_position(30, 45);
    designer.select(Selection::SubjectInfo);
    designer.set_position(-12, 8);
    let before = designer.design().clone();
    let profile = profile();
    let record = inspection_record();

    let with_checklist = designer.preview(&record, &profile);
    assert_eq!(with_checklist.root().find_by_class("checklist").len(), 1);
    assert!(with_checklist.root().find_by_class("ledger").is_empty());

    designer.toggle_checklist();
    let with_ledger = designer.preview(&record, &profile);
    assert!(with_ledger.root().find_by_class("checklist").is_empty());
    assert_eq!(with_ledger.root().find_by_class("ledger").len(), 1);

    let after = designer.design();
    assert_eq!(after.logo_position, before.logo_position);
    assert_eq!(after.title_position, before.title_position);
    assert_eq!(after.partner_info_position, before.partner_info_position);
    assert_eq!(after.subject_info_position, Position::new(-12, 8));
    assert_eq!(after.financials_position, Position::new(30, 45));

    let financials = with_ledger
        .root()
        .find_by_attr("data-element", "financials")
        .unwrap();
    assert_eq!(financials.style().get("transform"), Some("translate(30px, 45px)"));
}

#[test]
fn test_logo_translation_and_header_padding() {
    let design: Design = serde_json::from_value(json!({
        "logoPosition": { "x": 10, "y": -5 },
        "headerPadding": 60
    }))
    .unwrap();
    let profile = profile();
    let rendered = DocumentRenderer::new(&design, &profile).render(&sale_record(100.0, 0.0));

    let logo = rendered.root().find_by_attr("data-element", "logo").unwrap();
    assert_eq!(logo.style().get("transform"), Some("translate(10px, -5px)"));

    let header = rendered.root().find_by_class("doc-header")[0];
    assert_eq!(header.style().get("padding-bottom"), Some("60px"));
    assert!(rendered
        .to_html()
        .contains("<header class=\"doc-header\" style=\"padding-bottom: 60px\">"));
}

#[test]
fn test_paid_sale_is_completed() {
    let design = Design::for_kind(DocumentKind::Sale);
    let profile = profile();
    let rendered = DocumentRenderer::new(&design, &profile).render(&sale_record(35000.0, 35000.0));
    let root = rendered.root();

    let balance = root.find_by_class("balance")[0];
    assert_eq!(balance.find_by_class("amount")[0].text_content(), "0,00 DA");
    assert_eq!(root.find_by_class("status-completed").len(), 1);
    assert!(root.find_by_class("status-debt").is_empty());
}

#[test]
fn test_inspection_checklist_rows() {
    let design = Design::for_kind(DocumentKind::Inspection);
    assert!(design.show_checklist);
    let profile = profile();
    let rendered = DocumentRenderer::new(&design, &profile).render(&inspection_record());

    let rows = rendered.root().find_by_class("check-item");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].text_content(), "✓lights");
    assert_eq!(rows[1].text_content(), "✗brakes");
    assert!(rows[0].has_class("check-ok"));
    assert!(rows[1].has_class("check-fail"));
}

#[test]
fn test_missing_fields_use_placeholders() {
    let record = parse_record(r#"{ "kind": "purchase" }"#).unwrap();
    let design = Design::for_kind(DocumentKind::Purchase);
    let profile = ShowroomProfile::default();
    let rendered = DocumentRenderer::new(&design, &profile).render(&record);
    let text = rendered.root().text_content();

    assert!(text.contains("Non spécifié"));
    assert!(text.contains("N/A"));
    assert!(text.contains("0,00 DA"));
}

#[test]
fn test_operator_text_is_escaped() {
    let mut designer = Designer::new(DocumentKind::Sale);
    designer.set_label(LabelKey::Title, "<script>alert(1)</script>");
    designer.add_text();
    designer.set_text_content("\"><img src=x onerror=alert(1)>");
    designer.set_text_color("red\" onclick=\"x");

    let html = designer
        .preview(&sale_record(1.0, 0.0), &profile())
        .to_html();
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<img src=x"));
    assert!(!html.contains("onclick=\"x"));
}

#[test]
fn test_detached_print_is_self_contained() {
    let dir = tempfile::tempdir().unwrap();
    let mut profile = profile();
    profile.logo = Some(LogoSource::Base64(png_base64()));
    let logo = profile.load_logo().unwrap().unwrap();

    let design = Design::for_kind(DocumentKind::Receipt);
    let DocumentRecord::Sale(sale) = sale_record(35000.0, 20000.0) else {
        panic!("Expected sale");
    };
    let receipt = DocumentRecord::Receipt(ReceiptRecord::from_sale_payment(&sale, 10000.0, None));
    let rendered = DocumentRenderer::new(&design, &profile)
        .with_logo(&logo)
        .render(&receipt);

    let options = RenderOptions::default();
    let mut job = PrintJob::detached(&rendered, &options);
    assert_eq!(job.strategy(), &PrintStrategy::Detached);

    let mut backend = SpoolBackend::new(dir.path()).unwrap();
    assert_eq!(job.run(&mut backend), PrintStatus::Completed);
    assert_eq!(
        job.history(),
        &[
            PrintStatus::Pending,
            PrintStatus::Opened,
            PrintStatus::Completed
        ]
    );

    let html = std::fs::read_to_string(&backend.printed()[0]).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("@page { size: A4;"));
    assert!(html.contains("src=\"data:image/png;base64,"));
    assert!(html.contains(&format!("id=\"{PRINTABLE_ID}\"")));
    assert!(html.contains("5 000,00 DA"));
    assert!(html.contains("dix mille dinars"));
}

#[test]
fn test_in_place_print() {
    let dir = tempfile::tempdir().unwrap();
    let mut backend = SpoolBackend::new(dir.path()).unwrap();
    let mut job = PrintJob::in_place_default();

    assert!(job.payload().contains(&format!("#{PRINTABLE_ID}")));
    assert_eq!(job.run(&mut backend), PrintStatus::Completed);
    assert_eq!(backend.in_place_prints(), 1);
    assert!(backend.opened().is_empty());
}

#[test]
fn test_save_template_to_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("templates.json");
    let session = SessionContext::new();

    let mut designer = Designer::new(DocumentKind::Sale);
    designer.set_header_padding(48);
    designer.add_text();

    {
        let mut store = JsonFileTemplateStore::open(&path).unwrap();
        assert!(designer
            .save_as_template("Classique", &mut store, &session)
            .is_err());

        session.login("Amina");
        let saved = designer
            .save_as_template("Classique", &mut store, &session)
            .unwrap();
        assert_eq!(saved.created_by.as_deref(), Some("Amina"));
    }

    let store = JsonFileTemplateStore::open(&path).unwrap();
    let templates = store.list(Some(DocumentKind::Sale)).unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].design.header_padding, 48);

    let reopened = Designer::from_template(&templates[0]);
    assert_eq!(reopened.design(), designer.design());
    assert_eq!(reopened.kind(), DocumentKind::Sale);
}

#[test]
fn test_receipt_projection() {
    let sale = SaleRecord {
        total_price: 35000.0,
        amount_paid: 30000.0,
        ..Default::default()
    };
    let receipt = ReceiptRecord::from_sale_payment(&sale, 8000.0, None);
    assert_eq!(receipt.total_paid, 38000.0);
    assert_eq!(receipt.remaining_balance, 0.0);

    let inspection = InspectionRecord::default();
    assert!(inspection.safety.is_empty());
}

#[test]
fn test_checklist_order_from_json_value() {
    let record: DocumentRecord = serde_json::from_value(json!({
        "kind": "inspection",
        "safety": { "lights": true, "brakes": false, "airbags": true }
    }))
    .unwrap();
    let design = Design::for_kind(DocumentKind::Inspection);
    let profile = profile();
    let rendered = DocumentRenderer::new(&design, &profile).render(&record);

    let rows: Vec<String> = rendered
        .root()
        .find_by_class("check-item")
        .iter()
        .map(|row| row.text_content())
        .collect();
    assert_eq!(rows, vec!["✓lights", "✗brakes", "✓airbags"]);
}

#[test]
fn test_inspection_mileage_matches_ledger() {
    let record = parse_record(
        r#"{
            "kind": "inspection",
            "mileage": 52000,
            "vehicle": { "make": "Dacia", "model": "Logan", "mileage": 48000 }
        }"#,
    )
    .unwrap();
    let mut design = Design::for_kind(DocumentKind::Inspection);
    design.show_checklist = false;
    let profile = profile();
    let rendered = DocumentRenderer::new(&design, &profile).render(&record);
    let root = rendered.root();

    let subject = root.find_by_attr("data-element", "subjectInfo").unwrap();
    let ledger = root.find_by_attr("data-element", "financials").unwrap();
    assert!(subject.text_content().contains("52 000 km"));
    assert!(ledger.text_content().contains("52 000 km"));
    assert!(!root.text_content().contains("48 000 km"));
}

#[test]
fn test_expense_invoice() {
    let record = parse_record(
        r#"{
            "kind": "expense",
            "reference": "DEP-31",
            "date": "2026-10-02",
            "category": "Carburant",
            "description": "Plein du camion de livraison",
            "beneficiary": { "name": "Naftal" },
            "amount": 10000
        }"#,
    )
    .unwrap();
    assert!(record.vehicle().is_none());

    let design = Design::for_kind(DocumentKind::Expense);
    let profile = profile();
    let rendered = DocumentRenderer::new(&design, &profile).render(&record);
    let root = rendered.root();

    let subject = root.find_by_attr("data-element", "subjectInfo").unwrap();
    let subject_text = subject.text_content();
    assert!(subject_text.contains("Carburant"));
    assert!(subject_text.contains("Plein du camion de livraison"));

    let amounts: Vec<String> = root
        .find_by_class("amount")
        .iter()
        .map(|cell| cell.text_content())
        .collect();
    assert_eq!(amounts, vec!["10 000,00 DA", "Carburant", "Naftal"]);

    let words = root.find_by_class("amount-words");
    assert_eq!(words.len(), 1);
    assert!(words[0].text_content().contains("dix mille dinars"));
    assert!(root.text_content().contains("02/10/2026"));
}

#[test]
fn test_blank_expense_uses_placeholders() {
    let record = parse_record(r#"{ "kind": "expense" }"#).unwrap();
    let design = Design::for_kind(DocumentKind::Expense);
    let profile = ShowroomProfile::default();
    let rendered = DocumentRenderer::new(&design, &profile).render(&record);

    let amounts: Vec<String> = rendered
        .root()
        .find_by_class("amount")
        .iter()
        .map(|cell| cell.text_content())
        .collect();
    assert_eq!(amounts, vec!["0,00 DA", "Non spécifié", "Non spécifié"]);
    assert!(rendered.root().text_content().contains("N/A"));
}

/// Backend whose operations all error, optionally after opening
struct FailingBackend {
    opens: bool,
}

impl PrintBackend for FailingBackend {
    fn open_window(&mut self, _html: &str) -> template::Result<bool> {
        if self.opens {
            Ok(true)
        } else {
            Err(TemplateError::PrintError("device offline".to_string()))
        }
    }

    fn print_window(&mut self, _delay: Duration) -> template::Result<()> {
        Err(TemplateError::PrintError("spooler stopped".to_string()))
    }

    fn print_current(&mut self) -> template::Result<()> {
        Err(TemplateError::PrintError("spooler stopped".to_string()))
    }
}

#[test]
fn test_backend_errors_fail_the_job() {
    let design = Design::for_kind(DocumentKind::Sale);
    let profile = profile();
    let rendered = DocumentRenderer::new(&design, &profile).render(&sale_record(1.0, 0.0));
    let options = RenderOptions::default();

    let mut job = PrintJob::detached(&rendered, &options);
    let status = job.run(&mut FailingBackend { opens: false });
    assert!(matches!(&status, PrintStatus::Failed(msg) if msg.contains("device offline")));
    assert_eq!(job.history().len(), 2);

    let mut job = PrintJob::detached(&rendered, &options);
    let status = job.run(&mut FailingBackend { opens: true });
    assert!(matches!(&status, PrintStatus::Failed(msg) if msg.contains("spooler stopped")));
    assert_eq!(job.history()[1], PrintStatus::Opened);
    assert!(status.is_finished());

    let mut job = PrintJob::in_place_default();
    let status = job.run(&mut FailingBackend { opens: true });
    assert!(matches!(status, PrintStatus::Failed(_)));
}
