//! Integration tests for html-core
//!
//! These tests build complete documents the way print paths do and check the
//! serialized output.

use html_core::{
    Color, Element, EmbeddedImage, HtmlDocument, ImageScaleMode, PageSetup, Style, Stylesheet,
};
use pretty_assertions::assert_eq;
use std::io::Cursor;

/// Create a small valid PNG for testing
fn create_test_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(64, 32, image::Rgb([30, 58, 138]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_self_contained_document() {
    let logo = EmbeddedImage::from_bytes(create_test_png()).unwrap();

    let mut doc = HtmlDocument::new("Facture de vente");
    doc.stylesheet_mut()
        .set_page(PageSetup::a4())
        .rule("body", Style::new().set("margin", "0"));
    doc.body_mut().push(
        Element::new("div")
            .with_id("printable")
            .with_child(logo.to_element("logo", 120.0, 60.0, ImageScaleMode::FitBox)),
    );

    let html = doc.to_html();
    assert!(html.contains("@page { size: A4; margin: 10mm; }"));
    assert!(html.contains("body { margin: 0; }"));
    assert!(html.contains("src=\"data:image/png;base64,"));
    // no external resource references
    assert!(!html.contains("http://"));
    assert!(!html.contains("https://"));
}

#[test]
fn test_operator_text_cannot_inject_markup() {
    let hostile = r#"<script>alert("x")</script>"#;
    let el = Element::new("div")
        .with_attr("title", hostile)
        .with_text(hostile);
    let html = el.to_html();
    assert!(!html.contains("<script>"));
    assert_eq!(
        html,
        "<div title=\"&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;\">\
         &lt;script&gt;alert(\"x\")&lt;/script&gt;</div>"
    );
}

#[test]
fn test_operator_color_is_validated() {
    assert!(Color::from_hex("#2563eb").is_ok());
    assert!(Color::from_hex("#2563eb;}body{display:none").is_err());
}

#[test]
fn test_in_place_print_stylesheet_merges() {
    let mut doc = HtmlDocument::new("Aperçu");
    doc.stylesheet_mut().set_page(PageSetup::a4());
    doc.stylesheet_mut().extend(Stylesheet::print_only("invoice"));

    let css = doc.stylesheet().to_css();
    assert!(css.starts_with("@page"));
    assert!(css.contains("@media print {"));
    assert!(css.contains("#invoice { position: absolute; left: 0; top: 0; width: 100%; }"));
}
