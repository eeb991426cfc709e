//! Section content builders
//!
//! The renderer places sections; this module fills them. Every builder
//! tolerates missing data and substitutes the configured placeholders.

mod checklist;
mod ledger;

pub use checklist::checklist_block;
pub use ledger::ledger_block;

use html_core::Element;

use crate::config::RenderOptions;
use crate::records::{ExpenseRecord, Party, Vehicle};

/// Trait for record parts shown as a caption/value list
pub trait FieldList {
    /// Caption and display value of every field, placeholders included
    fn fields(&self, options: &RenderOptions) -> Vec<(&'static str, String)>;
}

impl FieldList for Party {
    fn fields(&self, options: &RenderOptions) -> Vec<(&'static str, String)> {
        vec![
            ("Nom", text_or(&self.name, &options.missing_text)),
            ("Téléphone", text_or(&self.phone, &options.not_available)),
            ("Adresse", text_or(&self.address, &options.missing_text)),
            ("N° d'identité", text_or(&self.id_number, &options.missing_text)),
        ]
    }
}

impl FieldList for Vehicle {
    fn fields(&self, options: &RenderOptions) -> Vec<(&'static str, String)> {
        vec![
            (
                "Modèle",
                self.display_name()
                    .unwrap_or_else(|| options.missing_text.clone()),
            ),
            (
                "Année",
                self.year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| options.not_available.clone()),
            ),
            ("Immatriculation", text_or(&self.plate, &options.missing_text)),
            ("N° de châssis", text_or(&self.vin, &options.missing_text)),
            ("Couleur", text_or(&self.color, &options.missing_text)),
            ("Kilométrage", mileage_or(self.mileage, &options.not_available)),
        ]
    }
}

impl FieldList for ExpenseRecord {
    fn fields(&self, options: &RenderOptions) -> Vec<(&'static str, String)> {
        vec![
            ("Catégorie", text_or(&self.category, &options.missing_text)),
            ("Description", text_or(&self.description, &options.missing_text)),
        ]
    }
}

/// Trimmed value, or the placeholder when absent or blank
pub fn text_or(value: &Option<String>, placeholder: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

/// "120 000 km", or the placeholder
pub fn mileage_or(mileage: Option<u32>, placeholder: &str) -> String {
    mileage
        .map(|km| format!("{} km", fr_text::render_float("# ###", f64::from(km))))
        .unwrap_or_else(|| placeholder.to_string())
}

/// `<div class="field">` with caption and value spans
pub fn field_row(caption: &str, value: &str) -> Element {
    Element::new("div")
        .with_class("field")
        .with_child(
            Element::new("span")
                .with_class("field-label")
                .with_text(format!("{caption} :")),
        )
        .with_child(Element::new("span").with_class("field-value").with_text(value))
}

/// Section heading followed by one row per field
pub fn field_list(heading: &str, source: &dyn FieldList, options: &RenderOptions) -> Vec<Element> {
    let mut rows = vec![Element::new("h2")
        .with_class("section-title")
        .with_text(heading)];
    rows.extend(
        source
            .fields(options)
            .iter()
            .map(|(caption, value)| field_row(caption, value)),
    );
    rows
}
