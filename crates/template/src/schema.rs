//! Design JSON schema types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::TemplateError;

/// Embedded JSON Schema for design validation
/// This schema can be used by IDEs and validators for template authoring
pub const DESIGN_SCHEMA: &str = include_str!("../data/design-schema.json");

/// Which business document a design or record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Sale,
    Purchase,
    Inspection,
    Receipt,
    Expense,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Sale,
        DocumentKind::Purchase,
        DocumentKind::Inspection,
        DocumentKind::Receipt,
        DocumentKind::Expense,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Sale => "sale",
            DocumentKind::Purchase => "purchase",
            DocumentKind::Inspection => "inspection",
            DocumentKind::Receipt => "receipt",
            DocumentKind::Expense => "expense",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| TemplateError::ParseError(format!("Unknown document kind: {s}")))
    }
}

/// Pixel offset from a section's default anchor
///
/// Any value is accepted, including far off-canvas.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift the position
    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }
}

/// Fixed, positionable sections of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Logo,
    Title,
    PartnerInfo,
    SubjectInfo,
    Financials,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Logo,
        Section::Title,
        Section::PartnerInfo,
        Section::SubjectInfo,
        Section::Financials,
    ];

    /// Tag used in `data-element` attributes
    pub fn tag(self) -> &'static str {
        match self {
            Section::Logo => "logo",
            Section::Title => "title",
            Section::PartnerInfo => "partnerInfo",
            Section::SubjectInfo => "subjectInfo",
            Section::Financials => "financials",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|s| s.tag() == tag)
    }
}

fn default_text_size() -> f64 {
    16.0
}

fn default_text_color() -> String {
    "#111827".to_string()
}

/// Free-form text annotation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomText {
    /// Unique within the owning design
    pub id: String,

    #[serde(default)]
    pub content: String,

    /// Horizontal offset from the document center
    #[serde(default)]
    pub x: i32,

    /// Vertical offset from the document center
    #[serde(default)]
    pub y: i32,

    #[serde(default = "default_text_size")]
    pub font_size: f64,

    /// Hex color
    #[serde(default = "default_text_color")]
    pub color: String,

    #[serde(default)]
    pub is_bold: bool,
}

impl CustomText {
    pub fn new(id: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            content: content.to_string(),
            x: 0,
            y: 0,
            font_size: default_text_size(),
            color: default_text_color(),
            is_bold: false,
        }
    }
}

/// Color tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub text: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#1e3a8a".to_string(),
            secondary: "#64748b".to_string(),
            text: "#111827".to_string(),
        }
    }
}

/// Which color token to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Primary,
    Secondary,
    Text,
}

impl Palette {
    pub fn get(&self, token: ColorToken) -> &str {
        match token {
            ColorToken::Primary => &self.primary,
            ColorToken::Secondary => &self.secondary,
            ColorToken::Text => &self.text,
        }
    }

    pub fn set(&mut self, token: ColorToken, value: &str) {
        let slot = match token {
            ColorToken::Primary => &mut self.primary,
            ColorToken::Secondary => &mut self.secondary,
            ColorToken::Text => &mut self.text,
        };
        *slot = value.to_string();
    }
}

/// Keys of the labeled-text dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelKey {
    Title,
    TotalsCaption,
    DateCaption,
    ReferenceCaption,
    PartnerSection,
    SubjectSection,
    FinancialSection,
    SellerRole,
    BuyerRole,
}

impl LabelKey {
    pub const ALL: [LabelKey; 9] = [
        LabelKey::Title,
        LabelKey::TotalsCaption,
        LabelKey::DateCaption,
        LabelKey::ReferenceCaption,
        LabelKey::PartnerSection,
        LabelKey::SubjectSection,
        LabelKey::FinancialSection,
        LabelKey::SellerRole,
        LabelKey::BuyerRole,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LabelKey::Title => "title",
            LabelKey::TotalsCaption => "totalsCaption",
            LabelKey::DateCaption => "dateCaption",
            LabelKey::ReferenceCaption => "referenceCaption",
            LabelKey::PartnerSection => "partnerSection",
            LabelKey::SubjectSection => "subjectSection",
            LabelKey::FinancialSection => "financialSection",
            LabelKey::SellerRole => "sellerRole",
            LabelKey::BuyerRole => "buyerRole",
        }
    }
}

impl FromStr for LabelKey {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabelKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| TemplateError::ParseError(format!("Unknown label key: {s}")))
    }
}

/// Labeled-text dictionary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub title: String,
    pub totals_caption: String,
    pub date_caption: String,
    pub reference_caption: String,
    pub partner_section: String,
    pub subject_section: String,
    pub financial_section: String,
    pub seller_role: String,
    pub buyer_role: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self::for_kind(DocumentKind::Sale)
    }
}

impl Labels {
    /// Default French captions for a document kind
    pub fn for_kind(kind: DocumentKind) -> Self {
        let (title, totals, partner, financial, seller, buyer) = match kind {
            DocumentKind::Sale => (
                "FACTURE DE VENTE",
                "Prix total",
                "Client",
                "Règlement",
                "Le vendeur",
                "L'acheteur",
            ),
            DocumentKind::Purchase => (
                "BON D'ACHAT",
                "Coût d'acquisition",
                "Fournisseur",
                "Montant",
                "Le fournisseur",
                "Le showroom",
            ),
            DocumentKind::Inspection => (
                "RAPPORT D'INSPECTION",
                "Kilométrage",
                "Client",
                "Contrôle",
                "L'inspecteur",
                "Le client",
            ),
            DocumentKind::Receipt => (
                "REÇU DE PAIEMENT",
                "Montant reçu",
                "Client",
                "Paiement",
                "Le caissier",
                "Le client",
            ),
            DocumentKind::Expense => (
                "BON DE DÉPENSE",
                "Montant",
                "Bénéficiaire",
                "Dépense",
                "Le responsable",
                "Le bénéficiaire",
            ),
        };

        Self {
            title: title.to_string(),
            totals_caption: totals.to_string(),
            date_caption: "Date".to_string(),
            reference_caption: "Référence".to_string(),
            partner_section: partner.to_string(),
            subject_section: "Véhicule".to_string(),
            financial_section: financial.to_string(),
            seller_role: seller.to_string(),
            buyer_role: buyer.to_string(),
        }
    }

    pub fn get(&self, key: LabelKey) -> &str {
        match key {
            LabelKey::Title => &self.title,
            LabelKey::TotalsCaption => &self.totals_caption,
            LabelKey::DateCaption => &self.date_caption,
            LabelKey::ReferenceCaption => &self.reference_caption,
            LabelKey::PartnerSection => &self.partner_section,
            LabelKey::SubjectSection => &self.subject_section,
            LabelKey::FinancialSection => &self.financial_section,
            LabelKey::SellerRole => &self.seller_role,
            LabelKey::BuyerRole => &self.buyer_role,
        }
    }

    pub fn set(&mut self, key: LabelKey, value: &str) {
        let slot = match key {
            LabelKey::Title => &mut self.title,
            LabelKey::TotalsCaption => &mut self.totals_caption,
            LabelKey::DateCaption => &mut self.date_caption,
            LabelKey::ReferenceCaption => &mut self.reference_caption,
            LabelKey::PartnerSection => &mut self.partner_section,
            LabelKey::SubjectSection => &mut self.subject_section,
            LabelKey::FinancialSection => &mut self.financial_section,
            LabelKey::SellerRole => &mut self.seller_role,
            LabelKey::BuyerRole => &mut self.buyer_role,
        };
        *slot = value.to_string();
    }
}

/// Root design structure
///
/// Layout and style configuration of one printable document. Every field
/// has a default, so partially specified JSON designs deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Design {
    pub logo_position: Position,
    pub title_position: Position,
    pub partner_info_position: Position,
    pub subject_info_position: Position,
    pub financials_position: Position,

    /// Free-form text annotations
    pub custom_texts: Vec<CustomText>,

    pub colors: Palette,

    /// Base font size in pixels
    pub font_size_base: f64,

    /// Space below the header section in pixels
    pub header_padding: i32,

    /// Inspection checklist layout instead of the financial ledger
    pub show_checklist: bool,

    pub labels: Labels,
}

impl Default for Design {
    fn default() -> Self {
        Self::for_kind(DocumentKind::Sale)
    }
}

impl Design {
    /// Fresh design for a document kind
    pub fn for_kind(kind: DocumentKind) -> Self {
        Self {
            logo_position: Position::default(),
            title_position: Position::default(),
            partner_info_position: Position::default(),
            subject_info_position: Position::default(),
            financials_position: Position::default(),
            custom_texts: Vec::new(),
            colors: Palette::default(),
            font_size_base: 14.0,
            header_padding: 24,
            show_checklist: kind == DocumentKind::Inspection,
            labels: Labels::for_kind(kind),
        }
    }

    /// Get the position of a section
    pub fn position(&self, section: Section) -> Position {
        match section {
            Section::Logo => self.logo_position,
            Section::Title => self.title_position,
            Section::PartnerInfo => self.partner_info_position,
            Section::SubjectInfo => self.subject_info_position,
            Section::Financials => self.financials_position,
        }
    }

    pub fn position_mut(&mut self, section: Section) -> &mut Position {
        match section {
            Section::Logo => &mut self.logo_position,
            Section::Title => &mut self.title_position,
            Section::PartnerInfo => &mut self.partner_info_position,
            Section::SubjectInfo => &mut self.subject_info_position,
            Section::Financials => &mut self.financials_position,
        }
    }

    pub fn set_position(&mut self, section: Section, position: Position) -> &mut Self {
        *self.position_mut(section) = position;
        self
    }

    pub fn custom_text(&self, id: &str) -> Option<&CustomText> {
        self.custom_texts.iter().find(|t| t.id == id)
    }

    pub fn custom_text_mut(&mut self, id: &str) -> Option<&mut CustomText> {
        self.custom_texts.iter_mut().find(|t| t.id == id)
    }

    /// An id not used by any custom text of this design
    pub fn next_text_id(&self) -> String {
        let mut n = self.custom_texts.len() + 1;
        loop {
            let candidate = format!("text-{n}");
            if self.custom_text(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Insert free text at an offset from the document center
    ///
    /// Returns the id of the new annotation.
    pub fn insert_text(&mut self, content: &str, x: i32, y: i32) -> String {
        let id = self.next_text_id();
        let mut text = CustomText::new(&id, content);
        text.x = x;
        text.y = y;
        text.color = self.colors.text.clone();
        self.custom_texts.push(text);
        id
    }

    /// Remove a custom text by id
    pub fn remove_text(&mut self, id: &str) -> Option<CustomText> {
        let index = self.custom_texts.iter().position(|t| t.id == id)?;
        Some(self.custom_texts.remove(index))
    }

    /// Reject designs whose custom text ids repeat
    pub fn validate(&self) -> Result<(), TemplateError> {
        let mut seen = HashSet::new();
        for text in &self.custom_texts {
            if !seen.insert(text.id.as_str()) {
                return Err(TemplateError::InvalidTemplate(format!(
                    "duplicate custom text id '{}'",
                    text.id
                )));
            }
        }
        Ok(())
    }

    /// Give each repeated custom text id a fresh one
    ///
    /// The first occurrence keeps its id. Returns the number of texts renamed.
    pub fn repair_text_ids(&mut self) -> usize {
        let mut seen = HashSet::new();
        let repeated: Vec<usize> = self
            .custom_texts
            .iter()
            .enumerate()
            .filter(|(_, t)| !seen.insert(t.id.clone()))
            .map(|(i, _)| i)
            .collect();
        for &index in &repeated {
            let id = self.next_text_id();
            self.custom_texts[index].id = id;
        }
        repeated.len()
    }
}

/// A named, persisted design
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTemplate {
    pub id: String,
    pub name: String,
    pub document_kind: DocumentKind,
    pub design: Design,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_design() {
        let json = r##"{
            "logoPosition": { "x": 10, "y": -5 },
            "headerPadding": 60,
            "customTexts": [
                { "id": "t1", "content": "Merci", "x": 0, "y": 120 }
            ]
        }"##;

        let design: Design = serde_json::from_str(json).unwrap();
        assert_eq!(design.logo_position, Position::new(10, -5));
        assert_eq!(design.header_padding, 60);
        assert_eq!(design.title_position, Position::default());
        assert_eq!(design.custom_texts[0].font_size, 16.0);
        assert_eq!(design.labels.title, "FACTURE DE VENTE");
        assert!(!design.show_checklist);
    }

    #[test]
    fn test_design_for_inspection() {
        let design = Design::for_kind(DocumentKind::Inspection);
        assert!(design.show_checklist);
        assert_eq!(design.labels.title, "RAPPORT D'INSPECTION");
    }

    #[test]
    fn test_next_text_id_skips_taken() {
        let mut design = Design::default();
        design.custom_texts.push(CustomText::new("text-1", "a"));
        design.custom_texts.push(CustomText::new("text-3", "b"));
        // len + 1 = 3 is taken
        assert_eq!(design.next_text_id(), "text-4");
    }

    #[test]
    fn test_insert_and_remove_text() {
        let mut design = Design::default();
        let a = design.insert_text("A", 5, 5);
        let b = design.insert_text("B", -5, -5);
        assert_ne!(a, b);

        let removed = design.remove_text(&a).unwrap();
        assert_eq!(removed.content, "A");
        assert_eq!(design.custom_texts.len(), 1);
        assert_eq!(design.custom_texts[0].id, b);
        assert!(design.remove_text("missing").is_none());
    }

    #[test]
    fn test_section_tags_roundtrip() {
        for section in Section::ALL {
            assert_eq!(Section::from_tag(section.tag()), Some(section));
        }
        assert_eq!(Section::from_tag("footer"), None);
    }

    #[test]
    fn test_label_keys() {
        let mut labels = Labels::for_kind(DocumentKind::Receipt);
        labels.set(LabelKey::BuyerRole, "Signature client");
        assert_eq!(labels.get(LabelKey::BuyerRole), "Signature client");
        assert_eq!("totalsCaption".parse::<LabelKey>().unwrap(), LabelKey::TotalsCaption);
        assert!("nope".parse::<LabelKey>().is_err());
    }

    #[test]
    fn test_document_kind_parse() {
        assert_eq!("receipt".parse::<DocumentKind>().unwrap(), DocumentKind::Receipt);
        assert!("invoice".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn test_design_schema_is_json() {
        let schema: serde_json::Value = serde_json::from_str(DESIGN_SCHEMA).unwrap();
        assert_eq!(schema["title"], "Document Design");
    }
}
