//! Design, record and template JSON parsing

use crate::{Design, DocumentRecord, InvoiceTemplate, Result, TemplateError};

/// Parse a design from JSON string
///
/// Missing fields take their defaults. Repeated custom text ids are rejected.
pub fn parse_design(json: &str) -> Result<Design> {
    let design: Design =
        serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))?;
    design.validate()?;
    Ok(design)
}

/// Parse a business record from JSON string
///
/// The `kind` field selects the record variant.
pub fn parse_record(json: &str) -> Result<DocumentRecord> {
    serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))
}

/// Parse a persisted template from JSON string
pub fn parse_template(json: &str) -> Result<InvoiceTemplate> {
    let template: InvoiceTemplate =
        serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))?;
    if template.name.trim().is_empty() {
        return Err(TemplateError::InvalidTemplate(format!(
            "template '{}' has an empty name",
            template.id
        )));
    }
    template.design.validate()?;
    Ok(template)
}

/// Serialize a design to pretty JSON
pub fn design_to_json(design: &Design) -> Result<String> {
    Ok(serde_json::to_string_pretty(design)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentKind, Position};

    #[test]
    fn test_parse_partial_design() {
        let json = r#"{
            "logoPosition": { "x": 10, "y": -5 },
            "headerPadding": 60
        }"#;

        let design = parse_design(json).unwrap();
        assert_eq!(design.logo_position, Position::new(10, -5));
        assert_eq!(design.header_padding, 60);
        assert_eq!(design.font_size_base, 14.0);
        assert_eq!(design.labels.title, "FACTURE DE VENTE");
    }

    #[test]
    fn test_parse_invalid_design() {
        let result = parse_design("{ not json");
        assert!(matches!(result, Err(TemplateError::ParseError(_))));
    }

    #[test]
    fn test_parse_record_kind() {
        let record = parse_record(r#"{ "kind": "purchase", "purchasePrice": 18000 }"#).unwrap();
        assert_eq!(record.kind(), DocumentKind::Purchase);

        assert!(parse_record(r#"{ "kind": "lease" }"#).is_err());
    }

    #[test]
    fn test_parse_template() {
        let json = r#"{
            "id": "tpl-1",
            "name": "Bleu",
            "documentKind": "receipt",
            "design": { "headerPadding": 40 }
        }"#;

        let template = parse_template(json).unwrap();
        assert_eq!(template.document_kind, DocumentKind::Receipt);
        assert_eq!(template.design.header_padding, 40);
        assert!(template.created_by.is_none());
    }

    #[test]
    fn test_parse_template_empty_name() {
        let json = r#"{ "id": "tpl-1", "name": " ", "documentKind": "sale", "design": {} }"#;
        assert!(matches!(
            parse_template(json),
            Err(TemplateError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_duplicate_text_ids_rejected() {
        let design = r#"{
            "customTexts": [
                { "id": "t1", "content": "A" },
                { "id": "t1", "content": "B" }
            ]
        }"#;
        assert!(matches!(
            parse_design(design),
            Err(TemplateError::InvalidTemplate(_))
        ));

        let template = format!(
            r#"{{ "id": "tpl-1", "name": "Bleu", "documentKind": "sale", "design": {design} }}"#
        );
        assert!(matches!(
            parse_template(&template),
            Err(TemplateError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_design_json_roundtrip() {
        let mut design = Design::for_kind(DocumentKind::Inspection);
        design.insert_text("Garantie 3 mois", 0, 120);

        let json = design_to_json(&design).unwrap();
        assert!(json.contains("\"showChecklist\": true"));
        assert_eq!(parse_design(&json).unwrap(), design);
    }
}
