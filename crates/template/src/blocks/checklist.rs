//! Inspection checklist content

use html_core::Element;

use crate::config::RenderOptions;
use crate::records::{Checklist, DocumentRecord};

pub const CHECK_GLYPH: &str = "✓";
pub const CROSS_GLYPH: &str = "✗";

/// Three columns (safety, equipment, comfort) of check/cross entries
///
/// Records other than inspections have no checklist data and get empty
/// columns.
pub fn checklist_block(record: &DocumentRecord, options: &RenderOptions) -> Element {
    let empty = Checklist::new();
    let (safety, equipment, comfort) = match record {
        DocumentRecord::Inspection(inspection) => (
            &inspection.safety,
            &inspection.equipment,
            &inspection.comfort,
        ),
        _ => (&empty, &empty, &empty),
    };

    let mut block = Element::new("div").with_class("checklist");
    for (heading, checklist) in [
        ("Sécurité", safety),
        ("Équipements", equipment),
        ("Confort", comfort),
    ] {
        block.push(column(heading, checklist, options));
    }

    if let DocumentRecord::Inspection(inspection) = record {
        if let Some(notes) = inspection.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            block.push(
                Element::new("p")
                    .with_class("inspection-notes")
                    .with_text(notes.trim()),
            );
        }
    }
    block
}

fn column(heading: &str, checklist: &Checklist, options: &RenderOptions) -> Element {
    let mut list = Element::new("ul");
    if checklist.is_empty() {
        list.push(
            Element::new("li")
                .with_class("check-empty")
                .with_text(options.not_available.as_str()),
        );
    }
    for (name, passed) in checklist.iter() {
        let (class, glyph) = if passed {
            ("check-ok", CHECK_GLYPH)
        } else {
            ("check-fail", CROSS_GLYPH)
        };
        list.push(
            Element::new("li")
                .with_class("check-item")
                .with_class(class)
                .with_child(Element::new("span").with_class("check-glyph").with_text(glyph))
                .with_child(Element::new("span").with_class("check-name").with_text(name)),
        );
    }

    Element::new("div")
        .with_class("checklist-column")
        .with_child(Element::new("h3").with_text(heading))
        .with_child(list)
}
