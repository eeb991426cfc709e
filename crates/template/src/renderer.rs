//! Document rendering
//!
//! A design and a record become an element tree plus the stylesheet it needs.
//! Rendering is a pure function of its inputs: no clock, no randomness and no
//! hash ordering, so the same inputs always give the same markup.

use fr_text::{format_date_short, CurrencyNames};
use html_core::{px, translate, Color, Element, EmbeddedImage, HtmlDocument, ImageScaleMode};
use html_core::{PageSetup, Style, Stylesheet};

use crate::blocks::{checklist_block, field_list, field_row, ledger_block};
use crate::config::{RenderOptions, ShowroomProfile};
use crate::designer::Selection;
use crate::records::DocumentRecord;
use crate::schema::*;

/// Id of the printable container
pub const PRINTABLE_ID: &str = "printable-document";

const LOGO_BOX: (f64, f64) = (140.0, 80.0);
const DEFAULT_SUBTITLE: &str = "Showroom automobile";

/// Document renderer
pub struct DocumentRenderer<'a> {
    /// The design to render
    design: &'a Design,
    profile: &'a ShowroomProfile,
    logo: Option<&'a EmbeddedImage>,
    /// Highlighted block (designer preview)
    selection: Option<&'a Selection>,
    options: RenderOptions,
}

/// Resolved colors, never raw operator input
struct Colors {
    primary: String,
    secondary: String,
    text: String,
}

impl<'a> DocumentRenderer<'a> {
    /// Create a new renderer for a design
    pub fn new(design: &'a Design, profile: &'a ShowroomProfile) -> Self {
        Self {
            design,
            profile,
            logo: None,
            selection: None,
            options: RenderOptions::default(),
        }
    }

    /// Use an image in the logo block instead of the showroom initials
    pub fn with_logo(mut self, logo: &'a EmbeddedImage) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Mark the selected block
    pub fn with_selection(mut self, selection: &'a Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Render a record
    pub fn render(&self, record: &DocumentRecord) -> RenderedDocument {
        let kind = record.kind();
        let colors = self.resolve_colors();
        let currency = self.profile.currency.to_names();

        log::debug!(
            "rendering {} document {} ({} custom texts)",
            kind,
            record.reference().unwrap_or("-"),
            self.design.custom_texts.len()
        );

        let mut root = Element::new("div")
            .with_id(PRINTABLE_ID)
            .with_class("document")
            .with_class(&format!("document-{kind}"))
            .with_attr("data-kind", kind.as_str());

        root.push(self.render_header(record));
        root.push(self.render_partner(record));
        root.push(self.render_subject(record));
        root.push(self.render_financials(record, &currency));
        root.push(self.render_signatures());
        root.push(self.render_custom_texts());

        let title = match record.reference() {
            Some(reference) => format!("{} {}", self.design.labels.title, reference),
            None => self.design.labels.title.clone(),
        };

        RenderedDocument {
            title,
            root,
            stylesheet: self.stylesheet(&colors),
        }
    }

    /// Header with logo and title blocks
    fn render_header(&self, record: &DocumentRecord) -> Element {
        let mut logo = self.section_block(Section::Logo, "div");
        match self.logo {
            Some(image) => logo.push(image.to_element(
                &self.profile.name,
                LOGO_BOX.0,
                LOGO_BOX.1,
                ImageScaleMode::FitBox,
            )),
            None => logo.push(
                Element::new("div")
                    .with_class("logo-initials")
                    .with_text(self.profile.initials()),
            ),
        }

        let subtitle = if self.profile.name.trim().is_empty() {
            DEFAULT_SUBTITLE
        } else {
            self.profile.name.trim()
        };

        let labels = &self.design.labels;
        let reference = record
            .reference()
            .unwrap_or(self.options.not_available.as_str())
            .to_string();
        let date = record
            .date()
            .map(format_date_short)
            .unwrap_or_else(|| self.options.not_available.clone());

        let mut title = self
            .section_block(Section::Title, "div")
            .with_child(Element::new("h1").with_text(labels.title.as_str()))
            .with_child(Element::new("p").with_class("subtitle").with_text(subtitle));
        for contact in [&self.profile.address, &self.profile.phone, &self.profile.email]
            .into_iter()
            .flatten()
        {
            title.push(Element::new("p").with_class("contact").with_text(contact.as_str()));
        }
        title.push(
            Element::new("div")
                .with_class("doc-meta")
                .with_child(field_row(&labels.reference_caption, &reference))
                .with_child(field_row(&labels.date_caption, &date)),
        );

        Element::new("header")
            .with_class("doc-header")
            .with_style(Style::new().set("padding-bottom", px(self.design.header_padding)))
            .with_child(logo)
            .with_child(title)
    }

    fn render_partner(&self, record: &DocumentRecord) -> Element {
        let mut block = self.section_block(Section::PartnerInfo, "section");
        for row in field_list(
            &self.design.labels.partner_section,
            record.partner(),
            &self.options,
        ) {
            block.push(row);
        }
        block
    }

    fn render_subject(&self, record: &DocumentRecord) -> Element {
        let mut block = self.section_block(Section::SubjectInfo, "section");
        let rows = match record {
            DocumentRecord::Expense(expense) => {
                field_list(&self.design.labels.subject_section, expense, &self.options)
            }
            // same odometer value as the ledger
            DocumentRecord::Inspection(inspection) => field_list(
                &self.design.labels.subject_section,
                &inspection.inspected_vehicle(),
                &self.options,
            ),
            _ => match record.vehicle() {
                Some(vehicle) => {
                    field_list(&self.design.labels.subject_section, vehicle, &self.options)
                }
                None => Vec::new(),
            },
        };
        for row in rows {
            block.push(row);
        }
        block
    }

    /// Ledger, or the checklist when the design asks for it
    fn render_financials(&self, record: &DocumentRecord, currency: &CurrencyNames) -> Element {
        let labels = &self.design.labels;
        let content = if self.design.show_checklist {
            checklist_block(record, &self.options)
        } else {
            ledger_block(record, labels, currency, &self.options)
        };

        self.section_block(Section::Financials, "section")
            .with_child(
                Element::new("h2")
                    .with_class("section-title")
                    .with_text(labels.financial_section.as_str()),
            )
            .with_child(content)
    }

    fn render_signatures(&self) -> Element {
        let labels = &self.design.labels;
        let mut footer = Element::new("footer").with_class("signatures");
        for role in [&labels.seller_role, &labels.buyer_role] {
            footer.push(
                Element::new("div")
                    .with_class("signature")
                    .with_child(Element::new("p").with_text(role.as_str()))
                    .with_child(Element::new("div").with_class("signature-line")),
            );
        }
        footer
    }

    /// Overlay of free texts positioned from the document center
    fn render_custom_texts(&self) -> Element {
        let mut layer = Element::new("div").with_class("custom-texts");
        for text in &self.design.custom_texts {
            let tag = Selection::Extra(text.id.clone());
            let color = match Color::from_hex(&text.color) {
                Ok(color) => color,
                Err(_) => {
                    log::warn!(
                        "custom text {} has invalid color {:?}, using text color",
                        text.id,
                        text.color
                    );
                    self.color_or_default(ColorToken::Text)
                }
            };

            let mut style = Style::new()
                .set("left", format!("calc(50% + {})", px(text.x)))
                .set("top", format!("calc(50% + {})", px(text.y)))
                .set("font-size", px(clamp_font_size(text.font_size)))
                .set("color", color.to_hex());
            if text.is_bold {
                style.insert("font-weight", "bold");
            }

            let mut element = Element::new("div")
                .with_class("block")
                .with_class("custom-text")
                .with_attr("data-element", tag.tag().unwrap_or_default())
                .with_style(style)
                .with_text(text.content.as_str());
            if self.is_selected(&tag) {
                element.add_class("selected");
            }
            layer.push(element);
        }
        layer
    }

    /// Selectable block translated by the section's position
    fn section_block(&self, section: Section, tag: &str) -> Element {
        let position = self.design.position(section);
        let mut element = Element::new(tag)
            .with_class("block")
            .with_class(&format!("block-{}", section.tag()))
            .with_attr("data-element", section.tag())
            .with_style(Style::new().set("transform", translate(position.x, position.y)));
        if self.is_selected(&Selection::from(section)) {
            element.add_class("selected");
        }
        element
    }

    fn is_selected(&self, candidate: &Selection) -> bool {
        self.selection == Some(candidate)
    }

    fn resolve_colors(&self) -> Colors {
        Colors {
            primary: self.color_or_default(ColorToken::Primary).to_hex(),
            secondary: self.color_or_default(ColorToken::Secondary).to_hex(),
            text: self.color_or_default(ColorToken::Text).to_hex(),
        }
    }

    /// Design color, or the palette default when it is not a valid hex color
    fn color_or_default(&self, token: ColorToken) -> Color {
        let value = self.design.colors.get(token);
        Color::from_hex(value).unwrap_or_else(|_| {
            log::warn!("invalid {token:?} color {value:?}, using default");
            let fallback = Palette::default();
            Color::from_hex(fallback.get(token)).unwrap_or_default()
        })
    }

    fn stylesheet(&self, colors: &Colors) -> Stylesheet {
        let base = clamp_font_size(self.design.font_size_base);
        let root = format!("#{PRINTABLE_ID}");
        let mut sheet = Stylesheet::new();

        sheet
            .rule(
                &root,
                Style::new()
                    .set("position", "relative")
                    .set("box-sizing", "border-box")
                    .set("width", "100%")
                    .set("min-height", "270mm")
                    .set("padding", "24px")
                    .set("background", "#ffffff")
                    .set("color", colors.text.as_str())
                    .set("font-family", "'Segoe UI', Arial, sans-serif")
                    .set("font-size", px(base)),
            )
            .rule(
                &format!("{root} .doc-header"),
                Style::new()
                    .set("display", "flex")
                    .set("justify-content", "space-between")
                    .set("align-items", "flex-start")
                    .set("border-bottom", format!("3px solid {}", colors.primary))
                    .set("margin-bottom", "24px"),
            )
            .rule(
                &format!("{root} h1"),
                Style::new()
                    .set("margin", "0")
                    .set("color", colors.primary.as_str())
                    .set("font-size", px(base * 2.0)),
            )
            .rule(
                &format!("{root} .block-title"),
                Style::new().set("text-align", html_core::Align::Right.as_css()),
            )
            .rule(
                &format!("{root} .subtitle, {root} .contact, {root} .field-label"),
                Style::new().set("color", colors.secondary.as_str()),
            )
            .rule(
                &format!("{root} .logo-initials"),
                Style::new()
                    .set("width", "80px")
                    .set("height", "80px")
                    .set("line-height", "80px")
                    .set("text-align", "center")
                    .set("border-radius", "50%")
                    .set("background", colors.primary.as_str())
                    .set("color", "#ffffff")
                    .set("font-size", px(base * 2.0))
                    .set("font-weight", "bold"),
            )
            .rule(
                &format!("{root} section"),
                Style::new().set("margin-bottom", "20px"),
            )
            .rule(
                &format!("{root} .section-title"),
                Style::new()
                    .set("color", colors.primary.as_str())
                    .set("font-size", px((base * 1.2).round()))
                    .set("border-bottom", format!("1px solid {}", colors.secondary))
                    .set("margin", "0 0 8px 0"),
            )
            .rule(
                &format!("{root} .field"),
                Style::new().set("display", "flex").set("gap", "8px"),
            )
            .rule(
                &format!("{root} .ledger-table"),
                Style::new()
                    .set("width", "100%")
                    .set("border-collapse", "collapse"),
            )
            .rule(
                &format!("{root} .ledger-table th, {root} .ledger-table td"),
                Style::new()
                    .set("padding", "6px 8px")
                    .set("border-bottom", "1px solid #e5e7eb")
                    .set("text-align", "left"),
            )
            .rule(
                &format!("{root} .amount"),
                Style::new().set("text-align", html_core::Align::Right.as_css()),
            )
            .rule(
                &format!("{root} .balance"),
                Style::new().set("font-weight", "bold"),
            )
            .rule(
                &format!("{root} .status-completed"),
                Style::new().set("color", "#16a34a"),
            )
            .rule(
                &format!("{root} .status-debt"),
                Style::new().set("color", "#dc2626"),
            )
            .rule(
                &format!("{root} .amount-words"),
                Style::new().set("font-style", "italic"),
            )
            .rule(
                &format!("{root} .checklist"),
                Style::new()
                    .set("display", "grid")
                    .set("grid-template-columns", "repeat(3, 1fr)")
                    .set("gap", "16px"),
            )
            .rule(
                &format!("{root} .checklist ul"),
                Style::new().set("list-style", "none").set("padding", "0"),
            )
            .rule(
                &format!("{root} .check-ok .check-glyph"),
                Style::new().set("color", "#16a34a"),
            )
            .rule(
                &format!("{root} .check-fail .check-glyph"),
                Style::new().set("color", "#dc2626"),
            )
            .rule(
                &format!("{root} .inspection-notes"),
                Style::new().set("grid-column", "1 / -1"),
            )
            .rule(
                &format!("{root} .signatures"),
                Style::new()
                    .set("display", "flex")
                    .set("justify-content", "space-between")
                    .set("margin-top", "48px"),
            )
            .rule(
                &format!("{root} .signature-line"),
                Style::new()
                    .set("width", "180px")
                    .set("height", "60px")
                    .set("border-bottom", format!("1px dashed {}", colors.secondary)),
            )
            .rule(
                &format!("{root} .custom-texts"),
                Style::new()
                    .set("position", "absolute")
                    .set("left", "0")
                    .set("top", "0")
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("pointer-events", "none"),
            )
            .rule(
                &format!("{root} .custom-text"),
                Style::new()
                    .set("position", "absolute")
                    .set("white-space", "pre-wrap")
                    .set("pointer-events", "auto"),
            )
            .media(
                "screen",
                vec![html_core::Rule::new(
                    &format!("{root} .selected"),
                    Style::new()
                        .set("outline", format!("2px dashed {}", colors.primary))
                        .set("outline-offset", "4px"),
                )],
            );
        sheet
    }
}

/// CSS font size never below 1px
fn clamp_font_size(size: f64) -> f64 {
    if size.is_nan() {
        1.0
    } else {
        size.max(1.0)
    }
}

/// A rendered document: element tree plus its stylesheet
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    title: String,
    root: Element,
    stylesheet: Stylesheet,
}

impl RenderedDocument {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The printable container
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Markup of the printable container, for mounting in a live page
    pub fn to_html(&self) -> String {
        self.root.to_html()
    }

    /// Self-contained HTML5 document for a detached print
    pub fn to_document(&self, page: PageSetup) -> HtmlDocument {
        let mut doc = HtmlDocument::new(&self.title);
        doc.stylesheet_mut()
            .set_page(page)
            .rule(
                "body",
                Style::new().set("margin", "0").set("background", "#ffffff"),
            )
            .extend(self.stylesheet.clone());
        doc.body_mut().push(self.root.clone());
        doc
    }
}
