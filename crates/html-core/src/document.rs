//! Self-contained HTML documents and print stylesheets

use crate::node::{escape_text, Element};
use crate::style::Style;

/// Paper size for the `@page` rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageSize {
    #[default]
    A4,
    A5,
    Letter,
}

impl PageSize {
    pub fn as_css(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::Letter => "letter",
        }
    }
}

/// `@page` configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub size: PageSize,
    /// Page margin in millimetres
    pub margin_mm: f32,
}

impl PageSetup {
    /// A4 with a 10mm margin
    pub fn a4() -> Self {
        Self {
            size: PageSize::A4,
            margin_mm: 10.0,
        }
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

/// A CSS rule: selector plus declarations
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub style: Style,
}

impl Rule {
    pub fn new(selector: &str, style: Style) -> Self {
        Self {
            selector: selector.to_string(),
            style,
        }
    }

    fn write_css(&self, out: &mut String, indent: &str) {
        if self.style.is_empty() {
            out.push_str(&format!("{indent}{} {{ }}\n", self.selector));
            return;
        }
        out.push_str(&format!(
            "{indent}{} {{ {}; }}\n",
            self.selector,
            self.style.to_css()
        ));
    }
}

/// Top-level stylesheet entry
#[derive(Debug, Clone, PartialEq)]
pub enum CssBlock {
    Rule(Rule),
    Page(PageSetup),
    Media { query: String, rules: Vec<Rule> },
}

/// Stylesheet embedded in a document's `<style>` element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    blocks: Vec<CssBlock>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain rule
    pub fn rule(&mut self, selector: &str, style: Style) -> &mut Self {
        self.blocks.push(CssBlock::Rule(Rule::new(selector, style)));
        self
    }

    /// Set the `@page` rule (replaces an existing one)
    pub fn set_page(&mut self, page: PageSetup) -> &mut Self {
        self.blocks.retain(|b| !matches!(b, CssBlock::Page(_)));
        self.blocks.insert(0, CssBlock::Page(page));
        self
    }

    /// Add a `@media` block
    pub fn media(&mut self, query: &str, rules: Vec<Rule>) -> &mut Self {
        self.blocks.push(CssBlock::Media {
            query: query.to_string(),
            rules,
        });
        self
    }

    /// Append every block of another stylesheet
    pub fn extend(&mut self, other: Stylesheet) -> &mut Self {
        for block in other.blocks {
            match block {
                CssBlock::Page(page) => {
                    self.set_page(page);
                }
                other => self.blocks.push(other),
            }
        }
        self
    }

    pub fn blocks(&self) -> &[CssBlock] {
        &self.blocks
    }

    /// Print-only rules that hide everything except one container
    ///
    /// Used when the live page is printed as-is: the container keeps its
    /// on-screen layout and is moved to the page origin.
    pub fn print_only(container_id: &str) -> Self {
        let mut sheet = Self::new();
        sheet.media(
            "print",
            vec![
                Rule::new("body *", Style::new().set("visibility", "hidden")),
                Rule::new(
                    &format!("#{container_id}, #{container_id} *"),
                    Style::new().set("visibility", "visible"),
                ),
                Rule::new(
                    &format!("#{container_id}"),
                    Style::new()
                        .set("position", "absolute")
                        .set("left", "0")
                        .set("top", "0")
                        .set("width", "100%"),
                ),
                Rule::new(
                    "*",
                    Style::new()
                        .set("-webkit-print-color-adjust", "exact")
                        .set("print-color-adjust", "exact"),
                ),
            ],
        );
        sheet
    }

    /// Serialize to CSS text
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                CssBlock::Rule(rule) => rule.write_css(&mut out, ""),
                CssBlock::Page(page) => out.push_str(&format!(
                    "@page {{ size: {}; margin: {}mm; }}\n",
                    page.size.as_css(),
                    page.margin_mm
                )),
                CssBlock::Media { query, rules } => {
                    out.push_str(&format!("@media {query} {{\n"));
                    for rule in rules {
                        rule.write_css(&mut out, "  ");
                    }
                    out.push_str("}\n");
                }
            }
        }
        out
    }
}

/// A complete HTML5 document
///
/// Everything the document needs is inside it: styles are inline in the
/// head and images are embedded, so it can be written into a fresh browsing
/// context with no reference to the application that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlDocument {
    title: String,
    lang: String,
    stylesheet: Stylesheet,
    body: Element,
}

impl HtmlDocument {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lang: "fr".to_string(),
            stylesheet: Stylesheet::new(),
            body: Element::new("body"),
        }
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    pub fn stylesheet_mut(&mut self) -> &mut Stylesheet {
        &mut self.stylesheet
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Element {
        &mut self.body
    }

    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        out.push_str(&format!("<html lang=\"{}\">\n", escape_text(&self.lang)));
        out.push_str("<head>\n<meta charset=\"UTF-8\"/>\n");
        out.push_str(&format!("<title>{}</title>\n", escape_text(&self.title)));
        out.push_str("<style>\n");
        out.push_str(&self.stylesheet.to_css());
        out.push_str("</style>\n</head>\n");
        out.push_str(&self.body.to_html());
        out.push_str("\n</html>\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_rule() {
        let mut sheet = Stylesheet::new();
        sheet.set_page(PageSetup::a4());
        assert_eq!(sheet.to_css(), "@page { size: A4; margin: 10mm; }\n");
    }

    #[test]
    fn test_set_page_replaces() {
        let mut sheet = Stylesheet::new();
        sheet.rule("body", Style::new().set("margin", "0"));
        sheet.set_page(PageSetup::a4());
        sheet.set_page(PageSetup {
            size: PageSize::A5,
            margin_mm: 5.0,
        });
        let pages = sheet
            .blocks()
            .iter()
            .filter(|b| matches!(b, CssBlock::Page(_)))
            .count();
        assert_eq!(pages, 1);
        assert!(sheet.to_css().starts_with("@page { size: A5; margin: 5mm; }"));
    }

    #[test]
    fn test_print_only_rules() {
        let css = Stylesheet::print_only("printable").to_css();
        assert!(css.starts_with("@media print {\n"));
        assert!(css.contains("  body * { visibility: hidden; }"));
        assert!(css.contains("#printable, #printable * { visibility: visible; }"));
    }

    #[test]
    fn test_document_shell() {
        let mut doc = HtmlDocument::new("Reçu <1>");
        doc.body_mut().push(Element::new("p").with_text("ok"));
        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"fr\">"));
        assert!(html.contains("<title>Reçu &lt;1&gt;</title>"));
        assert!(html.contains("<body><p>ok</p></body>"));
    }
}
