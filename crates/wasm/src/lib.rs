//! WASM bindings for the showroom document designer
//!
//! This crate provides JavaScript-friendly API for:
//! - Editing a document design interactively
//! - Rendering a design with a business record
//! - Printing in place or through a new browser window
//! - French amount and date formatting
//! - The logged-in user session
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { DocumentDesigner, Session } from 'showroom-docs-wasm';
//!
//! await init();
//!
//! Session.login("Amina");
//!
//! const designer = new DocumentDesigner("sale");
//! designer.setProfile(profileJson);
//! designer.setRecord(saleJson);
//!
//! // Click on a rendered block
//! designer.selectElement(event.target.closest("[data-element]").dataset.element);
//! designer.setPosition(10, -5);
//! container.innerHTML = designer.renderHtml();
//!
//! // Print
//! const status = designer.printDocument(); // "completed" | "blocked" | ...
//! ```

mod browser;

use template::{
    ColorToken, Designer, DocumentKind, DocumentRecord, LabelKey, MemoryTemplateStore, PrintJob,
    PrintStatus, RenderOptions, RenderedDocument, Selection, SessionContext, ShowroomProfile,
    TemplateStore,
};
use wasm_bindgen::prelude::*;

pub use browser::{init_logger, BrowserBackend, PRINT_STYLE_ID};

fn to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_logger(log::LevelFilter::Info);
}

/// Change the console log level ("error", "warn", "info", "debug", "trace")
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter: log::LevelFilter = level.parse().map_err(to_js)?;
    init_logger(filter);
    Ok(())
}

fn status_name(status: &PrintStatus) -> String {
    match status {
        PrintStatus::Pending => "pending".to_string(),
        PrintStatus::Opened => "opened".to_string(),
        PrintStatus::Blocked => "blocked".to_string(),
        PrintStatus::Completed => "completed".to_string(),
        PrintStatus::Failed(msg) => format!("failed: {msg}"),
    }
}

/// French formatting utilities
#[wasm_bindgen]
pub struct FrFormatter;

#[wasm_bindgen]
impl FrFormatter {
    /// Format an integer as French words
    ///
    /// @param n - Number to format
    /// @returns French text (e.g., "quarante-deux")
    #[wasm_bindgen(js_name = formatNumber)]
    pub fn format_number(n: i64) -> String {
        fr_text::format_number_words(n)
    }

    /// Format an amount in words, in dinars
    ///
    /// @param amount - Amount in dinars
    /// @returns French text (e.g., "trente-cinq mille dinars")
    #[wasm_bindgen(js_name = formatAmountWords)]
    pub fn format_amount_words(amount: f64) -> String {
        fr_text::format_amount_words(amount, &fr_text::CurrencyNames::dinar())
    }

    /// Format a money amount
    ///
    /// @param amount - Amount
    /// @param symbol - Currency symbol (e.g., "DA")
    /// @returns Formatted amount (e.g., "35 000,00 DA")
    #[wasm_bindgen(js_name = formatMoney)]
    pub fn format_money(amount: f64, symbol: &str) -> String {
        fr_text::format_money(amount, symbol)
    }

    /// Format an ISO date as dd/mm/yyyy
    ///
    /// @param iso - Date as YYYY-MM-DD
    #[wasm_bindgen(js_name = formatDateShort)]
    pub fn format_date_short(iso: &str) -> Result<String, JsValue> {
        let date = fr_text::parse_iso_date(iso).map_err(to_js)?;
        Ok(fr_text::format_date_short(date))
    }

    /// Format an ISO date in long form
    ///
    /// @param iso - Date as YYYY-MM-DD
    /// @returns French date (e.g., "17 octobre 2026")
    #[wasm_bindgen(js_name = formatDateLong)]
    pub fn format_date_long(iso: &str) -> Result<String, JsValue> {
        let date = fr_text::parse_iso_date(iso).map_err(to_js)?;
        Ok(fr_text::format_date_long(date))
    }

    /// Render a float with formatting pattern
    ///
    /// @param format - Format pattern (e.g., "# ###,##")
    /// @param n - Number to format
    /// @returns Formatted string
    #[wasm_bindgen(js_name = renderFloat)]
    pub fn render_float(format: &str, n: f64) -> String {
        fr_text::render_float(format, n)
    }
}

/// The process-wide user session
#[wasm_bindgen]
pub struct Session;

#[wasm_bindgen]
impl Session {
    pub fn login(display_name: &str) {
        SessionContext::global().login(display_name);
    }

    pub fn logout() {
        SessionContext::global().logout();
    }

    #[wasm_bindgen(js_name = currentUser)]
    pub fn current_user() -> Option<String> {
        SessionContext::global().current_user_display_name()
    }
}

/// Saved templates for the current page
#[wasm_bindgen]
#[derive(Default)]
pub struct TemplateLibrary {
    store: MemoryTemplateStore,
}

#[wasm_bindgen]
impl TemplateLibrary {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TemplateLibrary {
        TemplateLibrary::default()
    }

    /// List templates, optionally for one document kind
    ///
    /// @param kind - "sale", "purchase", "inspection", "receipt", "expense" or undefined
    /// @returns Array of templates
    pub fn list(&self, kind: Option<String>) -> Result<JsValue, JsValue> {
        let kind = kind
            .map(|k| k.parse::<DocumentKind>())
            .transpose()
            .map_err(to_js)?;
        let templates = self.store.list(kind).map_err(to_js)?;
        Ok(serde_wasm_bindgen::to_value(&templates)?)
    }

    /// Template as JSON
    pub fn get(&self, id: &str) -> Result<String, JsValue> {
        let template = self.store.get(id).map_err(to_js)?;
        serde_json::to_string(&template).map_err(to_js)
    }

    pub fn remove(&mut self, id: &str) -> Result<(), JsValue> {
        self.store.delete(id).map_err(to_js)
    }
}

/// Interactive document designer
#[wasm_bindgen]
pub struct DocumentDesigner {
    designer: Designer,
    profile: ShowroomProfile,
    logo: Option<html_core::EmbeddedImage>,
    record: Option<DocumentRecord>,
    options: RenderOptions,
}

#[wasm_bindgen]
impl DocumentDesigner {
    /// Create a designer with the default design of a document kind
    ///
    /// @param kind - "sale", "purchase", "inspection", "receipt" or "expense"
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str) -> Result<DocumentDesigner, JsValue> {
        let kind: DocumentKind = kind.parse().map_err(to_js)?;
        Ok(Self::from_designer(Designer::new(kind)))
    }

    /// Create a designer from a saved template
    ///
    /// @param json - Template JSON string
    #[wasm_bindgen(js_name = fromTemplateJson)]
    pub fn from_template_json(json: &str) -> Result<DocumentDesigner, JsValue> {
        let template = template::parse_template(json).map_err(to_js)?;
        Ok(Self::from_designer(Designer::from_template(&template)))
    }

    fn from_designer(designer: Designer) -> Self {
        Self {
            designer,
            profile: ShowroomProfile::default(),
            logo: None,
            record: None,
            options: RenderOptions::default(),
        }
    }

    /// Set the showroom profile (header, logo, currency)
    ///
    /// @param json - Profile JSON string
    #[wasm_bindgen(js_name = setProfile)]
    pub fn set_profile(&mut self, json: &str) -> Result<(), JsValue> {
        let profile = ShowroomProfile::from_json(json).map_err(to_js)?;
        self.logo = profile.load_logo().map_err(to_js)?;
        self.profile = profile;
        Ok(())
    }

    /// Set render options (print delay, placeholders)
    #[wasm_bindgen(js_name = setRenderOptions)]
    pub fn set_render_options(&mut self, json: &str) -> Result<(), JsValue> {
        self.options = serde_json::from_str(json).map_err(to_js)?;
        Ok(())
    }

    /// Set the record to render
    ///
    /// @param json - Record JSON string with a "kind" field
    #[wasm_bindgen(js_name = setRecord)]
    pub fn set_record(&mut self, json: &str) -> Result<(), JsValue> {
        self.record = Some(template::parse_record(json).map_err(to_js)?);
        Ok(())
    }

    /// Select a block by its `data-element` tag
    #[wasm_bindgen(js_name = selectElement)]
    pub fn select_element(&mut self, tag: &str) {
        self.designer.select_tag(tag);
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.designer.clear_selection();
    }

    /// `data-element` tag of the selected block, if any
    #[wasm_bindgen(js_name = selectedElement)]
    pub fn selected_element(&self) -> Option<String> {
        self.designer.selection().tag()
    }

    /// [min, max] of the position sliders for the selection
    #[wasm_bindgen(js_name = sliderRange)]
    pub fn slider_range(&self) -> Vec<i32> {
        let (min, max) = self.designer.selection().slider_range();
        vec![min, max]
    }

    /// [x, y] of the selected block, if any
    #[wasm_bindgen(js_name = selectedPosition)]
    pub fn selected_position(&self) -> Option<Vec<i32>> {
        self.designer.selected_position().map(|p| vec![p.x, p.y])
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, x: i32, y: i32) -> bool {
        self.designer.set_position(x, y)
    }

    pub fn nudge(&mut self, dx: i32, dy: i32) -> bool {
        self.designer.nudge(dx, dy)
    }

    /// @param key - Label key (e.g., "title", "sellerRole")
    #[wasm_bindgen(js_name = setLabel)]
    pub fn set_label(&mut self, key: &str, value: &str) -> Result<(), JsValue> {
        let key: LabelKey = key.parse().map_err(to_js)?;
        self.designer.set_label(key, value);
        Ok(())
    }

    /// @param token - "primary", "secondary" or "text"
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, token: &str, value: &str) -> Result<(), JsValue> {
        let token = match token {
            "primary" => ColorToken::Primary,
            "secondary" => ColorToken::Secondary,
            "text" => ColorToken::Text,
            other => return Err(JsValue::from_str(&format!("Unknown color token: {other}"))),
        };
        self.designer.set_color(token, value);
        Ok(())
    }

    #[wasm_bindgen(js_name = setFontSizeBase)]
    pub fn set_font_size_base(&mut self, size: f64) {
        self.designer.set_font_size_base(size);
    }

    #[wasm_bindgen(js_name = setHeaderPadding)]
    pub fn set_header_padding(&mut self, padding: i32) {
        self.designer.set_header_padding(padding);
    }

    /// @returns the new showChecklist value
    #[wasm_bindgen(js_name = toggleChecklist)]
    pub fn toggle_checklist(&mut self) -> bool {
        self.designer.toggle_checklist()
    }

    /// Add a free text and select it
    ///
    /// @returns id of the new text
    #[wasm_bindgen(js_name = addText)]
    pub fn add_text(&mut self) -> String {
        self.designer.add_text()
    }

    #[wasm_bindgen(js_name = setTextContent)]
    pub fn set_text_content(&mut self, content: &str) -> bool {
        self.designer.set_text_content(content)
    }

    #[wasm_bindgen(js_name = setTextFontSize)]
    pub fn set_text_font_size(&mut self, size: f64) -> bool {
        self.designer.set_text_font_size(size)
    }

    #[wasm_bindgen(js_name = setTextColor)]
    pub fn set_text_color(&mut self, color: &str) -> bool {
        self.designer.set_text_color(color)
    }

    #[wasm_bindgen(js_name = setTextBold)]
    pub fn set_text_bold(&mut self, bold: bool) -> bool {
        self.designer.set_text_bold(bold)
    }

    /// Delete the selected free text
    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> bool {
        self.designer.delete_selected_text().is_some()
    }

    #[wasm_bindgen(js_name = deleteText)]
    pub fn delete_text(&mut self, id: &str) -> bool {
        self.designer.delete_text(id).is_some()
    }

    /// Current design as JSON
    #[wasm_bindgen(js_name = designJson)]
    pub fn design_json(&self) -> Result<String, JsValue> {
        template::design_to_json(self.designer.design()).map_err(to_js)
    }

    /// Current design as a JS object
    pub fn design(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.designer.design())?)
    }

    fn render(&self, selection: &Selection) -> Result<RenderedDocument, JsValue> {
        let record = self
            .record
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No record loaded. Call setRecord() first."))?;
        let renderer = template::DocumentRenderer::new(self.designer.design(), &self.profile)
            .with_selection(selection)
            .with_options(self.options.clone());
        let renderer = match &self.logo {
            Some(logo) => renderer.with_logo(logo),
            None => renderer,
        };
        Ok(renderer.render(record))
    }

    /// Preview markup with the selection highlighted
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(&self) -> Result<String, JsValue> {
        Ok(self.render(self.designer.selection())?.to_html())
    }

    /// Stylesheet of the preview
    #[wasm_bindgen(js_name = renderCss)]
    pub fn render_css(&self) -> Result<String, JsValue> {
        Ok(self.render(self.designer.selection())?.stylesheet().to_css())
    }

    /// Print a self-contained copy in a new window
    ///
    /// @returns "completed", "blocked" or "failed: <reason>"
    #[wasm_bindgen(js_name = printDocument)]
    pub fn print_document(&self) -> Result<String, JsValue> {
        // no selection outline on paper
        let rendered = self.render(&Selection::None)?;
        let mut backend = BrowserBackend::new().map_err(to_js)?;
        let mut job = PrintJob::detached(&rendered, &self.options);
        Ok(status_name(&job.run(&mut backend)))
    }

    /// Print the live page, showing only the rendered document
    #[wasm_bindgen(js_name = printInPlace)]
    pub fn print_in_place(&self) -> Result<String, JsValue> {
        let mut backend = BrowserBackend::new().map_err(to_js)?;
        let mut job = PrintJob::in_place_default();
        backend.install_print_style(job.payload()).map_err(to_js)?;
        Ok(status_name(&job.run(&mut backend)))
    }

    /// Save the design under a name for the logged-in user
    ///
    /// @returns the saved template as JSON
    #[wasm_bindgen(js_name = saveTemplate)]
    pub fn save_template(
        &self,
        name: &str,
        library: &mut TemplateLibrary,
    ) -> Result<String, JsValue> {
        let template = self
            .designer
            .save_as_template(name, &mut library.store, SessionContext::global())
            .map_err(to_js)?;
        serde_json::to_string(&template).map_err(to_js)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_fr_formatter() {
        assert_eq!(FrFormatter::format_number(42), "quarante-deux");
        assert_eq!(FrFormatter::format_money(35000.0, "DA"), "35 000,00 DA");
        assert_eq!(
            FrFormatter::format_date_long("2026-03-01").unwrap(),
            "1er mars 2026"
        );
    }

    #[wasm_bindgen_test]
    fn test_render_float() {
        assert_eq!(FrFormatter::render_float("#,###.##", 1234.56), "1,234.56");
    }

    #[wasm_bindgen_test]
    fn test_designer_flow() {
        let mut designer = DocumentDesigner::new("sale").unwrap();
        designer
            .set_record(r#"{ "kind": "sale", "totalPrice": 35000, "amountPaid": 35000 }"#)
            .unwrap();

        designer.select_element("logo");
        assert_eq!(designer.slider_range(), vec![-300, 300]);
        assert!(designer.set_position(10, -5));

        let id = designer.add_text();
        assert_eq!(designer.selected_element(), Some(format!("extra:{id}")));
        assert!(designer.delete_selected());
        assert_eq!(designer.selected_element(), None);

        let html = designer.render_html().unwrap();
        assert!(html.contains("translate(10px, -5px)"));
        assert!(html.contains("status-completed"));
    }

    #[wasm_bindgen_test]
    fn test_status_names() {
        assert_eq!(status_name(&PrintStatus::Blocked), "blocked");
        assert_eq!(
            status_name(&PrintStatus::Failed("boom".to_string())),
            "failed: boom"
        );
    }
}
