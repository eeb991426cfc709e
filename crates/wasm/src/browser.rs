//! Browser print backend and console logger

use std::time::Duration;
use template::{PrintBackend, TemplateError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Window};

/// Id of the `<style>` element holding the in-place print rules
pub const PRINT_STYLE_ID: &str = "print-only-style";

fn js_error(context: &str, err: JsValue) -> TemplateError {
    TemplateError::PrintError(format!("{context}: {err:?}"))
}

/// Prints through `window.open` / `window.print`
pub struct BrowserBackend {
    window: Window,
    opened: Option<Window>,
}

impl BrowserBackend {
    pub fn new() -> template::Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| TemplateError::PrintError("no browser window".to_string()))?;
        Ok(Self {
            window,
            opened: None,
        })
    }

    /// Install (or replace) the print-only stylesheet in the live page
    pub fn install_print_style(&self, css: &str) -> template::Result<()> {
        let document = self
            .window
            .document()
            .ok_or_else(|| TemplateError::PrintError("no document".to_string()))?;

        let style = match document.get_element_by_id(PRINT_STYLE_ID) {
            Some(existing) => existing,
            None => {
                let style = document
                    .create_element("style")
                    .map_err(|e| js_error("create style", e))?;
                style.set_id(PRINT_STYLE_ID);
                let head = document
                    .head()
                    .ok_or_else(|| TemplateError::PrintError("no head element".to_string()))?;
                head.append_child(&style)
                    .map_err(|e| js_error("append style", e))?;
                style
            }
        };
        style.set_text_content(Some(css));
        Ok(())
    }
}

impl PrintBackend for BrowserBackend {
    fn open_window(&mut self, html: &str) -> template::Result<bool> {
        let opened = match self.window.open_with_url_and_target("", "_blank") {
            Ok(Some(window)) => window,
            // popup blockers either throw or return null
            Ok(None) | Err(_) => return Ok(false),
        };

        let document = opened
            .document()
            .ok_or_else(|| TemplateError::PrintError("opened window has no document".to_string()))?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| TemplateError::PrintError("not an HTML document".to_string()))?;

        document
            .write(&js_sys::Array::of1(&JsValue::from_str(html)))
            .map_err(|e| js_error("document.write", e))?;
        document.close().map_err(|e| js_error("document.close", e))?;

        self.opened = Some(opened);
        Ok(true)
    }

    fn print_window(&mut self, delay: Duration) -> template::Result<()> {
        let target = self
            .opened
            .clone()
            .ok_or_else(|| TemplateError::PrintError("no open print context".to_string()))?;

        let callback = Closure::once_into_js(move || {
            if let Err(e) = target.print() {
                log::warn!("print failed: {e:?}");
            }
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
            .map_err(|e| js_error("setTimeout", e))?;
        Ok(())
    }

    fn print_current(&mut self) -> template::Result<()> {
        self.window.print().map_err(|e| js_error("print", e))
    }
}

/// `log` records forwarded to the browser console
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&message),
            log::Level::Warn => web_sys::console::warn_1(&message),
            log::Level::Info => web_sys::console::info_1(&message),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger; later calls only change the level
pub fn init_logger(level: log::LevelFilter) {
    // set_logger fails once a logger is installed, which is fine here
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
