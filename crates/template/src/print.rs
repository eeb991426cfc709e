//! Print jobs
//!
//! Two strategies:
//! - in place: the live page is printed and a print-only stylesheet hides
//!   everything except the printable container
//! - detached: a self-contained HTML document is written into a freshly
//!   opened context and printed after a short delay, leaving time for the
//!   embedded logo to decode
//!
//! A job reports what happened through [`PrintStatus`]; a blocked context is
//! a status, never an error.

use html_core::Stylesheet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::RenderOptions;
use crate::renderer::{RenderedDocument, PRINTABLE_ID};
use crate::{Result, TemplateError};

/// Delay between opening a detached document and printing it
pub const DEFAULT_PRINT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintStrategy {
    /// Print the live page, showing only this container
    InPlace { container_id: String },
    /// Print a self-contained document in a new context
    Detached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintStatus {
    Pending,
    /// The new context opened and received the document
    Opened,
    /// The new context could not be opened (e.g. popup blocked)
    Blocked,
    Completed,
    Failed(String),
}

impl PrintStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, PrintStatus::Pending | PrintStatus::Opened)
    }
}

/// Platform print operations
pub trait PrintBackend {
    /// Open a new context holding `html`; `Ok(false)` when it cannot be opened
    fn open_window(&mut self, html: &str) -> Result<bool>;

    /// Print the context opened last, after `delay`
    fn print_window(&mut self, delay: Duration) -> Result<()>;

    /// Print the live context
    fn print_current(&mut self) -> Result<()>;
}

type StatusListener = Box<dyn FnMut(&PrintStatus)>;

/// One print request and its observable outcome
pub struct PrintJob {
    strategy: PrintStrategy,
    /// Detached document, or the print-only CSS for in-place printing
    payload: String,
    delay: Duration,
    history: Vec<PrintStatus>,
    listener: Option<StatusListener>,
}

impl PrintJob {
    /// Detached print of a rendered document
    ///
    /// The document is generated now; later design edits do not reach it.
    pub fn detached(rendered: &RenderedDocument, options: &RenderOptions) -> Self {
        let html = rendered.to_document(options.page_setup()).to_html();
        Self::new(PrintStrategy::Detached, html, options.print_delay())
    }

    /// In-place print of the live printable container
    pub fn in_place(container_id: &str) -> Self {
        let css = Stylesheet::print_only(container_id).to_css();
        Self::new(
            PrintStrategy::InPlace {
                container_id: container_id.to_string(),
            },
            css,
            Duration::ZERO,
        )
    }

    /// In-place print of the renderer's container
    pub fn in_place_default() -> Self {
        Self::in_place(PRINTABLE_ID)
    }

    fn new(strategy: PrintStrategy, payload: String, delay: Duration) -> Self {
        Self {
            strategy,
            payload,
            delay,
            history: vec![PrintStatus::Pending],
            listener: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Call `listener` on every status change
    pub fn on_status<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&PrintStatus) + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn strategy(&self) -> &PrintStrategy {
        &self.strategy
    }

    /// The detached document, or the print-only stylesheet for in-place jobs
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn status(&self) -> &PrintStatus {
        // history always starts with Pending
        self.history.last().unwrap_or(&PrintStatus::Pending)
    }

    pub fn history(&self) -> &[PrintStatus] {
        &self.history
    }

    fn transition(&mut self, status: PrintStatus) {
        log::debug!("print job {:?} -> {:?}", self.status(), status);
        if let Some(listener) = self.listener.as_mut() {
            listener(&status);
        }
        self.history.push(status);
    }

    /// Run the job once; later calls return the final status unchanged
    pub fn run(&mut self, backend: &mut dyn PrintBackend) -> PrintStatus {
        if *self.status() != PrintStatus::Pending {
            log::debug!("print job already ran: {:?}", self.status());
            return self.status().clone();
        }

        match self.strategy.clone() {
            PrintStrategy::InPlace { container_id } => {
                log::debug!("printing #{container_id} in place");
                match backend.print_current() {
                    Ok(()) => self.transition(PrintStatus::Completed),
                    Err(e) => self.transition(PrintStatus::Failed(e.to_string())),
                }
            }
            PrintStrategy::Detached => match backend.open_window(&self.payload) {
                Ok(true) => {
                    self.transition(PrintStatus::Opened);
                    match backend.print_window(self.delay) {
                        Ok(()) => self.transition(PrintStatus::Completed),
                        Err(e) => self.transition(PrintStatus::Failed(e.to_string())),
                    }
                }
                Ok(false) => {
                    log::warn!("print context could not be opened");
                    self.transition(PrintStatus::Blocked);
                }
                Err(e) => self.transition(PrintStatus::Failed(e.to_string())),
            },
        }
        self.status().clone()
    }
}

/// Backend writing detached documents to a directory
///
/// Stands in for the browser on native targets: each opened context becomes
/// an `.html` file, printing marks it as spooled.
#[derive(Debug)]
pub struct SpoolBackend {
    dir: PathBuf,
    opened: Vec<PathBuf>,
    printed: Vec<PathBuf>,
    in_place_prints: usize,
}

impl SpoolBackend {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            opened: Vec::new(),
            printed: Vec::new(),
            in_place_prints: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order
    pub fn opened(&self) -> &[PathBuf] {
        &self.opened
    }

    pub fn printed(&self) -> &[PathBuf] {
        &self.printed
    }

    pub fn in_place_prints(&self) -> usize {
        self.in_place_prints
    }
}

impl PrintBackend for SpoolBackend {
    fn open_window(&mut self, html: &str) -> Result<bool> {
        let path = self
            .dir
            .join(format!("document-{:03}.html", self.opened.len() + 1));
        fs::write(&path, html)?;
        log::debug!("wrote {} ({} bytes)", path.display(), html.len());
        self.opened.push(path);
        Ok(true)
    }

    fn print_window(&mut self, delay: Duration) -> Result<()> {
        let path = self
            .opened
            .last()
            .cloned()
            .ok_or_else(|| TemplateError::PrintError("no open print context".to_string()))?;
        log::info!("spooled {} (delay {:?})", path.display(), delay);
        self.printed.push(path);
        Ok(())
    }

    fn print_current(&mut self) -> Result<()> {
        self.in_place_prints += 1;
        Ok(())
    }
}
