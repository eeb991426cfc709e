//! Template Engine - document designs, rendering and printing
//!
//! This crate provides:
//! - Design JSON schema types and persisted invoice templates
//! - Typed business records (sale, purchase, inspection, receipt, expense)
//! - Rendering of a design + record into an HTML element tree
//! - The interactive designer state machine
//! - Print jobs with pluggable backends
//! - Template stores and the session context used by write paths
//!
//! # Example
//!
//! ```ignore
//! use template::{parse_record, Design, DocumentKind, DocumentRenderer, ShowroomProfile};
//!
//! let profile = ShowroomProfile::from_file("showroom.json")?;
//! let record = parse_record(record_json)?;
//! let design = Design::for_kind(record.kind());
//! let html = DocumentRenderer::new(&design, &profile).render(&record).to_html();
//! ```

pub mod blocks;
pub mod config;
pub mod designer;
pub mod parser;
pub mod print;
pub mod records;
mod renderer;
mod schema;
pub mod session;
pub mod store;

pub use config::{AppConfig, CurrencyConfig, LogoSource, RenderOptions, ShowroomProfile};
pub use designer::{Designer, Selection};
pub use parser::{design_to_json, parse_design, parse_record, parse_template};
pub use print::{
    PrintBackend, PrintJob, PrintStatus, PrintStrategy, SpoolBackend, DEFAULT_PRINT_DELAY,
};
pub use records::*;
pub use renderer::{DocumentRenderer, RenderedDocument, PRINTABLE_ID};
pub use schema::*;
pub use session::SessionContext;
pub use store::{JsonFileTemplateStore, MemoryTemplateStore, TemplateStore};

// Re-export the embedded schema
pub use schema::DESIGN_SCHEMA;

use thiserror::Error;

/// Errors that can occur during template processing
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse template: {0}")]
    ParseError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("Print error: {0}")]
    PrintError(String),

    #[error("HTML error: {0}")]
    Html(#[from] html_core::HtmlError),

    #[error("Date error: {0}")]
    Date(#[from] fr_text::FrTextError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
