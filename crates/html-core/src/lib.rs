//! HTML Core - Printable HTML document model
//!
//! This crate provides functionality for:
//! - Building an HTML element tree with typed attributes and inline styles
//! - Escaping every piece of text and attribute content on output
//! - Hex colors and CSS style declarations
//! - Self-contained documents with A4 `@page` rules and print-only stylesheets
//! - Embedding images (JPEG, PNG) as `data:` URIs
//!
//! # Example
//!
//! ```
//! use html_core::{Element, HtmlDocument, PageSetup, Style};
//!
//! let mut doc = HtmlDocument::new("Facture");
//! doc.stylesheet_mut().set_page(PageSetup::a4());
//! doc.body_mut().push(
//!     Element::new("div")
//!         .with_class("title")
//!         .with_style(Style::new().set("transform", html_core::translate(10, -5)))
//!         .with_text("FACTURE <N°1>"),
//! );
//! let html = doc.to_html();
//! assert!(html.contains("FACTURE &lt;N°1&gt;"));
//! ```

mod document;
mod embed;
mod node;
mod style;

pub use document::{CssBlock, HtmlDocument, PageSetup, PageSize, Rule, Stylesheet};
pub use embed::{calculate_scaled_dimensions, EmbeddedImage, ImageFormat, ImageScaleMode};
pub use node::{escape_attr, escape_text, Element, Node};
pub use style::{px, translate, Color, Style};

use thiserror::Error;

/// Errors that can occur while building HTML documents
#[derive(Debug, Error)]
pub enum HtmlError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for HTML operations
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// CSS `text-align` value
    pub fn as_css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_default() {
        assert_eq!(Align::default(), Align::Left);
    }

    #[test]
    fn test_align_css() {
        assert_eq!(Align::Center.as_css(), "center");
        assert_eq!(Align::Right.as_css(), "right");
    }
}
