//! FR Text - French formatting for printed business documents
//!
//! This crate provides:
//! - Money formatting with French separators ("35 000,00 DA")
//! - Amounts in words ("trente-cinq mille dinars")
//! - Short and long French dates
//! - The placeholder strings shown for missing data
//!
//! # Example
//!
//! ```
//! use fr_text::{CurrencyNames, FrFormatter};
//!
//! let dinar = CurrencyNames::dinar();
//! assert_eq!(FrFormatter::format_money(35000.0, &dinar), "35 000,00 DA");
//! assert_eq!(FrFormatter::format_number(42), "quarante-deux");
//! ```

mod formatter;

pub use formatter::{CurrencyNames, FrFormatter};

// Re-export commonly used formatting functions
pub use formatter::{
    format_amount_words, format_date_long, format_date_short, format_money, format_number_words,
    parse_iso_date, render_float,
};

use thiserror::Error;

/// Placeholder for missing names, addresses and identifiers
pub const MISSING_TEXT: &str = "Non spécifié";

/// Placeholder for missing numbers and dates
pub const NOT_AVAILABLE: &str = "N/A";

/// Errors that can occur during French text processing
#[derive(Debug, Error)]
pub enum FrTextError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for French text operations
pub type Result<T> = std::result::Result<T, FrTextError>;
