//! Showroom profile and render options
//!
//! Loaded from JSON, every field optional:
//!
//! ```json
//! {
//!   "showroom": {
//!     "name": "Auto Prestige",
//!     "phone": "0555 12 34 56",
//!     "logo": { "path": "assets/logo.png" },
//!     "currency": { "symbol": "DA" }
//!   },
//!   "render": { "printDelayMs": 500 },
//!   "templatesPath": "templates.json"
//! }
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use fr_text::CurrencyNames;
use html_core::{EmbeddedImage, PageSetup};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Result, TemplateError};

/// Where the showroom logo comes from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LogoSource {
    /// PNG or JPEG file on disk
    Path(PathBuf),
    /// Base64 encoded PNG or JPEG bytes, optionally as a full data URI
    Base64(String),
}

impl LogoSource {
    /// Load and sniff the logo image
    pub fn load(&self) -> Result<EmbeddedImage> {
        let image = match self {
            LogoSource::Path(path) => EmbeddedImage::from_file(path)?,
            LogoSource::Base64(payload) => {
                let payload = payload
                    .split_once(";base64,")
                    .map(|(_, data)| data)
                    .unwrap_or(payload);
                let bytes = STANDARD
                    .decode(payload.trim())
                    .map_err(|e| TemplateError::InvalidTemplate(format!("Invalid logo: {e}")))?;
                EmbeddedImage::from_bytes(bytes)?
            }
        };
        Ok(image)
    }
}

/// Currency wording and symbol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrencyConfig {
    pub symbol: String,
    pub singular: String,
    pub plural: String,
    pub minor_singular: String,
    pub minor_plural: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        let dinar = CurrencyNames::dinar();
        Self {
            symbol: dinar.symbol,
            singular: dinar.major_singular,
            plural: dinar.major_plural,
            minor_singular: dinar.minor_singular,
            minor_plural: dinar.minor_plural,
        }
    }
}

impl CurrencyConfig {
    pub fn to_names(&self) -> CurrencyNames {
        CurrencyNames {
            symbol: self.symbol.clone(),
            major_singular: self.singular.clone(),
            major_plural: self.plural.clone(),
            minor_singular: self.minor_singular.clone(),
            minor_plural: self.minor_plural.clone(),
        }
    }
}

/// Showroom identity printed in document headers
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowroomProfile {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo: Option<LogoSource>,
    pub currency: CurrencyConfig,
}

impl ShowroomProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Parse a profile from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))
    }

    /// Load a profile from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load the configured logo, if any
    pub fn load_logo(&self) -> Result<Option<EmbeddedImage>> {
        self.logo.as_ref().map(LogoSource::load).transpose()
    }

    /// Up to two uppercase initials of the showroom name
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .filter(|c| c.is_alphanumeric())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "SR".to_string()
        } else {
            initials
        }
    }
}

/// Rendering and printing knobs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Delay before printing a detached document
    pub print_delay_ms: u64,
    /// Placeholder for missing names, addresses and identifiers
    pub missing_text: String,
    /// Placeholder for missing numbers and dates
    pub not_available: String,
    /// A4 page margin
    pub page_margin_mm: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            print_delay_ms: 500,
            missing_text: fr_text::MISSING_TEXT.to_string(),
            not_available: fr_text::NOT_AVAILABLE.to_string(),
            page_margin_mm: 10.0,
        }
    }
}

impl RenderOptions {
    pub fn print_delay(&self) -> Duration {
        Duration::from_millis(self.print_delay_ms)
    }

    pub fn page_setup(&self) -> PageSetup {
        PageSetup {
            margin_mm: self.page_margin_mm,
            ..PageSetup::a4()
        }
    }
}

/// Application configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub showroom: ShowroomProfile,
    pub render: RenderOptions,
    /// JSON file backing the template store
    pub templates_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_base64() -> String {
        let img = image::RgbImage::new(8, 4);
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_profile_defaults() {
        let profile = ShowroomProfile::from_json(r#"{ "name": "Auto Prestige" }"#).unwrap();
        assert_eq!(profile.currency.symbol, "DA");
        assert!(profile.logo.is_none());
        assert!(profile.load_logo().unwrap().is_none());
        assert_eq!(profile.initials(), "AP");
    }

    #[test]
    fn test_initials_fallback() {
        assert_eq!(ShowroomProfile::default().initials(), "SR");
        assert_eq!(ShowroomProfile::new("garage").initials(), "G");
    }

    #[test]
    fn test_logo_from_base64() {
        let json = format!(r#"{{ "logo": {{ "base64": "{}" }} }}"#, png_base64());
        let profile = ShowroomProfile::from_json(&json).unwrap();
        let logo = profile.load_logo().unwrap().unwrap();
        assert_eq!((logo.width, logo.height), (8, 4));
    }

    #[test]
    fn test_logo_from_data_uri() {
        let source = LogoSource::Base64(format!("data:image/png;base64,{}", png_base64()));
        assert!(source.load().is_ok());
    }

    #[test]
    fn test_invalid_logo() {
        let source = LogoSource::Base64("***".to_string());
        assert!(matches!(
            source.load(),
            Err(TemplateError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_app_config() {
        let config = AppConfig::from_json(
            r#"{
                "showroom": { "name": "Auto Prestige", "currency": { "symbol": "€", "singular": "euro", "plural": "euros" } },
                "render": { "printDelayMs": 800 },
                "templatesPath": "templates.json"
            }"#,
        )
        .unwrap();

        assert_eq!(config.render.print_delay(), Duration::from_millis(800));
        assert_eq!(config.render.missing_text, "Non spécifié");
        assert_eq!(config.showroom.currency.to_names().major_plural, "euros");
        assert_eq!(config.showroom.currency.minor_plural, "centimes");
        assert_eq!(config.templates_path, Some(PathBuf::from("templates.json")));
    }
}
