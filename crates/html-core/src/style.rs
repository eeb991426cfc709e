//! CSS values: colors and inline style declarations

use crate::{HtmlError, Result};
use std::fmt;
use std::str::FromStr;

/// RGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create color from RGB values (0-255)
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || HtmlError::InvalidColor(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16).ok_or_else(invalid)? as u8;
                    *slot = v * 17;
                }
                Ok(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid())
                };
                Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl FromStr for Color {
    type Err = HtmlError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Ordered list of CSS declarations
///
/// Values are stripped of characters that could close the declaration or the
/// surrounding attribute, so operator-provided values cannot inject CSS.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    declarations: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declaration, replacing any previous value for the property
    pub fn set(mut self, property: &str, value: impl Into<String>) -> Self {
        self.insert(property, value);
        self
    }

    /// Set a declaration in place
    pub fn insert(&mut self, property: &str, value: impl Into<String>) {
        let value = sanitize_value(&value.into());
        match self.declarations.iter_mut().find(|(p, _)| p == property) {
            Some(existing) => existing.1 = value,
            None => self.declarations.push((property.to_string(), value)),
        }
    }

    /// Get a declaration value
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize as `prop: value; prop: value`
    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(|(p, v)| format!("{p}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn sanitize_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\\'))
        .collect()
}

/// Pixel length, e.g. `px(60)` -> `"60px"`
pub fn px(value: impl fmt::Display) -> String {
    format!("{value}px")
}

/// CSS translation, e.g. `translate(10, -5)` -> `"translate(10px, -5px)"`
pub fn translate(x: i32, y: i32) -> String {
    format!("translate({}, {})", px(x), px(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#1e3a8a").unwrap(), Color::rgb(0x1e, 0x3a, 0x8a));
        assert_eq!(Color::from_hex("fff").unwrap(), Color::white());
        assert_eq!(Color::from_hex("#F00").unwrap(), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_color_invalid() {
        assert!(Color::from_hex("red").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#12345g").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::rgb(255, 0, 16).to_hex(), "#ff0010");
        assert_eq!(Color::default().to_string(), "#000000");
    }

    #[test]
    fn test_style_set_replaces() {
        let style = Style::new()
            .set("color", "#000000")
            .set("padding-bottom", px(60))
            .set("color", "#ffffff");
        assert_eq!(style.to_css(), "color: #ffffff; padding-bottom: 60px");
        assert_eq!(style.get("padding-bottom"), Some("60px"));
    }

    #[test]
    fn test_style_value_sanitized() {
        let style = Style::new().set("color", "red; background: url(x)\"");
        assert_eq!(style.get("color"), Some("red background: url(x)"));
    }

    #[test]
    fn test_translate() {
        assert_eq!(translate(10, -5), "translate(10px, -5px)");
        assert_eq!(translate(0, 0), "translate(0px, 0px)");
    }
}
