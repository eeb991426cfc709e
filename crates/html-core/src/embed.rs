//! Image embedding for self-contained documents

use crate::node::Element;
use crate::style::{px, Style};
use crate::{HtmlError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageReader;
use std::io::Cursor;
use std::path::Path;

impl From<image::ImageError> for HtmlError {
    fn from(err: image::ImageError) -> Self {
        HtmlError::ImageError(err.to_string())
    }
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    fn as_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// Image scaling mode when fitting an image into a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageScaleMode {
    /// Stretch to exact dimensions
    Stretch,
    /// Scale proportionally based on width, auto-calculate height
    FitWidth,
    /// Scale proportionally based on height, auto-calculate width
    FitHeight,
    /// Fit within bounding box, preserving aspect ratio
    #[default]
    FitBox,
}

/// Calculate display dimensions based on scaling mode
///
/// # Returns
/// (actual_width, actual_height) in pixels
pub fn calculate_scaled_dimensions(
    original_width: u32,
    original_height: u32,
    target_width: f64,
    target_height: f64,
    mode: ImageScaleMode,
) -> (f64, f64) {
    if original_width == 0 || original_height == 0 {
        return (target_width, target_height);
    }

    match mode {
        ImageScaleMode::Stretch => (target_width, target_height),
        ImageScaleMode::FitWidth => {
            let aspect = original_height as f64 / original_width as f64;
            (target_width, target_width * aspect)
        }
        ImageScaleMode::FitHeight => {
            let aspect = original_width as f64 / original_height as f64;
            (target_height * aspect, target_height)
        }
        ImageScaleMode::FitBox => {
            let width_ratio = target_width / original_width as f64;
            let height_ratio = target_height / original_height as f64;
            let scale = width_ratio.min(height_ratio);
            (
                original_width as f64 * scale,
                original_height as f64 * scale,
            )
        }
    }
}

/// An image carried inside the document as a `data:` URI
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl EmbeddedImage {
    /// Sniff format and dimensions from encoded image bytes
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = match image::guess_format(&data)? {
            image::ImageFormat::Jpeg => ImageFormat::Jpeg,
            image::ImageFormat::Png => ImageFormat::Png,
            other => {
                return Err(HtmlError::ImageError(format!(
                    "Unsupported image format: {other:?}"
                )))
            }
        };

        let (width, height) =
            ImageReader::with_format(Cursor::new(&data), format.as_image_format())
                .into_dimensions()?;

        log::debug!(
            "embedded {} image {}x{} ({} bytes)",
            format.mime(),
            width,
            height,
            data.len()
        );

        Ok(Self {
            format,
            width,
            height,
            data,
        })
    }

    /// Read an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime(),
            STANDARD.encode(&self.data)
        )
    }

    /// `<img>` element sized to fit a box
    pub fn to_element(
        &self,
        alt: &str,
        box_width: f64,
        box_height: f64,
        mode: ImageScaleMode,
    ) -> Element {
        let (w, h) =
            calculate_scaled_dimensions(self.width, self.height, box_width, box_height, mode);
        Element::new("img")
            .with_attr("src", self.data_uri())
            .with_attr("alt", alt)
            .with_style(
                Style::new()
                    .set("width", px(w.round()))
                    .set("height", px(h.round())),
            )
    }
}
