//! PDF Core - Low-level PDF drawing surface
//!
//! This crate provides functionality for:
//! - Building blank A4 documents page by page
//! - Filling rectangles, rounded boxes and rules
//! - Drawing text with the builtin Helvetica pair or embedded TrueType fonts
//! - Drawing pre-shaped glyph runs (for Arabic and other complex scripts)
//! - Inserting images (JPEG, PNG)
//!
//! Coordinates passed to the drawing methods are in points with the origin at
//! the top-left corner of the page; conversion to PDF user space happens here.
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, Color, PdfDocument};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_a4_page();
//! doc.fill_rect(page, 0.0, 0.0, 595.28, 6.0, Color::from_rgb(37, 99, 235))?;
//! doc.use_builtin_font(12.0);
//! doc.insert_text("Hello, World!", page, 40.0, 60.0, Align::Left)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod image;
mod shapes;
mod text;

pub use document::{Color, PdfDocument};
pub use font::{BuiltinFont, FontData, FontFamily, FontFamilyBuilder, FontWeight, PositionedGlyph};
pub use image::{detect_format, ImageFormat, ImageScaleMode};
pub use text::{calculate_x_offset, generate_text_operators, wrap_to_width, TextRenderContext};

use thiserror::Error;

/// A4 portrait width in points
pub const A4_WIDTH: f64 = 595.28;

/// A4 portrait height in points
pub const A4_HEIGHT: f64 = 841.89;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Invalid geometry: {0}")]
    GeometryError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// The mirrored alignment (left <-> right, center unchanged)
    pub fn mirrored(self) -> Self {
        match self {
            Align::Left => Align::Right,
            Align::Right => Align::Left,
            Align::Center => Align::Center,
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
    fn test_align_mirrored() {
        assert_eq!(Align::Left.mirrored(), Align::Right);
        assert_eq!(Align::Right.mirrored(), Align::Left);
        assert_eq!(Align::Center.mirrored(), Align::Center);
    }
}
