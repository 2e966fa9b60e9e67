//! Arabic Text - Arabic and bidirectional text processing
//!
//! This crate provides:
//! - Script detection (Arabic / Hebrew / other right-to-left ranges)
//! - Bidi run splitting and visual run ordering for mixed Arabic/Latin strings
//! - Glyph shaping with `rustybuzz` (contextual Arabic forms, ligatures)
//! - Number, currency and date formatting for English and Arabic documents
//!
//! # Example
//!
//! ```ignore
//! use arabic_text::{format_currency, Direction, Language, Shaper};
//!
//! let shaper = Shaper::new(&font_bytes)?;
//! let glyphs = shaper.shape_run("فاتورة", Direction::Rtl);
//!
//! let total = format_currency(1234.5, Language::En, "SAR"); // "SAR 1,234.50"
//! ```

mod bidi;
mod formatter;
mod script;
mod shaping;

pub use bidi::{split_runs, visual_runs, BidiRun, Direction};
pub use formatter::{
    format_currency, format_date, format_date_time, format_number, parse_date, render_float,
    Language,
};
pub use script::{contains_rtl, is_rtl_char};
pub use shaping::{ShapedGlyph, Shaper};

use thiserror::Error;

/// Errors that can occur during text processing
#[derive(Debug, Error)]
pub enum TextError {
    #[error("Failed to parse font for shaping")]
    FontParseError,

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for text operations
pub type Result<T> = std::result::Result<T, TextError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_currency_by_language() {
        assert_eq!(format_currency(1234.5, Language::En, "SAR"), "SAR 1,234.50");
        assert_eq!(format_currency(1234.5, Language::Ar, "SAR"), "1,234.50 ر.س");
    }

    #[test]
    fn test_contains_rtl() {
        assert!(contains_rtl("شركة ABC"));
        assert!(!contains_rtl("ABC Trading"));
    }
}
