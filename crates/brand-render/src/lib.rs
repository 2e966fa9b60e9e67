//! Brand Render - branded, bidirectional business documents as PDF
//!
//! This crate provides:
//! - Palette derivation from tenant brand colors (11-stop tint/shade scales)
//! - Five page templates resolved into an immutable [`Theme`]
//! - Direction-aware geometry for English (LTR) and Arabic (RTL) documents
//! - Composers for invoices, business reports and project progress
//! - A two-state page driver with header redraw and a footer pass
//!
//! # Example
//!
//! ```ignore
//! use brand_render::{render, DocumentKind, RenderRequest};
//!
//! let request: RenderRequest = serde_json::from_str(request_json)?;
//! if let Some(artifact) = render(DocumentKind::Invoice, &request)? {
//!     std::fs::write(&artifact.filename, &artifact.bytes)?;
//! }
//! ```

pub mod assets;
pub mod branding;
pub mod color;
pub mod compose;
mod de;
pub mod driver;
pub mod filename;
pub mod fonts;
pub mod labels;
pub mod layout;
pub mod ops;
pub mod palette;
pub mod record;
pub mod surface;
pub mod theme;
pub mod ui_theme;

pub use assets::{parse_data_uri, RasterImage};
pub use branding::TenantBranding;
pub use color::{parse_hex_color, Rgb};
pub use compose::{compose, ComposeEnv};
pub use driver::{DriverState, PageDriver};
pub use filename::artifact_filename;
pub use fonts::{global_font_cache, FontAssets, FontCache, FontLoader, FsFontLoader};
pub use layout::{RenderContext, Side};
pub use ops::DrawOp;
pub use palette::{build_scale, resolve_brand_colors, BrandColors, PaletteScale};
pub use record::{DocumentKind, DocumentRecord};
pub use surface::{PdfSurface, RecordingSurface, Surface};
pub use theme::{select_theme, TemplateId, Theme};
pub use ui_theme::ThemeContext;

pub use arabic_text::Language;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while rendering a document
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Layout error: {0}")]
    Layout(String),
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// One render call's input
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderRequest {
    /// Raw business record; missing or null renders nothing
    pub record: Option<Value>,
    /// `en` or `ar`; anything else renders English
    pub language: String,
    #[serde(alias = "tenantBranding")]
    pub branding: TenantBranding,
    /// Timestamp printed in the footer; defaults to now
    pub generated_at: Option<String>,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            record: None,
            language: "en".to_string(),
            branding: TenantBranding::default(),
            generated_at: None,
        }
    }
}

impl RenderRequest {
    pub fn new(record: Value) -> Self {
        Self {
            record: Some(record),
            ..Default::default()
        }
    }
}

/// A rendered document
#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Render with the process-wide Arabic font cache
///
/// Fonts are only loaded for right-to-left documents, from
/// `$BRAND_RENDER_FONT_DIR` or `assets/fonts`.
pub fn render(kind: DocumentKind, request: &RenderRequest) -> Result<Option<Artifact>> {
    if Language::from_code(&request.language).is_rtl() {
        let fonts = global_font_cache().ensure(&FsFontLoader::from_env());
        render_with_fonts(kind, request, fonts)
    } else {
        render_with_fonts(kind, request, &FontAssets::unavailable())
    }
}

/// Render with caller-supplied font bytes
pub fn render_with_fonts(
    kind: DocumentKind,
    request: &RenderRequest,
    fonts: &FontAssets,
) -> Result<Option<Artifact>> {
    let Some(value) = request.record.as_ref().filter(|v| !v.is_null()) else {
        log::debug!("No {kind} record supplied, nothing to render");
        return Ok(None);
    };

    let record = DocumentRecord::from_value(kind, value);
    let language = Language::from_code(&request.language);
    let identifier = record.identifier();

    let surface = PdfSurface::new(&identifier, language.is_rtl().then_some(fonts));
    let shaping_active = surface.shaping_active();
    if language.is_rtl() && !shaping_active {
        log::warn!("Rendering Arabic {kind} without the Arabic font; text is not shaped");
    }

    let colors = resolve_brand_colors(&request.branding);
    let theme = select_theme(
        request.branding.invoice_pdf_template,
        colors.primary,
        colors.secondary,
    );
    let ctx = RenderContext::new(language, &theme, shaping_active);
    let env = ComposeEnv {
        labels: labels::labels(language),
        logo: request.branding.logo.as_deref().and_then(parse_data_uri),
        generated_at: generated_at_text(request.generated_at.as_deref(), language),
    };

    let ops = compose(&record, &ctx, &env);
    log::debug!(
        "Composed {kind} {identifier:?}: {} ops, template {}",
        ops.len(),
        theme.template.id()
    );

    let mut driver = PageDriver::new(surface, &theme, ctx);
    let page_count = driver.run(&ops)?;
    let bytes = driver.into_surface().finish()?;

    Ok(Some(Artifact {
        filename: artifact_filename(&identifier),
        bytes,
        page_count,
    }))
}

/// Footer timestamp; unparsable input is printed as given
fn generated_at_text(value: Option<&str>, language: Language) -> String {
    let timestamp = match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => match parse_timestamp(raw) {
            Some(ts) => ts,
            None => return raw.to_string(),
        },
        None => chrono::Local::now().naive_local(),
    };
    arabic_text::format_date_time(&timestamp, language)
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let request: RenderRequest = serde_json::from_value(json!({
            "record": {"invoiceNumber": "INV-1"},
            "tenantBranding": {"primaryColor": "#0F766E"}
        }))
        .unwrap();
        assert_eq!(request.language, "en");
        assert_eq!(request.branding.primary_color.as_deref(), Some("#0F766E"));
        assert_eq!(request.generated_at, None);
    }

    #[test]
    fn test_null_record_renders_nothing() {
        let request: RenderRequest = serde_json::from_value(json!({"record": null})).unwrap();
        assert!(render(DocumentKind::Invoice, &request).unwrap().is_none());
        assert!(render(DocumentKind::Report, &RenderRequest::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_generated_at_formats() {
        assert_eq!(
            generated_at_text(Some("2025-01-15T14:05:00Z"), Language::En),
            "15 Jan 2025 14:05"
        );
        assert_eq!(
            generated_at_text(Some("2025-01-15 09:30"), Language::En),
            "15 Jan 2025 09:30"
        );
        assert_eq!(
            generated_at_text(Some("2025-01-15"), Language::En),
            "15 Jan 2025 00:00"
        );
        assert_eq!(generated_at_text(Some("yesterday"), Language::En), "yesterday");
        assert!(!generated_at_text(None, Language::En).is_empty());
    }
}
