//! WASM bindings for brand-render
//!
//! This crate provides JavaScript-friendly API for:
//! - Rendering invoices, business reports and project snapshots to PDF
//! - Applying tenant branding to UI CSS variables
//! - Deriving palette scales from a brand color
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { renderDocument, ThemeContext, buildScale } from 'brand-render-wasm';
//!
//! await init();
//!
//! // Arabic documents need the Naskh fonts; without them text is not shaped
//! const artifact = renderDocument('invoice', { record, language: 'ar', branding },
//!     regularFontBytes, boldFontBytes);
//! if (artifact) download(artifact.filename, artifact.bytes);
//!
//! const theme = new ThemeContext();
//! if (theme.apply(branding)) style.textContent = theme.toCss();
//! ```

use brand_render::{DocumentKind, FontAssets, RenderRequest};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Render a business document
///
/// @param kind - "invoice", "report" or "project"
/// @param request - `{ record, language, branding, generatedAt? }`
/// @param regularFont - NotoNaskhArabic-Regular.ttf bytes (optional)
/// @param boldFont - NotoNaskhArabic-Bold.ttf bytes (optional)
/// @returns `{ filename, bytes, pageCount }`, or null when there is no record
#[wasm_bindgen(js_name = renderDocument)]
pub fn render_document(
    kind: &str,
    request: JsValue,
    regular_font: Option<Vec<u8>>,
    bold_font: Option<Vec<u8>>,
) -> Result<JsValue, JsValue> {
    let kind: DocumentKind = kind.parse().map_err(|e: String| JsValue::from_str(&e))?;
    let mut request: RenderRequest = serde_wasm_bindgen::from_value(request)?;
    if request.generated_at.is_none() {
        request.generated_at = Some(local_timestamp());
    }

    let fonts = FontAssets::from_bytes(regular_font, bold_font);
    let Some(artifact) = brand_render::render_with_fonts(kind, &request, &fonts).map_err(js_error)?
    else {
        return Ok(JsValue::NULL);
    };

    let result = js_sys::Object::new();
    js_sys::Reflect::set(&result, &"filename".into(), &artifact.filename.into())?;
    js_sys::Reflect::set(
        &result,
        &"bytes".into(),
        &js_sys::Uint8Array::from(artifact.bytes.as_slice()).into(),
    )?;
    js_sys::Reflect::set(
        &result,
        &"pageCount".into(),
        &JsValue::from_f64(artifact.page_count as f64),
    )?;
    Ok(result.into())
}

/// Browser-local time as `YYYY-MM-DD HH:MM`
fn local_timestamp() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date(),
        now.get_hours(),
        now.get_minutes()
    )
}

/// Tenant theme for the surrounding UI
#[wasm_bindgen]
pub struct ThemeContext {
    inner: brand_render::ThemeContext,
}

#[wasm_bindgen]
impl ThemeContext {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ThemeContext {
        ThemeContext {
            inner: brand_render::ThemeContext::new(),
        }
    }

    /// Apply tenant branding
    ///
    /// @param branding - `{ primaryColor?, secondaryColor?, logo?, invoicePdfTemplate? }`
    /// @returns true when the CSS variables changed
    pub fn apply(&mut self, branding: JsValue) -> Result<bool, JsValue> {
        let branding: brand_render::TenantBranding = serde_wasm_bindgen::from_value(branding)?;
        Ok(self.inner.apply(&branding))
    }

    /// Current variables as a `{ "--primary-500": "37 99 235", ... }` object
    #[wasm_bindgen(js_name = cssVariables)]
    pub fn css_variables(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.inner.css_variables())?)
    }

    /// Current variables as a `:root { ... }` block
    #[wasm_bindgen(js_name = toCss)]
    pub fn to_css(&self) -> String {
        self.inner.to_css()
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the 11-stop palette of a brand color
///
/// @param hex - `#RGB` or `#RRGGBB`
/// @returns `{ "50": "#EEF3FD", ..., "950": "#..." }`
#[wasm_bindgen(js_name = buildScale)]
pub fn build_scale(hex: &str) -> Result<JsValue, JsValue> {
    let base = brand_render::parse_hex_color(hex)
        .ok_or_else(|| JsValue::from_str(&format!("Invalid color: {hex}")))?;
    let stops: std::collections::BTreeMap<String, String> = brand_render::build_scale(base)
        .entries()
        .map(|(stop, color)| (stop.to_string(), color.to_hex()))
        .collect();
    Ok(serde_wasm_bindgen::to_value(&stops)?)
}
