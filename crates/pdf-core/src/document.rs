//! PDF Document builder

use crate::font::BuiltinFont;
use crate::image::{
    calculate_scaled_dimensions, generate_image_operators, ImageScaleMode, ImageXObject,
};
use crate::shapes::{line_operators, rect_operators, rounded_rect_operators};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, FontData, FontFamily, FontFamilyBuilder, FontWeight, PdfError, PositionedGlyph, Result};
use crate::{A4_HEIGHT, A4_WIDTH};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Which font a resource name points at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum FontKey {
    Builtin(BuiltinFont),
    /// Embedded face, keyed by (family, weight actually used)
    Embedded(String, FontWeight),
}

/// A page being built
struct PageState {
    width: f64,
    height: f64,
    content: Vec<u8>,
}

/// An image registered once and shared by every page that draws it
struct ImageEntry {
    resource_name: String,
    width: u32,
    height: u32,
    xobject: ImageXObject,
}

/// PDF document built from blank pages
///
/// All pages share one Resources dictionary; fonts and images are written
/// once when the document is serialized.
pub struct PdfDocument {
    pages: Vec<PageState>,
    /// Registered font families
    font_families: HashMap<String, FontFamily>,
    /// Current font family name (None = builtin Helvetica)
    current_family: Option<String>,
    current_weight: FontWeight,
    current_font_size: f32,
    current_text_color: Color,
    /// Font resources in use (resource name -> font)
    font_resources: BTreeMap<String, FontKey>,
    /// Reverse lookup for font resources
    font_resource_names: HashMap<FontKey, String>,
    /// Embedded images (data hash -> entry)
    images: HashMap<u64, ImageEntry>,
    /// Document title for the Info dictionary
    title: Option<String>,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document with no pages
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            font_families: HashMap::new(),
            current_family: None,
            current_weight: FontWeight::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            font_resources: BTreeMap::new(),
            font_resource_names: HashMap::new(),
            images: HashMap::new(),
            title: None,
        }
    }

    /// Set the document title written to the Info dictionary
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Append a blank page and return its number (1-indexed)
    pub fn add_page(&mut self, width: f64, height: f64) -> Result<usize> {
        if !(width > 0.0 && height > 0.0) {
            return Err(PdfError::GeometryError(format!(
                "page size must be positive, got {width}x{height}"
            )));
        }
        self.pages.push(PageState {
            width,
            height,
            content: Vec::new(),
        });
        Ok(self.pages.len())
    }

    /// Append a blank A4 portrait page
    pub fn add_a4_page(&mut self) -> usize {
        self.pages.push(PageState {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            content: Vec::new(),
        });
        self.pages.len()
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page size (width, height) in points
    pub fn page_size(&self, page: usize) -> Result<(f64, f64)> {
        let state = self.page(page)?;
        Ok((state.width, state.height))
    }

    fn page(&self, page: usize) -> Result<&PageState> {
        let count = self.pages.len();
        if page == 0 || page > count {
            return Err(PdfError::InvalidPage(page, count));
        }
        Ok(&self.pages[page - 1])
    }

    fn buffer_content(&mut self, page: usize, content: &[u8]) -> Result<()> {
        let count = self.pages.len();
        let state = page
            .checked_sub(1)
            .and_then(|idx| self.pages.get_mut(idx))
            .ok_or(PdfError::InvalidPage(page, count))?;
        state.content.extend_from_slice(content);
        Ok(())
    }

    /// Register a font family with its variants
    ///
    /// # Example
    /// ```ignore
    /// doc.register_font_family("naskh",
    ///     FontFamilyBuilder::new()
    ///         .regular(std::fs::read("NotoNaskhArabic-Regular.ttf")?)
    ///         .bold(std::fs::read("NotoNaskhArabic-Bold.ttf")?)
    /// )?;
    /// ```
    pub fn register_font_family(&mut self, name: &str, builder: FontFamilyBuilder) -> Result<()> {
        if self.font_families.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        let family = builder.build(name)?;
        self.font_families.insert(name.to_string(), family);

        Ok(())
    }

    /// Set the current font family and size
    pub fn set_font(&mut self, family: &str, size: f32) -> Result<()> {
        if !self.font_families.contains_key(family) {
            return Err(PdfError::FontNotFound(family.to_string()));
        }

        self.current_family = Some(family.to_string());
        self.current_font_size = size;

        Ok(())
    }

    /// Switch to the builtin Helvetica pair
    pub fn use_builtin_font(&mut self, size: f32) {
        self.current_family = None;
        self.current_font_size = size;
    }

    /// Set the font weight (keeps current family/size)
    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.current_weight = weight;
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// The current embedded face, if an embedded family is selected
    pub fn current_face(&self) -> Option<&FontData> {
        self.current_family
            .as_ref()
            .and_then(|name| self.font_families.get(name))
            .map(|family| family.variant(self.current_weight))
    }

    /// Resolve the font key for the current family and weight
    fn current_font_key(&self) -> FontKey {
        match self
            .current_family
            .as_ref()
            .and_then(|name| self.font_families.get(name).map(|family| (name, family)))
        {
            Some((name, family)) => {
                // a missing bold face resolves to regular
                let weight = if family.bold.is_some() {
                    self.current_weight
                } else {
                    FontWeight::Regular
                };
                FontKey::Embedded(name.clone(), weight)
            }
            None => FontKey::Builtin(BuiltinFont::for_weight(self.current_weight)),
        }
    }

    fn font_resource(&mut self, key: FontKey) -> String {
        if let Some(name) = self.font_resource_names.get(&key) {
            return name.clone();
        }
        let name = format!("F{}", self.font_resources.len() + 1);
        self.font_resources.insert(name.clone(), key.clone());
        self.font_resource_names.insert(key, name.clone());
        name
    }

    /// Get current font's text width for a string, in points
    pub fn get_text_width(&self, text: &str) -> f64 {
        match self.current_face() {
            Some(face) => face.text_width_points(text, self.current_font_size) as f64,
            None => BuiltinFont::for_weight(self.current_weight)
                .text_width_points(text, self.current_font_size) as f64,
        }
    }

    /// Insert text at a specific position
    ///
    /// With an embedded family the text is mapped through the font's cmap
    /// character by character; with the builtin font it is WinAnsi-encoded.
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Which edge of the text sits at `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;
        if text.is_empty() {
            return Ok(());
        }

        let key = self.current_font_key();
        let (encoded, text_width) = match &key {
            FontKey::Builtin(builtin) => (
                builtin.encode_literal(text),
                builtin.text_width_points(text, self.current_font_size) as f64,
            ),
            FontKey::Embedded(..) => {
                let glyphs = self
                    .current_face()
                    .map(|face| face.glyphs_for_text(text))
                    .unwrap_or_default();
                return self.insert_glyphs(&glyphs, page, x, y, align);
            }
        };

        let font_name = self.font_resource(key);
        let ctx = TextRenderContext {
            font_name,
            font_size: self.current_font_size,
            text_width,
            color: self.current_text_color,
        };
        let operators = generate_text_operators(&encoded, x, page_height - y, align, &ctx);
        self.buffer_content(page, &operators)
    }

    /// Insert a pre-shaped glyph run (visual order) with the current embedded face
    pub fn insert_glyphs(
        &mut self,
        glyphs: &[PositionedGlyph],
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;
        if glyphs.is_empty() {
            return Ok(());
        }

        let key = self.current_font_key();
        let FontKey::Embedded(family_name, weight) = &key else {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        };

        let text_width = {
            let family = self
                .font_families
                .get_mut(family_name)
                .ok_or_else(|| PdfError::FontNotFound(family_name.clone()))?;
            let face = family.variant_mut(*weight);
            face.add_glyphs(glyphs);
            face.run_width_points(glyphs, self.current_font_size) as f64
        };

        let font_name = self.font_resource(key);
        let ctx = TextRenderContext {
            font_name,
            font_size: self.current_font_size,
            text_width,
            color: self.current_text_color,
        };
        let encoded = FontData::encode_glyphs_hex(glyphs);
        let operators = generate_text_operators(&encoded, x, page_height - y, align, &ctx);
        self.buffer_content(page, &operators)
    }

    /// Fill a rectangle; `y` is the top edge measured from the page top
    pub fn fill_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;
        if width <= 0.0 || height <= 0.0 {
            return Ok(());
        }
        let ops = rect_operators(x, page_height - y - height, width, height, color);
        self.buffer_content(page, &ops)
    }

    /// Draw a rounded rectangle; `y` is the top edge measured from the page top
    #[allow(clippy::too_many_arguments)]
    pub fn draw_rounded_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<(Color, f64)>,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;
        if width <= 0.0 || height <= 0.0 {
            return Ok(());
        }
        let ops = rounded_rect_operators(
            x,
            page_height - y - height,
            width,
            height,
            radius,
            fill,
            stroke,
        );
        self.buffer_content(page, &ops)
    }

    /// Draw a straight line between two top-origin points
    #[allow(clippy::too_many_arguments)]
    pub fn draw_line(
        &mut self,
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        line_width: f64,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;
        let ops = line_operators(x1, page_height - y1, x2, page_height - y2, color, line_width);
        self.buffer_content(page, &ops)
    }

    /// Insert an image stretched to the given box
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.insert_image_scaled(data, page, x, y, width, height, ImageScaleMode::Stretch)
    }

    /// Insert an image with scaling mode
    ///
    /// With [`ImageScaleMode::FitBox`] the image is centered in the box.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image_scaled(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;

        let (resource_name, orig_width, orig_height) = self.get_or_create_image_ref(data)?;

        let (actual_width, actual_height) =
            calculate_scaled_dimensions(orig_width, orig_height, width, height, mode);
        let offset_x = (width - actual_width).max(0.0) / 2.0;
        let offset_y = (height - actual_height).max(0.0) / 2.0;

        let pdf_y = page_height - (y + offset_y) - actual_height;
        let operators = generate_image_operators(
            &resource_name,
            x + offset_x,
            pdf_y,
            actual_width,
            actual_height,
        );
        self.buffer_content(page, &operators)
    }

    /// Register an image once; images are deduplicated by hash of their data
    fn get_or_create_image_ref(&mut self, data: &[u8]) -> Result<(String, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if let Some(entry) = self.images.get(&data_hash) {
            return Ok((entry.resource_name.clone(), entry.width, entry.height));
        }

        let xobject = ImageXObject::from_bytes(data)?;
        let resource_name = format!("Im{}", self.images.len() + 1);
        let entry = ImageEntry {
            resource_name: resource_name.clone(),
            width: xobject.width,
            height: xobject.height,
            xobject,
        };
        let result = (resource_name, entry.width, entry.height);
        self.images.insert(data_hash, entry);

        Ok(result)
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize the document to bytes
    pub fn to_bytes(self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(PdfError::SaveError("document has no pages".to_string()));
        }

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let font_dict = self.embed_fonts(&mut doc)?;

        let mut xobject_dict = Dictionary::new();
        for entry in self.images.values() {
            let id = doc.add_object(entry.xobject.to_pdf_stream());
            xobject_dict.set(entry.resource_name.as_bytes(), Object::Reference(id));
        }

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_dict));
        if !xobject_dict.is_empty() {
            resources.set("XObject", Object::Dictionary(xobject_dict));
        }
        let resources_id = doc.add_object(resources);

        let mut kids = Vec::with_capacity(self.pages.len());
        for state in &self.pages {
            let content_id = doc.add_object(compress_content(&state.content)?);
            let page = Dictionary::from_iter(vec![
                ("Type", "Page".into()),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    vec![
                        0.into(),
                        0.into(),
                        Object::Real(state.width as _),
                        Object::Real(state.height as _),
                    ]
                    .into(),
                ),
                ("Contents", Object::Reference(content_id)),
                ("Resources", Object::Reference(resources_id)),
            ]);
            kids.push(Object::Reference(doc.add_object(page)));
        }

        let pages = Dictionary::from_iter(vec![
            ("Type", "Pages".into()),
            ("Count", (kids.len() as i64).into()),
            ("Kids", kids.into()),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", "Catalog".into()),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut info = Dictionary::new();
        info.set("Producer", Object::string_literal("brand-render"));
        if let Some(title) = &self.title {
            info.set("Title", utf16_text_string(title));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", Object::Reference(info_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        log::debug!(
            "serialized {} page(s), {} font(s), {} image(s), {} bytes",
            self.pages.len(),
            self.font_resources.len(),
            self.images.len(),
            buffer.len()
        );

        Ok(buffer)
    }

    /// Embed every font referenced by a content stream; returns the /Font resource dict
    fn embed_fonts(&self, doc: &mut Document) -> Result<Dictionary> {
        let mut font_dict = Dictionary::new();

        for (resource_name, key) in &self.font_resources {
            let font_id = match key {
                FontKey::Builtin(builtin) => doc.add_object(builtin.to_pdf_dict()),
                FontKey::Embedded(family, weight) => {
                    let face = self
                        .font_families
                        .get(family)
                        .map(|f| f.variant(*weight))
                        .ok_or_else(|| PdfError::FontNotFound(family.clone()))?;
                    embed_font_object(doc, face)?
                }
            };
            font_dict.set(resource_name.as_bytes(), Object::Reference(font_id));
        }

        Ok(font_dict)
    }
}

/// Embed a single Type0 font and its descendants
fn embed_font_object(doc: &mut Document, font_data: &FontData) -> Result<ObjectId> {
    let font_objects = font_data.to_pdf_objects()?;

    let font_file_id = doc.add_object(font_objects.font_file_stream);

    let mut font_descriptor = font_objects.font_descriptor;
    font_descriptor.set("FontFile2", Object::Reference(font_file_id));
    let font_descriptor_id = doc.add_object(font_descriptor);

    let mut cid_font = font_objects.cid_font;
    cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
    let cid_font_id = doc.add_object(cid_font);

    let tounicode_id = doc.add_object(font_objects.tounicode_stream);

    let mut type0_font = font_objects.type0_font;
    type0_font.set(
        "DescendantFonts",
        Object::Array(vec![Object::Reference(cid_font_id)]),
    );
    type0_font.set("ToUnicode", Object::Reference(tounicode_id));

    Ok(doc.add_object(type0_font))
}

/// Flate-compress a page content stream
fn compress_content(content: &[u8]) -> Result<Stream> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(content)?;
    let data = encoder.finish()?;

    let dict = Dictionary::from_iter(vec![("Filter", Object::Name(b"FlateDecode".to_vec()))]);
    Ok(Stream::new(dict, data))
}

/// PDF text string in UTF-16BE with BOM
fn utf16_text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, lopdf::StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_document_has_no_pages() {
        let doc = PdfDocument::new();
        assert_eq!(doc.page_count(), 0);
        assert!(matches!(doc.page_size(1), Err(PdfError::InvalidPage(1, 0))));
    }

    #[test]
    fn test_add_pages() {
        let mut doc = PdfDocument::new();
        assert_eq!(doc.add_a4_page(), 1);
        assert_eq!(doc.add_page(200.0, 100.0).unwrap(), 2);
        assert_eq!(doc.page_size(2).unwrap(), (200.0, 100.0));
        assert!(doc.add_page(0.0, 100.0).is_err());
    }

    #[test]
    fn test_builtin_text_is_buffered() {
        let mut doc = PdfDocument::new();
        let page = doc.add_a4_page();
        doc.use_builtin_font(10.0);
        doc.set_text_color(Color::white());
        doc.insert_text("Total", page, 100.0, 41.89, Align::Left).unwrap();

        let content = String::from_utf8(doc.pages[0].content.clone()).unwrap();
        assert!(content.contains("/F1 10 Tf"));
        assert!(content.contains("100 800 Td"));
        assert!(content.contains("(Total) Tj"));
        assert!(content.contains("1 1 1 rg"));
    }

    #[test]
    fn test_font_resources_are_shared() {
        let mut doc = PdfDocument::new();
        let p1 = doc.add_a4_page();
        let p2 = doc.add_a4_page();
        doc.use_builtin_font(10.0);
        doc.insert_text("a", p1, 0.0, 10.0, Align::Left).unwrap();
        doc.insert_text("b", p2, 0.0, 10.0, Align::Left).unwrap();
        doc.set_font_weight(FontWeight::Bold);
        doc.insert_text("c", p2, 0.0, 20.0, Align::Left).unwrap();
        assert_eq!(doc.font_resources.len(), 2);
    }

    #[test]
    fn test_insert_glyphs_requires_embedded_font() {
        let mut doc = PdfDocument::new();
        let page = doc.add_a4_page();
        let glyphs = vec![PositionedGlyph {
            glyph_id: 1,
            advance: 500,
            text: "a".to_string(),
        }];
        let result = doc.insert_glyphs(&glyphs, page, 0.0, 0.0, Align::Left);
        assert!(matches!(result, Err(PdfError::FontNotFound(_))));
    }

    #[test]
    fn test_set_font_unknown_family() {
        let mut doc = PdfDocument::new();
        assert!(matches!(
            doc.set_font("missing", 12.0),
            Err(PdfError::FontNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_page() {
        let mut doc = PdfDocument::new();
        doc.add_a4_page();
        let result = doc.fill_rect(2, 0.0, 0.0, 10.0, 10.0, Color::black());
        assert!(matches!(result, Err(PdfError::InvalidPage(2, 1))));
    }

    #[test]
    fn test_fill_rect_converts_to_pdf_space() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(100.0, 200.0).unwrap();
        doc.fill_rect(page, 10.0, 20.0, 30.0, 40.0, Color::black()).unwrap();
        let content = String::from_utf8(doc.pages[0].content.clone()).unwrap();
        assert!(content.contains("10 140 30 40 re"));
    }

    #[test]
    fn test_zero_sized_rect_is_skipped() {
        let mut doc = PdfDocument::new();
        let page = doc.add_a4_page();
        doc.fill_rect(page, 0.0, 0.0, 0.0, 10.0, Color::black()).unwrap();
        assert!(doc.pages[0].content.is_empty());
    }

    #[test]
    fn test_to_bytes_requires_pages() {
        assert!(PdfDocument::new().to_bytes().is_err());
    }

    #[test]
    fn test_to_bytes_header() {
        let mut doc = PdfDocument::new();
        doc.add_a4_page();
        doc.set_title("Invoice INV-1");
        let bytes = doc.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn test_utf16_text_string() {
        let Object::String(bytes, _) = utf16_text_string("A") else {
            panic!("expected string");
        };
        assert_eq!(bytes, vec![0xFE, 0xFF, 0x00, 0x41]);
    }
}
