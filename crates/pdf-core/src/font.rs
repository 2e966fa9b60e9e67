//! Font handling for PDF documents

use crate::{PdfError, Result};
use lopdf::{Dictionary, Object, Stream};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// A glyph produced by a shaper (or a plain cmap lookup), in visual order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedGlyph {
    /// Glyph ID in the font
    pub glyph_id: u16,
    /// Horizontal advance in font units
    pub advance: i32,
    /// Source text the glyph stands for (used for the ToUnicode map)
    pub text: String,
}

/// Helvetica advance widths for ASCII 32..=126 at 1000 units/em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {..~
];

/// Helvetica-Bold advance widths for ASCII 32..=126 at 1000 units/em
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // {..~
];

/// Standard-14 fonts that need no embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    /// Pick the builtin face for a weight
    pub fn for_weight(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Regular => BuiltinFont::Helvetica,
            FontWeight::Bold => BuiltinFont::HelveticaBold,
        }
    }

    /// PostScript name used as /BaseFont
    pub fn base_font(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Advance width of a WinAnsi byte at 1000 units/em
    fn byte_width(&self, b: u8) -> u16 {
        let table = match self {
            BuiltinFont::Helvetica => &HELVETICA_WIDTHS,
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        match b {
            32..=126 => table[(b - 32) as usize],
            // Latin-1 letters and the WinAnsi extras are close to the average lowercase
            _ => 556,
        }
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = to_winansi_bytes(text)
            .into_iter()
            .map(|b| self.byte_width(b) as u32)
            .sum();
        units as f32 / 1000.0 * font_size
    }

    /// Encode text as a PDF literal string; unmappable characters become `?`
    pub fn encode_literal(&self, text: &str) -> String {
        let mut out = String::from("(");
        for b in to_winansi_bytes(text) {
            match b {
                b'(' | b')' | b'\\' => {
                    out.push('\\');
                    out.push(b as char);
                }
                32..=126 => out.push(b as char),
                _ => out.push_str(&format!("\\{b:03o}")),
            }
        }
        out.push(')');
        out
    }

    /// Font dictionary for the page resources
    pub fn to_pdf_dict(&self) -> Dictionary {
        Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type1".into()),
            ("BaseFont", self.base_font().into()),
            ("Encoding", "WinAnsiEncoding".into()),
        ])
    }
}

/// Map text to WinAnsi bytes, substituting `?` for anything outside the code page
pub(crate) fn to_winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x0020..=0x007E => c as u8,
            0x00A0..=0x00FF => c as u8,
            0x20AC => 0x80,
            0x201A => 0x82,
            0x2026 => 0x85,
            0x2018 => 0x91,
            0x2019 => 0x92,
            0x201C => 0x93,
            0x201D => 0x94,
            0x2022 => 0x95,
            0x2013 => 0x96,
            0x2014 => 0x97,
            _ => b'?',
        })
        .collect()
}

/// Embedded TrueType font data
#[derive(Debug, Clone)]
pub struct FontData {
    /// Font name/identifier
    pub name: String,
    /// Raw TTF data
    ttf_data: Arc<Vec<u8>>,
    /// Glyphs used in the document (glyph id -> source text)
    used_glyphs: BTreeMap<u16, String>,
}

/// PDF objects generated for font embedding
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont Type2 dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Font file stream (TTF data)
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

/// Font family with a required regular face and an optional bold face
#[derive(Debug, Clone)]
pub struct FontFamily {
    pub regular: FontData,
    pub bold: Option<FontData>,
}

impl FontFamily {
    /// Get the face for a weight, falling back to regular when bold is missing
    pub fn variant(&self, weight: FontWeight) -> &FontData {
        match weight {
            FontWeight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            FontWeight::Regular => &self.regular,
        }
    }

    /// Mutable counterpart of [`FontFamily::variant`]
    pub fn variant_mut(&mut self, weight: FontWeight) -> &mut FontData {
        match (weight, &mut self.bold) {
            (FontWeight::Bold, Some(bold)) => bold,
            _ => &mut self.regular,
        }
    }
}

/// Builder for registering font families
#[derive(Default)]
pub struct FontFamilyBuilder {
    regular: Option<Arc<Vec<u8>>>,
    bold: Option<Arc<Vec<u8>>>,
}

impl FontFamilyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regular(mut self, ttf_data: impl Into<Arc<Vec<u8>>>) -> Self {
        self.regular = Some(ttf_data.into());
        self
    }

    pub fn bold(mut self, ttf_data: impl Into<Arc<Vec<u8>>>) -> Self {
        self.bold = Some(ttf_data.into());
        self
    }

    /// Build the FontFamily from the provided TTF data
    pub fn build(self, family_name: &str) -> Result<FontFamily> {
        let Some(regular) = self.regular else {
            return Err(PdfError::FontParseError(
                "FontFamily must have at least a regular variant".to_string(),
            ));
        };
        let regular = FontData::from_shared(&format!("{family_name}-regular"), regular)?;
        let bold = self
            .bold
            .map(|data| FontData::from_shared(&format!("{family_name}-bold"), data))
            .transpose()?;

        Ok(FontFamily { regular, bold })
    }
}

impl FontData {
    /// Create font data from TTF bytes
    pub fn from_ttf(name: &str, ttf_data: &[u8]) -> Result<Self> {
        Self::from_shared(name, Arc::new(ttf_data.to_vec()))
    }

    /// Create font data from shared TTF bytes, validating that the face parses
    pub fn from_shared(name: &str, ttf_data: Arc<Vec<u8>>) -> Result<Self> {
        ttf_parser::Face::parse(&ttf_data, 0)
            .map_err(|e| PdfError::FontParseError(format!("{name}: {e:?}")))?;

        Ok(Self {
            name: name.to_string(),
            ttf_data,
            used_glyphs: BTreeMap::new(),
        })
    }

    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.ttf_data, 0).ok()
    }

    /// Raw font bytes (for shapers)
    pub fn ttf_bytes(&self) -> &[u8] {
        &self.ttf_data
    }

    /// Get glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face()
            .and_then(|face| face.glyph_index(c).map(|id| id.0))
    }

    /// Check if font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.glyph_id(c).map(|id| id != 0).unwrap_or(false)
    }

    /// Get font units per em
    pub fn units_per_em(&self) -> u16 {
        self.face().map(|face| face.units_per_em()).unwrap_or(1000)
    }

    /// Get font ascender
    pub fn ascender(&self) -> i16 {
        self.face().map(|face| face.ascender()).unwrap_or(800)
    }

    /// Get font descender
    pub fn descender(&self) -> i16 {
        self.face().map(|face| face.descender()).unwrap_or(-200)
    }

    /// Map text to glyphs one character at a time (no shaping)
    pub fn glyphs_for_text(&self, text: &str) -> Vec<PositionedGlyph> {
        let Some(face) = self.face() else {
            return text
                .chars()
                .map(|c| PositionedGlyph {
                    glyph_id: 0,
                    advance: 0,
                    text: c.to_string(),
                })
                .collect();
        };
        text.chars()
            .map(|c| {
                let gid = face.glyph_index(c);
                PositionedGlyph {
                    glyph_id: gid.map(|g| g.0).unwrap_or(0),
                    advance: gid
                        .and_then(|g| face.glyph_hor_advance(g))
                        .map(i32::from)
                        .unwrap_or(0),
                    text: c.to_string(),
                }
            })
            .collect()
    }

    /// Width of a glyph run in points
    pub fn run_width_points(&self, glyphs: &[PositionedGlyph], font_size: f32) -> f32 {
        let units: i32 = glyphs.iter().map(|g| g.advance).sum();
        units as f32 / self.units_per_em() as f32 * font_size
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        self.run_width_points(&self.glyphs_for_text(text), font_size)
    }

    /// Record glyphs as used (for the widths array and ToUnicode map)
    pub fn add_glyphs(&mut self, glyphs: &[PositionedGlyph]) {
        for g in glyphs.iter().filter(|g| g.glyph_id != 0) {
            let text = self.used_glyphs.entry(g.glyph_id).or_default();
            // secondary glyphs of a cluster carry no text; keep the first real mapping
            if text.is_empty() {
                text.clone_from(&g.text);
            }
        }
    }

    /// Number of distinct glyphs used so far
    pub fn used_glyph_count(&self) -> usize {
        self.used_glyphs.len()
    }

    /// Encode a glyph run as a hex string for the Tj operator
    pub fn encode_glyphs_hex(glyphs: &[PositionedGlyph]) -> String {
        let mut result = String::with_capacity(glyphs.len() * 4 + 2);
        result.push('<');
        for g in glyphs {
            result.push_str(&format!("{:04X}", g.glyph_id));
        }
        result.push('>');
        result
    }

    /// Generate all PDF objects needed to embed this font
    pub fn to_pdf_objects(&self) -> Result<FontObjects> {
        let font_name = Object::Name(self.name.clone().into());

        let tounicode_content = self.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(Dictionary::new(), tounicode_content.into_bytes());

        let font_file_stream = Stream::new(
            Dictionary::from_iter(vec![("Length1", (self.ttf_data.len() as i64).into())]),
            self.ttf_data.as_ref().clone(),
        );

        let units_per_em = self.units_per_em() as f32;
        let scale = |v: i16| (v as f32 / units_per_em * 1000.0).round() as i64;
        let ascender = scale(self.ascender());
        let descender = scale(self.descender());

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", font_name.clone()),
            ("Flags", 4.into()),
            (
                "FontBBox",
                vec![0.into(), descender.into(), 1000.into(), ascender.into()].into(),
            ),
            ("ItalicAngle", 0.into()),
            ("Ascent", ascender.into()),
            ("Descent", descender.into()),
            ("CapHeight", ascender.into()),
            ("StemV", 80.into()),
        ]);

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "CIDFontType2".into()),
            ("BaseFont", font_name.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("CIDToGIDMap", "Identity".into()),
            ("W", self.generate_widths_array().into()),
            ("DW", 1000.into()),
        ]);

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", font_name),
            ("Encoding", "Identity-H".into()),
        ]);

        Ok(FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        })
    }

    /// Generate /W array for glyph widths (scaled to 1000 units/em)
    fn generate_widths_array(&self) -> Vec<Object> {
        let mut widths = Vec::new();
        let Some(face) = self.face() else {
            return widths;
        };
        let units_per_em = face.units_per_em().max(1) as f32;

        for gid in self.used_glyphs.keys() {
            let advance = face
                .glyph_hor_advance(ttf_parser::GlyphId(*gid))
                .unwrap_or(0) as f32;
            let scaled = (advance / units_per_em * 1000.0).round() as i64;
            widths.push((*gid as i64).into());
            widths.push(vec![scaled.into()].into());
        }

        widths
    }

    /// Generate ToUnicode CMap stream content
    fn generate_tounicode_cmap(&self) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");
        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        let entries: Vec<(&u16, &String)> = self
            .used_glyphs
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .collect();
        // bfchar sections are limited to 100 entries
        for chunk in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (gid, text) in chunk {
                let utf16: String = text
                    .encode_utf16()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04X}> <{utf16}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Font data whose bytes do not parse; every face lookup falls back to defaults
    fn unparsed_font() -> FontData {
        FontData {
            name: "test".to_string(),
            ttf_data: Arc::new(vec![0u8; 100]),
            used_glyphs: BTreeMap::new(),
        }
    }

    fn glyph(gid: u16, text: &str) -> PositionedGlyph {
        PositionedGlyph {
            glyph_id: gid,
            advance: 500,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_from_ttf_rejects_garbage() {
        assert!(FontData::from_ttf("bad", &[0u8; 100]).is_err());
    }

    #[test]
    fn test_builder_requires_regular() {
        let result = FontFamilyBuilder::new().bold(vec![0u8; 10]).build("x");
        assert!(matches!(result, Err(PdfError::FontParseError(_))));
    }

    #[test]
    fn test_metrics_defaults_without_face() {
        let font = unparsed_font();
        assert_eq!(font.units_per_em(), 1000);
        assert_eq!(font.ascender(), 800);
        assert_eq!(font.descender(), -200);
        assert!(!font.has_glyph('A'));
        assert_eq!(font.text_width_points("Hello", 12.0), 0.0);
    }

    #[test]
    fn test_add_glyphs_skips_notdef() {
        let mut font = unparsed_font();
        font.add_glyphs(&[glyph(0, "x"), glyph(12, "A"), glyph(12, "A"), glyph(40, "لا")]);
        assert_eq!(font.used_glyph_count(), 2);
    }

    #[test]
    fn test_encode_glyphs_hex() {
        assert_eq!(FontData::encode_glyphs_hex(&[]), "<>");
        assert_eq!(
            FontData::encode_glyphs_hex(&[glyph(1, "a"), glyph(0x1F3, "b")]),
            "<000101F3>"
        );
    }

    #[test]
    fn test_run_width_points() {
        let font = unparsed_font();
        let width = font.run_width_points(&[glyph(1, "a"), glyph(2, "b")], 10.0);
        assert_eq!(width, 10.0);
    }

    #[test]
    fn test_tounicode_cmap_ligature() {
        let mut font = unparsed_font();
        font.add_glyphs(&[glyph(0x20, "A"), glyph(0x21, "لا")]);
        let cmap = font.generate_tounicode_cmap();
        assert!(cmap.contains("2 beginbfchar"));
        assert!(cmap.contains("<0020> <0041>"));
        assert!(cmap.contains("<0021> <06440627>"));
        assert!(cmap.contains("endcmap"));
    }

    #[test]
    fn test_tounicode_skips_textless_glyphs() {
        let mut font = unparsed_font();
        font.add_glyphs(&[glyph(5, ""), glyph(6, "b")]);
        font.add_glyphs(&[glyph(5, "a")]);
        assert_eq!(font.used_glyph_count(), 2);
        let cmap = font.generate_tounicode_cmap();
        assert!(cmap.contains("<0005> <0061>"));

        let mut font = unparsed_font();
        font.add_glyphs(&[glyph(7, "")]);
        assert!(!font.generate_tounicode_cmap().contains("beginbfchar"));
    }

    #[test]
    fn test_tounicode_cmap_empty() {
        let cmap = unparsed_font().generate_tounicode_cmap();
        assert!(cmap.contains("begincmap"));
        assert!(!cmap.contains("beginbfchar"));
    }

    #[test]
    fn test_to_pdf_objects() {
        let mut font = unparsed_font();
        font.add_glyphs(&[glyph(3, "H")]);
        let objects = font.to_pdf_objects().expect("Failed to generate PDF objects");
        assert_eq!(
            objects.type0_font.get(b"Encoding").unwrap().as_name().unwrap(),
            b"Identity-H"
        );
        assert!(!objects.font_file_stream.content.is_empty());
        assert!(!objects.tounicode_stream.content.is_empty());
    }

    #[test]
    fn test_builtin_widths() {
        let helv = BuiltinFont::Helvetica;
        // "Hi" = 722 + 222
        assert!((helv.text_width_points("Hi", 10.0) - 9.44).abs() < 1e-4);
        let bold = BuiltinFont::for_weight(FontWeight::Bold);
        assert_eq!(bold, BuiltinFont::HelveticaBold);
        assert!(bold.text_width_points("Hi", 10.0) > helv.text_width_points("Hi", 10.0));
    }

    #[test]
    fn test_builtin_encode_literal() {
        let helv = BuiltinFont::Helvetica;
        assert_eq!(helv.encode_literal("a(b)"), "(a\\(b\\))");
        assert_eq!(helv.encode_literal("é"), "(\\351)");
        // Arabic has no WinAnsi mapping
        assert_eq!(helv.encode_literal("سلام"), "(????)");
    }

    #[test]
    fn test_builtin_dict() {
        let dict = BuiltinFont::HelveticaBold.to_pdf_dict();
        assert_eq!(
            dict.get(b"BaseFont").unwrap().as_name().unwrap(),
            b"Helvetica-Bold"
        );
    }
}
