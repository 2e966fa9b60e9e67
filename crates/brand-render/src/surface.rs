//! Drawing surfaces the page driver paints on

use std::sync::Arc;

use arabic_text::{visual_runs, Direction, ShapedGlyph, Shaper};
use pdf_core::{
    Align, BuiltinFont, FontFamilyBuilder, FontWeight, ImageScaleMode, PdfDocument,
    PositionedGlyph,
};

use crate::assets::RasterImage;
use crate::color::Rgb;
use crate::fonts::FontAssets;
use crate::Result;

/// Family name the Arabic faces are registered under
pub const ARABIC_FAMILY: &str = "naskh";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Rgb,
}

impl TextStyle {
    pub fn new(size: f32, color: Rgb) -> Self {
        Self {
            size,
            bold: false,
            color,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Page-addressed drawing primitives; coordinates are points from the top-left
pub trait Surface {
    /// Append a page and return its 1-based number
    fn add_page(&mut self, width: f64, height: f64) -> Result<usize>;

    fn page_count(&self) -> usize;

    /// `y` is the top edge
    fn fill_rect(&mut self, page: usize, x: f64, y: f64, w: f64, h: f64, color: Rgb)
        -> Result<()>;

    #[allow(clippy::too_many_arguments)]
    fn rounded_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        fill: Option<Rgb>,
        stroke: Option<(Rgb, f64)>,
    ) -> Result<()>;

    #[allow(clippy::too_many_arguments)]
    fn line(
        &mut self,
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Rgb,
        width: f64,
    ) -> Result<()>;

    /// `y` is the baseline; `align` says which edge of the text sits at `x`
    fn text(
        &mut self,
        page: usize,
        text: &str,
        x: f64,
        y: f64,
        align: Align,
        style: TextStyle,
    ) -> Result<()>;

    fn text_width(&self, text: &str, style: TextStyle) -> f64;

    /// Fit the image into the box, centered
    #[allow(clippy::too_many_arguments)]
    fn image(
        &mut self,
        page: usize,
        image: &RasterImage,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<()>;
}

struct ArabicFaces<'f> {
    regular: Shaper<'f>,
    bold: Option<Shaper<'f>>,
}

impl<'f> ArabicFaces<'f> {
    fn shaper(&self, bold: bool) -> &Shaper<'f> {
        match (&self.bold, bold) {
            (Some(shaper), true) => shaper,
            _ => &self.regular,
        }
    }
}

/// One visually ordered piece of a line
enum Segment {
    Shaped(Vec<ShapedGlyph>, f64),
    Plain(String, f64),
}

impl Segment {
    fn width(&self) -> f64 {
        match self {
            Segment::Shaped(_, w) | Segment::Plain(_, w) => *w,
        }
    }
}

/// Surface backed by a [`PdfDocument`]
///
/// With Arabic faces loaded every string is split into bidi runs, ordered
/// visually and shaped; Latin runs the Arabic face does not cover fall back
/// to Helvetica. Without them all text goes through Helvetica unshaped.
pub struct PdfSurface<'f> {
    doc: PdfDocument,
    arabic: Option<ArabicFaces<'f>>,
}

impl<'f> PdfSurface<'f> {
    pub fn new(title: &str, fonts: Option<&'f FontAssets>) -> Self {
        let mut doc = PdfDocument::new();
        doc.set_title(title);
        let arabic = fonts.and_then(|fonts| register_arabic(&mut doc, fonts));
        Self { doc, arabic }
    }

    /// Whether text goes through the embedded face and shaper
    pub fn shaping_active(&self) -> bool {
        self.arabic.is_some()
    }

    /// Serialize the document
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.doc.to_bytes()?)
    }

    fn segments(&self, faces: &ArabicFaces<'f>, text: &str, style: TextStyle) -> Vec<Segment> {
        let shaper = faces.shaper(style.bold);
        let builtin = BuiltinFont::for_weight(weight(style));

        visual_runs(text, Direction::Rtl)
            .into_iter()
            .map(|run| {
                if run.direction == Direction::Ltr && !shaper.covers(&run.text) {
                    let width = builtin.text_width_points(&run.text, style.size) as f64;
                    Segment::Plain(run.text, width)
                } else {
                    let glyphs = shaper.shape_run(&run.text, run.direction);
                    let width = shaper.width_points(&glyphs, style.size) as f64;
                    Segment::Shaped(glyphs, width)
                }
            })
            .collect()
    }
}

fn weight(style: TextStyle) -> FontWeight {
    if style.bold {
        FontWeight::Bold
    } else {
        FontWeight::Regular
    }
}

fn register_arabic<'f>(doc: &mut PdfDocument, fonts: &'f FontAssets) -> Option<ArabicFaces<'f>> {
    let regular = fonts.regular.as_ref()?;
    let mut builder = FontFamilyBuilder::new().regular(Arc::clone(regular));
    if let Some(bold) = &fonts.bold {
        builder = builder.bold(Arc::clone(bold));
    }
    if let Err(e) = doc.register_font_family(ARABIC_FAMILY, builder) {
        log::warn!("Arabic font rejected by the PDF writer, falling back to Helvetica: {e}");
        return None;
    }

    let regular = match Shaper::new(regular.as_slice()) {
        Ok(shaper) => shaper,
        Err(e) => {
            log::warn!("Arabic font cannot be shaped, falling back to Helvetica: {e}");
            return None;
        }
    };
    let bold = fonts
        .bold
        .as_ref()
        .and_then(|bytes| Shaper::new(bytes.as_slice()).ok());
    Some(ArabicFaces { regular, bold })
}

impl Surface for PdfSurface<'_> {
    fn add_page(&mut self, width: f64, height: f64) -> Result<usize> {
        Ok(self.doc.add_page(width, height)?)
    }

    fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    fn fill_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgb,
    ) -> Result<()> {
        Ok(self.doc.fill_rect(page, x, y, w, h, color.to_pdf())?)
    }

    fn rounded_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        fill: Option<Rgb>,
        stroke: Option<(Rgb, f64)>,
    ) -> Result<()> {
        Ok(self.doc.draw_rounded_rect(
            page,
            x,
            y,
            w,
            h,
            radius,
            fill.map(Rgb::to_pdf),
            stroke.map(|(color, width)| (color.to_pdf(), width)),
        )?)
    }

    fn line(
        &mut self,
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Rgb,
        width: f64,
    ) -> Result<()> {
        Ok(self
            .doc
            .draw_line(page, x1, y1, x2, y2, color.to_pdf(), width)?)
    }

    fn text(
        &mut self,
        page: usize,
        text: &str,
        x: f64,
        y: f64,
        align: Align,
        style: TextStyle,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.doc.set_font_weight(weight(style));
        self.doc.set_text_color(style.color.to_pdf());

        let Some(faces) = &self.arabic else {
            self.doc.use_builtin_font(style.size);
            return Ok(self.doc.insert_text(text, page, x, y, align)?);
        };

        let segments = self.segments(faces, text, style);
        let total: f64 = segments.iter().map(Segment::width).sum();
        let mut cursor = match align {
            Align::Left => x,
            Align::Center => x - total / 2.0,
            Align::Right => x - total,
        };

        for segment in segments {
            match &segment {
                Segment::Plain(run, _) => {
                    self.doc.use_builtin_font(style.size);
                    self.doc.insert_text(run, page, cursor, y, Align::Left)?;
                }
                Segment::Shaped(glyphs, _) => {
                    let positioned: Vec<PositionedGlyph> = glyphs
                        .iter()
                        .map(|g| PositionedGlyph {
                            glyph_id: g.glyph_id,
                            advance: g.x_advance,
                            text: g.text.clone(),
                        })
                        .collect();
                    self.doc.set_font(ARABIC_FAMILY, style.size)?;
                    self.doc
                        .insert_glyphs(&positioned, page, cursor, y, Align::Left)?;
                }
            }
            cursor += segment.width();
        }
        Ok(())
    }

    fn text_width(&self, text: &str, style: TextStyle) -> f64 {
        match &self.arabic {
            Some(faces) => self
                .segments(faces, text, style)
                .iter()
                .map(Segment::width)
                .sum(),
            None => {
                BuiltinFont::for_weight(weight(style)).text_width_points(text, style.size) as f64
            }
        }
    }

    fn image(
        &mut self,
        page: usize,
        image: &RasterImage,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<()> {
        Ok(self
            .doc
            .insert_image_scaled(&image.bytes, page, x, y, w, h, ImageScaleMode::FitBox)?)
    }
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    AddPage { page: usize },
    FillRect { page: usize, x: f64, y: f64, w: f64, h: f64, color: Rgb },
    RoundedRect { page: usize, x: f64, y: f64, w: f64, h: f64, fill: Option<Rgb> },
    Line { page: usize, x1: f64, y1: f64, x2: f64, y2: f64 },
    Text { page: usize, text: String, x: f64, y: f64, align: Align, style: TextStyle },
    Image { page: usize, x: f64, y: f64, w: f64, h: f64 },
}

/// Surface that records calls instead of drawing
///
/// Text is measured as half the font size per character.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pages: usize,
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded text calls, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = (usize, &str, f64, f64, Align)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            SurfaceCall::Text {
                page,
                text,
                x,
                y,
                align,
                ..
            } => Some((*page, text.as_str(), *x, *y, *align)),
            _ => None,
        })
    }

    /// First text call with exactly this content
    pub fn find_text(&self, needle: &str) -> Option<(usize, f64, f64, Align)> {
        self.texts()
            .find(|(_, text, ..)| *text == needle)
            .map(|(page, _, x, y, align)| (page, x, y, align))
    }
}

impl Surface for RecordingSurface {
    fn add_page(&mut self, _width: f64, _height: f64) -> Result<usize> {
        self.pages += 1;
        self.calls.push(SurfaceCall::AddPage { page: self.pages });
        Ok(self.pages)
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn fill_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgb,
    ) -> Result<()> {
        self.calls.push(SurfaceCall::FillRect {
            page,
            x,
            y,
            w,
            h,
            color,
        });
        Ok(())
    }

    fn rounded_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        _radius: f64,
        fill: Option<Rgb>,
        _stroke: Option<(Rgb, f64)>,
    ) -> Result<()> {
        self.calls.push(SurfaceCall::RoundedRect {
            page,
            x,
            y,
            w,
            h,
            fill,
        });
        Ok(())
    }

    fn line(
        &mut self,
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        _color: Rgb,
        _width: f64,
    ) -> Result<()> {
        self.calls.push(SurfaceCall::Line {
            page,
            x1,
            y1,
            x2,
            y2,
        });
        Ok(())
    }

    fn text(
        &mut self,
        page: usize,
        text: &str,
        x: f64,
        y: f64,
        align: Align,
        style: TextStyle,
    ) -> Result<()> {
        self.calls.push(SurfaceCall::Text {
            page,
            text: text.to_string(),
            x,
            y,
            align,
            style,
        });
        Ok(())
    }

    fn text_width(&self, text: &str, style: TextStyle) -> f64 {
        text.chars().count() as f64 * style.size as f64 * 0.5
    }

    fn image(
        &mut self,
        page: usize,
        _image: &RasterImage,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<()> {
        self.calls.push(SurfaceCall::Image { page, x, y, w, h });
        Ok(())
    }
}
