//! Glyph shaping with rustybuzz

use crate::bidi::Direction;
use crate::{Result, TextError};
use rustybuzz::{Face, UnicodeBuffer};

/// A shaped glyph in visual order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedGlyph {
    /// Glyph ID in the font
    pub glyph_id: u16,
    /// Horizontal advance in font units
    pub x_advance: i32,
    /// Source text of the cluster; empty for the secondary glyphs of a cluster
    pub text: String,
}

/// Text shaper bound to one font face
pub struct Shaper<'a> {
    face: Face<'a>,
}

impl<'a> Shaper<'a> {
    /// Parse the font for shaping
    pub fn new(font_data: &'a [u8]) -> Result<Self> {
        let face = Face::from_slice(font_data, 0).ok_or(TextError::FontParseError)?;
        Ok(Self { face })
    }

    /// Font units per em
    pub fn units_per_em(&self) -> u16 {
        self.face.units_per_em().max(1) as u16
    }

    /// Shape a single-direction run; glyphs come back in visual order
    pub fn shape_run(&self, text: &str, direction: Direction) -> Vec<ShapedGlyph> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(match direction {
            Direction::Ltr => rustybuzz::Direction::LeftToRight,
            Direction::Rtl => rustybuzz::Direction::RightToLeft,
        });
        buffer.guess_segment_properties();

        let output = rustybuzz::shape(&self.face, &[], buffer);
        let infos = output.glyph_infos();
        let positions = output.glyph_positions();

        // cluster boundaries in logical order
        let mut boundaries: Vec<usize> = infos.iter().map(|g| g.cluster as usize).collect();
        boundaries.push(text.len());
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut seen = Vec::with_capacity(boundaries.len());
        infos
            .iter()
            .zip(positions.iter())
            .map(|(info, pos)| {
                let start = info.cluster as usize;
                let cluster_text = if seen.contains(&start) {
                    String::new()
                } else {
                    seen.push(start);
                    let end = boundaries
                        .iter()
                        .copied()
                        .find(|&b| b > start)
                        .unwrap_or(text.len());
                    text.get(start..end).unwrap_or_default().to_string()
                };
                ShapedGlyph {
                    glyph_id: info.glyph_id as u16,
                    x_advance: pos.x_advance,
                    text: cluster_text,
                }
            })
            .collect()
    }

    /// Width of a glyph sequence in points
    pub fn width_points(&self, glyphs: &[ShapedGlyph], font_size: f32) -> f32 {
        let units: i32 = glyphs.iter().map(|g| g.x_advance).sum();
        units as f32 / self.units_per_em() as f32 * font_size
    }

    /// Whether the face maps every non-space character of the text
    pub fn covers(&self, text: &str) -> bool {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .all(|c| self.face.glyph_index(c).map(|g| g.0 != 0).unwrap_or(false))
    }
}
