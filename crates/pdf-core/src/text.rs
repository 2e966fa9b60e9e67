//! Text rendering utilities

use crate::document::Color;
use crate::shapes::num;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Calculate X offset for text alignment inside a container
///
/// # Arguments
/// * `text_width` - Width of text in points
/// * `container_width` - Available width for alignment
/// * `align` - Desired alignment
pub fn calculate_x_offset(text_width: f64, container_width: f64, align: Align) -> f64 {
    match align {
        Align::Left => 0.0,
        Align::Center => (container_width - text_width) / 2.0,
        Align::Right => container_width - text_width,
    }
}

/// Generate PDF operators for text insertion
///
/// Creates the PDF text operators (BT, rg, Tf, Td, Tj, ET) to render an
/// already-encoded string at a position, anchored according to `align`.
///
/// # Arguments
/// * `encoded` - Encoded string operand (`<0041...>` or `(literal)`)
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Which edge of the text sits at `x`
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    encoded: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let mut ops = String::new();
    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        num(ctx.color.r as f64),
        num(ctx.color.g as f64),
        num(ctx.color.b as f64)
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, num(ctx.font_size as f64)));
    ops.push_str(&format!("{} {} Td\n", num(x + x_offset), num(y)));
    ops.push_str(&format!("{encoded} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Greedy word wrap against a width measure
///
/// A word wider than `max_width` on its own is broken at character
/// boundaries; every line holds at least one character. Explicit newlines
/// always break.
pub fn wrap_to_width<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{current_line} {word}")
            };
            if measure(&candidate) <= max_width {
                current_line = candidate;
                continue;
            }
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            if measure(word) <= max_width {
                current_line = word.to_string();
            } else {
                current_line = break_word(word, max_width, &measure, &mut lines);
            }
        }

        lines.push(current_line);
    }

    lines
}

/// Push full-width pieces of `word` onto `lines`, returning the tail
fn break_word<F>(word: &str, max_width: f64, measure: &F, lines: &mut Vec<String>) -> String
where
    F: Fn(&str) -> f64,
{
    let mut piece = String::new();
    for c in word.chars() {
        let mut next = piece.clone();
        next.push(c);
        if !piece.is_empty() && measure(&next) > max_width {
            lines.push(std::mem::replace(&mut piece, c.to_string()));
        } else {
            piece = next;
        }
    }
    piece
}
