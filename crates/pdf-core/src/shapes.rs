//! Vector drawing operators (rectangles, rounded boxes, rules)
//!
//! All coordinates here are already in PDF user space (bottom-left origin).

use crate::document::Color;

/// Control point ratio for approximating a quarter circle with a cubic bezier
const KAPPA: f64 = 0.552_284_75;

/// Format a number for a content stream: at most 3 decimals, trailing zeros trimmed
pub(crate) fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn fill_color(color: Color) -> String {
    format!(
        "{} {} {} rg\n",
        num(color.r as f64),
        num(color.g as f64),
        num(color.b as f64)
    )
}

fn stroke_color(color: Color) -> String {
    format!(
        "{} {} {} RG\n",
        num(color.r as f64),
        num(color.g as f64),
        num(color.b as f64)
    )
}

/// Filled axis-aligned rectangle
pub fn rect_operators(x: f64, y: f64, width: f64, height: f64, color: Color) -> Vec<u8> {
    format!(
        "q\n{}{} {} {} {} re\nf\nQ\n",
        fill_color(color),
        num(x),
        num(y),
        num(width),
        num(height)
    )
    .into_bytes()
}

/// Rounded rectangle path, optionally filled and/or stroked
///
/// The radius is clamped to half the shorter side.
pub fn rounded_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    fill: Option<Color>,
    stroke: Option<(Color, f64)>,
) -> Vec<u8> {
    if fill.is_none() && stroke.is_none() {
        return Vec::new();
    }

    let r = radius.max(0.0).min(width / 2.0).min(height / 2.0);
    let k = r * KAPPA;
    let (x0, y0, x1, y1) = (x, y, x + width, y + height);

    let mut ops = String::from("q\n");
    if let Some(color) = fill {
        ops.push_str(&fill_color(color));
    }
    if let Some((color, line_width)) = stroke {
        ops.push_str(&stroke_color(color));
        ops.push_str(&format!("{} w\n", num(line_width)));
    }

    ops.push_str(&format!("{} {} m\n", num(x0 + r), num(y0)));
    ops.push_str(&format!("{} {} l\n", num(x1 - r), num(y0)));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        num(x1 - r + k),
        num(y0),
        num(x1),
        num(y0 + r - k),
        num(x1),
        num(y0 + r)
    ));
    ops.push_str(&format!("{} {} l\n", num(x1), num(y1 - r)));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        num(x1),
        num(y1 - r + k),
        num(x1 - r + k),
        num(y1),
        num(x1 - r),
        num(y1)
    ));
    ops.push_str(&format!("{} {} l\n", num(x0 + r), num(y1)));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        num(x0 + r - k),
        num(y1),
        num(x0),
        num(y1 - r + k),
        num(x0),
        num(y1 - r)
    ));
    ops.push_str(&format!("{} {} l\n", num(x0), num(y0 + r)));
    ops.push_str(&format!(
        "{} {} {} {} {} {} c\n",
        num(x0),
        num(y0 + r - k),
        num(x0 + r - k),
        num(y0),
        num(x0 + r),
        num(y0)
    ));
    ops.push_str("h\n");

    let paint = match (fill.is_some(), stroke.is_some()) {
        (true, true) => "B",
        (true, false) => "f",
        _ => "S",
    };
    ops.push_str(paint);
    ops.push_str("\nQ\n");

    ops.into_bytes()
}

/// Straight stroked line
pub fn line_operators(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    line_width: f64,
) -> Vec<u8> {
    format!(
        "q\n{}{} w\n{} {} m\n{} {} l\nS\nQ\n",
        stroke_color(color),
        num(line_width),
        num(x1),
        num(y1),
        num(x2),
        num(y2)
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_num_trims() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(595.28), "595.28");
        assert_eq!(num(1.0 / 3.0), "0.333");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(f64::NAN), "0");
    }

    #[test]
    fn test_rect_operators() {
        let ops = String::from_utf8(rect_operators(10.0, 20.0, 30.0, 40.0, Color::black())).unwrap();
        assert_eq!(ops, "q\n0 0 0 rg\n10 20 30 40 re\nf\nQ\n");
    }

    #[test]
    fn test_rounded_rect_paint_modes() {
        let fill_only =
            String::from_utf8(rounded_rect_operators(0.0, 0.0, 100.0, 50.0, 6.0, Some(Color::white()), None))
                .unwrap();
        assert!(fill_only.contains("\nf\nQ"));
        assert!(fill_only.contains("6 0 m"));

        let both = String::from_utf8(rounded_rect_operators(
            0.0,
            0.0,
            100.0,
            50.0,
            6.0,
            Some(Color::white()),
            Some((Color::black(), 0.5)),
        ))
        .unwrap();
        assert!(both.contains("0.5 w"));
        assert!(both.contains("\nB\nQ"));

        let stroke_only = String::from_utf8(rounded_rect_operators(
            0.0,
            0.0,
            10.0,
            10.0,
            2.0,
            None,
            Some((Color::black(), 1.0)),
        ))
        .unwrap();
        assert!(stroke_only.contains("\nS\nQ"));
    }

    #[test]
    fn test_rounded_rect_radius_clamped() {
        let ops = String::from_utf8(rounded_rect_operators(0.0, 0.0, 10.0, 4.0, 50.0, Some(Color::black()), None))
            .unwrap();
        // radius clamps to 2
        assert!(ops.contains("2 0 m"));
    }

    #[test]
    fn test_rounded_rect_nothing_to_paint() {
        assert!(rounded_rect_operators(0.0, 0.0, 1.0, 1.0, 0.0, None, None).is_empty());
    }

    #[test]
    fn test_line_operators() {
        let ops = String::from_utf8(line_operators(0.0, 5.0, 100.0, 5.0, Color::black(), 0.75)).unwrap();
        assert_eq!(ops, "q\n0 0 0 RG\n0.75 w\n0 5 m\n100 5 l\nS\nQ\n");
    }
}
