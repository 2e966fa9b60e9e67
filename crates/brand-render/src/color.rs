//! Color math: hex parsing, linear mixing, clamping

use std::fmt;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`, uppercase
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance in `[0, 1]`
    pub fn luminance(self) -> f64 {
        fn linear(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Drawing color for the PDF surface
    pub fn to_pdf(self) -> pdf_core::Color {
        pdf_core::Color::from_rgb(self.r, self.g, self.b)
    }

    /// Channels as a space-separated triplet (`"37 99 235"`)
    pub fn channels(self) -> String {
        format!("{} {} {}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parse `#RGB` or `#RRGGBB` (leading `#` optional, surrounding whitespace ignored)
pub fn parse_hex_color(input: &str) -> Option<Rgb> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |c: u8| -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            _ => c - b'A' + 10,
        }
    };
    let bytes = hex.as_bytes();

    match bytes.len() {
        3 => {
            let expand = |c: u8| nibble(c) * 17;
            Some(Rgb::new(expand(bytes[0]), expand(bytes[1]), expand(bytes[2])))
        }
        6 => {
            let pair = |i: usize| nibble(bytes[i]) * 16 + nibble(bytes[i + 1]);
            Some(Rgb::new(pair(0), pair(2), pair(4)))
        }
        _ => None,
    }
}

/// Clamp a channel value into `[0, 255]`, rounding to the nearest integer
pub fn clamp_channel(n: f64) -> u8 {
    if n.is_nan() {
        return 0;
    }
    n.round().clamp(0.0, 255.0) as u8
}

/// `round(a * (1 - w) + b * w)` with the weight clamped to `[0, 1]`
pub fn mix_channel(a: u8, b: u8, weight: f64) -> u8 {
    let w = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };
    clamp_channel(a as f64 * (1.0 - w) + b as f64 * w)
}

/// Channel-wise [`mix_channel`]
pub fn mix_color(a: Rgb, b: Rgb, weight: f64) -> Rgb {
    Rgb::new(
        mix_channel(a.r, b.r, weight),
        mix_channel(a.g, b.g, weight),
        mix_channel(a.b, b.b, weight),
    )
}
