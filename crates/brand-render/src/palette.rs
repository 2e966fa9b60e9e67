//! 11-stop tint/shade scales derived from one brand color

use crate::branding::TenantBranding;
use crate::color::{mix_color, parse_hex_color, Rgb};

/// Stop keys of a palette scale, lightest first
pub const STOPS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Mix weight per stop: positive toward white, negative toward black
const WEIGHTS: [f64; 11] = [
    0.92, 0.84, 0.70, 0.52, 0.30, 0.0, -0.12, -0.28, -0.42, -0.56, -0.72,
];

pub const DEFAULT_PRIMARY: Rgb = Rgb::new(0x25, 0x63, 0xEB);
pub const DEFAULT_SECONDARY: Rgb = Rgb::new(0xD9, 0x46, 0xEF);

/// Tints and shades of one base color, indexed by [`STOPS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteScale {
    colors: [Rgb; 11],
}

impl PaletteScale {
    /// Color at a stop key; None for keys outside [`STOPS`]
    pub fn get(&self, stop: u16) -> Option<Rgb> {
        STOPS
            .iter()
            .position(|&s| s == stop)
            .map(|idx| self.colors[idx])
    }

    /// Color at a stop key, the base color for unknown keys
    pub fn tone(&self, stop: u16) -> Rgb {
        self.get(stop).unwrap_or(self.base())
    }

    pub fn base(&self) -> Rgb {
        self.colors[5]
    }

    /// `(stop, color)` pairs, lightest first
    pub fn entries(&self) -> impl Iterator<Item = (u16, Rgb)> + '_ {
        STOPS.iter().copied().zip(self.colors.iter().copied())
    }
}

/// Build the scale for a base color
pub fn build_scale(base: Rgb) -> PaletteScale {
    let mut colors = [base; 11];
    for (color, &weight) in colors.iter_mut().zip(WEIGHTS.iter()) {
        *color = if weight > 0.0 {
            mix_color(base, Rgb::WHITE, weight)
        } else if weight < 0.0 {
            mix_color(base, Rgb::BLACK, -weight)
        } else {
            base
        };
    }
    PaletteScale { colors }
}

/// Resolved tenant colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandColors {
    pub primary: Rgb,
    pub secondary: Rgb,
}

impl Default for BrandColors {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY,
            secondary: DEFAULT_SECONDARY,
        }
    }
}

/// Resolve brand colors, falling back per color when missing or unparsable
pub fn resolve_brand_colors(branding: &TenantBranding) -> BrandColors {
    let pick = |value: Option<&str>, fallback: Rgb, which: &str| {
        match value.map(|v| (v, parse_hex_color(v))) {
            Some((_, Some(color))) => color,
            Some((raw, None)) => {
                log::debug!("Ignoring unparsable {which} color {raw:?}");
                fallback
            }
            None => fallback,
        }
    };

    BrandColors {
        primary: pick(
            branding.primary_color.as_deref(),
            DEFAULT_PRIMARY,
            "primary",
        ),
        secondary: pick(
            branding.secondary_color.as_deref(),
            DEFAULT_SECONDARY,
            "secondary",
        ),
    }
}
