//! Page skins
//!
//! A template id selects one row of a fixed table; everything downstream
//! reads the resolved [`Theme`] and never branches on the id again.

use crate::color::{mix_color, Rgb};
use crate::palette::{build_scale, PaletteScale};

/// Number of discrete color steps in a gradient bar
pub const GRADIENT_STEPS: usize = 24;

/// Width of the template-3 sidebar block
pub const SIDEBAR_WIDTH: f64 = 56.0;

const TOP_BAR_HEIGHT: f64 = 6.0;
const THIN_BAR_HEIGHT: f64 = 2.0;

const GRAY_900: Rgb = Rgb::new(0x11, 0x18, 0x27);
const GRAY_700: Rgb = Rgb::new(0x37, 0x41, 0x51);
const GRAY_500: Rgb = Rgb::new(0x6B, 0x72, 0x80);
const GRAY_200: Rgb = Rgb::new(0xE5, 0xE7, 0xEB);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateId {
    /// Flat top bar
    #[default]
    Plain = 1,
    /// Stepped primary-to-secondary top bar
    GradientBar = 2,
    /// Full-height colored sidebar
    Sidebar = 3,
    /// Thin accent bar with a solid table head
    ThinBar = 4,
    /// Dark header band
    DarkBand = 5,
}

impl TemplateId {
    /// Map a stored template number; anything outside 1-5 is the plain skin
    pub fn from_id(id: Option<i64>) -> Self {
        match id {
            Some(1) | None => TemplateId::Plain,
            Some(2) => TemplateId::GradientBar,
            Some(3) => TemplateId::Sidebar,
            Some(4) => TemplateId::ThinBar,
            Some(5) => TemplateId::DarkBand,
            Some(other) => {
                log::debug!("Unknown invoice template {other}, using template 1");
                TemplateId::Plain
            }
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Decoration drawn behind each page's header
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStyle {
    /// Solid bar across the top edge
    Bar { height: f64, color: Rgb },
    /// Bar made of equal-width solid steps
    SteppedBar { height: f64, steps: Vec<Rgb> },
    /// Full-height block on the trailing edge
    Sidebar { width: f64, color: Rgb },
    /// Solid header band with a stepped bar on top of it
    Band {
        height: f64,
        color: Rgb,
        bar_height: f64,
        steps: Vec<Rgb>,
    },
}

/// Resolved drawing configuration for one render
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub template: TemplateId,
    pub sidebar_width: f64,
    pub frame: FrameStyle,
    pub header_title_color: Rgb,
    pub header_muted_color: Rgb,
    pub meta_fill_color: Rgb,
    pub table_head_fill_color: Rgb,
    pub table_head_text_color: Rgb,
    pub alternate_row_color: Rgb,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub border_color: Rgb,
    pub body_text_color: Rgb,
    pub muted_text_color: Rgb,
    pub primary_scale: PaletteScale,
    pub secondary_scale: PaletteScale,
}

/// `n` solid colors stepping linearly from `from` to `to`
pub fn gradient_steps(from: Rgb, to: Rgb, n: usize) -> Vec<Rgb> {
    match n {
        0 => Vec::new(),
        1 => vec![from],
        _ => (0..n)
            .map(|i| mix_color(from, to, i as f64 / (n - 1) as f64))
            .collect(),
    }
}

/// Resolve the theme for a template id and brand colors
pub fn select_theme(template_id: Option<i64>, primary: Rgb, secondary: Rgb) -> Theme {
    let template = TemplateId::from_id(template_id);
    let primary_scale = build_scale(primary);
    let secondary_scale = build_scale(secondary);

    let mut theme = Theme {
        template,
        sidebar_width: 0.0,
        frame: FrameStyle::Bar {
            height: TOP_BAR_HEIGHT,
            color: primary,
        },
        header_title_color: GRAY_900,
        header_muted_color: GRAY_500,
        meta_fill_color: primary_scale.tone(50),
        table_head_fill_color: primary_scale.tone(100),
        table_head_text_color: primary_scale.tone(900),
        alternate_row_color: primary_scale.tone(50),
        primary,
        secondary,
        border_color: GRAY_200,
        body_text_color: GRAY_700,
        muted_text_color: GRAY_500,
        primary_scale,
        secondary_scale,
    };

    match template {
        TemplateId::Plain => {}
        TemplateId::GradientBar => {
            theme.frame = FrameStyle::SteppedBar {
                height: TOP_BAR_HEIGHT,
                steps: gradient_steps(primary, secondary, GRADIENT_STEPS),
            };
        }
        TemplateId::Sidebar => {
            theme.sidebar_width = SIDEBAR_WIDTH;
            theme.frame = FrameStyle::Sidebar {
                width: SIDEBAR_WIDTH,
                color: primary,
            };
        }
        TemplateId::ThinBar => {
            theme.frame = FrameStyle::Bar {
                height: THIN_BAR_HEIGHT,
                color: primary,
            };
            theme.table_head_fill_color = primary;
            theme.table_head_text_color = Rgb::WHITE;
            theme.meta_fill_color = Rgb::WHITE;
            theme.alternate_row_color = Rgb::WHITE;
        }
        TemplateId::DarkBand => {
            let band = primary_scale.tone(900);
            theme.frame = FrameStyle::Band {
                height: crate::layout::HEADER_BAND,
                color: band,
                bar_height: TOP_BAR_HEIGHT,
                steps: gradient_steps(primary, secondary, GRADIENT_STEPS),
            };
            theme.header_title_color = Rgb::WHITE;
            theme.header_muted_color = GRAY_200;
            theme.table_head_fill_color = band;
            theme.table_head_text_color = Rgb::WHITE;
            theme.meta_fill_color = Rgb::WHITE;
        }
    }

    theme
}
