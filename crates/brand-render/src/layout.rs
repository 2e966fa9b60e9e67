//! Direction-aware page geometry
//!
//! Composers and the page driver never compute a physical x coordinate on
//! their own: they ask the [`RenderContext`] for a leading/trailing anchor or a
//! box position measured from the leading edge, and the context mirrors it
//! for right-to-left documents.

use arabic_text::{Direction, Language};
use pdf_core::{Align, A4_HEIGHT, A4_WIDTH};

use crate::theme::Theme;

pub const PAGE_WIDTH: f64 = A4_WIDTH;
pub const PAGE_HEIGHT: f64 = A4_HEIGHT;
pub const MARGIN: f64 = 40.0;
pub const FOOTER_BAND: f64 = 44.0;
pub const HEADER_BAND: f64 = 98.0;
pub const CONTENT_TOP: f64 = 106.0;

/// Physical page edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Per-render geometry and cursor state
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub language: Language,
    pub is_rtl: bool,
    /// Alignment of leading-side text
    pub align: Align,
    pub opposite_align: Align,
    pub page_width: f64,
    pub page_height: f64,
    pub content_left: f64,
    pub content_right: f64,
    pub content_width: f64,
    /// Physical edge the sidebar sits on, if the theme has one
    pub sidebar: Option<(Side, f64)>,
    /// Vertical cursor, measured from the top edge
    pub y: f64,
    /// Current page, 1-based; 0 before the first page opens
    pub page: usize,
    /// Whether text goes through the embedded Arabic font and shaper
    pub shaping_active: bool,
}

impl RenderContext {
    /// A4 portrait with the standard margin
    pub fn new(language: Language, theme: &Theme, shaping_active: bool) -> Self {
        Self::with_page(
            language,
            theme,
            shaping_active,
            PAGE_WIDTH,
            PAGE_HEIGHT,
            MARGIN,
        )
    }

    pub fn with_page(
        language: Language,
        theme: &Theme,
        shaping_active: bool,
        page_width: f64,
        page_height: f64,
        margin: f64,
    ) -> Self {
        let is_rtl = language.is_rtl();
        let (align, opposite_align) = if is_rtl {
            (Align::Right, Align::Left)
        } else {
            (Align::Left, Align::Right)
        };

        // the sidebar hugs the trailing edge
        let sidebar = (theme.sidebar_width > 0.0).then(|| {
            let side = if is_rtl { Side::Left } else { Side::Right };
            (side, theme.sidebar_width)
        });
        let (content_left, content_right) = match sidebar {
            Some((Side::Left, width)) => (margin + width, margin),
            Some((Side::Right, width)) => (margin, margin + width),
            None => (margin, margin),
        };

        Self {
            language,
            is_rtl,
            align,
            opposite_align,
            page_width,
            page_height,
            content_left,
            content_right,
            content_width: (page_width - content_left - content_right).max(0.0),
            sidebar,
            y: CONTENT_TOP,
            page: 0,
            shaping_active,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.is_rtl {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    /// Physical x of the content box's leading edge
    pub fn leading_x(&self) -> f64 {
        if self.is_rtl {
            self.page_width - self.content_right
        } else {
            self.content_left
        }
    }

    /// Physical x of the content box's trailing edge
    pub fn trailing_x(&self) -> f64 {
        if self.is_rtl {
            self.content_left
        } else {
            self.page_width - self.content_right
        }
    }

    /// Text anchor `offset` points in from the leading edge
    pub fn leading_anchor(&self, offset: f64) -> f64 {
        if self.is_rtl {
            self.leading_x() - offset
        } else {
            self.leading_x() + offset
        }
    }

    /// Text anchor `offset` points in from the trailing edge
    pub fn trailing_anchor(&self, offset: f64) -> f64 {
        if self.is_rtl {
            self.trailing_x() + offset
        } else {
            self.trailing_x() - offset
        }
    }

    /// Reflect a box across the page's vertical center line
    pub fn mirror_x(&self, x: f64, width: f64) -> f64 {
        self.page_width - x - width
    }

    /// Physical left edge of a box placed `offset` from the leading edge
    pub fn place_box(&self, offset: f64, width: f64) -> f64 {
        if self.is_rtl {
            // mirror inside the content box, not the page
            self.content_left + self.content_width - offset - width
        } else {
            self.content_left + offset
        }
    }

    /// Text anchor inside a box for a physical alignment
    pub fn anchor_in_box(x: f64, width: f64, padding: f64, align: Align) -> f64 {
        match align {
            Align::Left => x + padding,
            Align::Center => x + width / 2.0,
            Align::Right => x + width - padding,
        }
    }

    /// Lowest y content may reach before the footer band
    pub fn content_bottom(&self) -> f64 {
        self.page_height - FOOTER_BAND
    }

    /// Vertical space left on the current page
    pub fn remaining(&self) -> f64 {
        self.content_bottom() - self.y
    }
}
