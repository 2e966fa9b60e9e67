//! Document composers
//!
//! A composer turns one record into an ordered list of [`DrawOp`]s with all
//! horizontal geometry resolved through the [`RenderContext`]. Colors are the
//! page driver's business; composers only decide what goes where.

mod invoice;
mod project;
mod report;

pub use invoice::compose_invoice;
pub use project::{compose_project, sort_updates_newest_first};
pub use report::compose_report;

use arabic_text::{format_currency, format_number, Language};
use pdf_core::Align;

use crate::assets::RasterImage;
use crate::labels::Labels;
use crate::layout::RenderContext;
use crate::ops::{
    compute_column_widths, layout_columns, Column, DrawOp, FooterOp, HeaderOp, MetaCardOp,
    PlacedImage, SectionTitleOp, TableOp, TotalsOp, TotalsRow,
};
use crate::record::DocumentRecord;

const LOGO_SIZE: f64 = 56.0;
const LOGO_Y: f64 = 22.0;
const QR_SIZE: f64 = 64.0;
const QR_Y: f64 = 18.0;
const HEADER_GAP: f64 = 12.0;

const META_COLUMN_INSET: f64 = 12.0;
const META_VALUE_OFFSET: f64 = 90.0;
const META_LABEL_GAP: f64 = 6.0;

const TOTALS_WIDTH: f64 = 220.0;

/// Inputs shared by every composer besides the record itself
#[derive(Debug, Clone)]
pub struct ComposeEnv {
    pub labels: &'static Labels,
    pub logo: Option<RasterImage>,
    /// Already formatted for display
    pub generated_at: String,
}

/// Dispatch to the composer for the record's kind
pub fn compose(record: &DocumentRecord, ctx: &RenderContext, env: &ComposeEnv) -> Vec<DrawOp> {
    match record {
        DocumentRecord::Invoice(invoice) => compose_invoice(invoice, ctx, env),
        DocumentRecord::Report(report) => compose_report(report, ctx, env),
        DocumentRecord::Project(project) => compose_project(project, ctx, env),
    }
}

/// How a column's cells align relative to reading direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    /// Leading-aligned; wraps when it is the description column
    Text,
    /// Trailing-aligned
    Numeric,
    Center,
}

pub(crate) struct ColumnSpec<'a> {
    pub header: &'a str,
    pub base_width: f64,
    pub kind: ColumnKind,
}

pub(crate) fn header_op(
    ctx: &RenderContext,
    env: &ComposeEnv,
    title: &str,
    subtitle: &str,
    number: &str,
    date: &str,
    qr: Option<RasterImage>,
) -> HeaderOp {
    let logo = env.logo.clone().map(|image| PlacedImage {
        image,
        x: ctx.place_box(0.0, LOGO_SIZE),
        y: LOGO_Y,
        size: LOGO_SIZE,
    });
    let title_offset = if logo.is_some() {
        LOGO_SIZE + HEADER_GAP
    } else {
        0.0
    };

    let qr = qr.map(|image| PlacedImage {
        image,
        x: ctx.place_box(ctx.content_width - QR_SIZE, QR_SIZE),
        y: QR_Y,
        size: QR_SIZE,
    });
    let meta_offset = if qr.is_some() {
        QR_SIZE + HEADER_GAP
    } else {
        0.0
    };

    HeaderOp {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        number: number.to_string(),
        date: date.to_string(),
        logo,
        qr,
        title_x: ctx.leading_anchor(title_offset),
        meta_x: ctx.trailing_anchor(meta_offset),
        meta_x_continued: ctx.trailing_anchor(0.0),
        title_align: ctx.align,
        meta_align: ctx.opposite_align,
    }
}

/// Full-width card, two label/value pairs per row
pub(crate) fn meta_card(ctx: &RenderContext, pairs: Vec<(String, String)>) -> DrawOp {
    let width = ctx.content_width;
    let half = width / 2.0;
    let rows = pairs
        .chunks(2)
        .map(|chunk| [chunk.first().cloned(), chunk.get(1).cloned()])
        .collect();
    DrawOp::MetaCard(MetaCardOp {
        x: ctx.place_box(0.0, width),
        width,
        column_x: [
            ctx.leading_anchor(META_COLUMN_INSET),
            ctx.leading_anchor(half + META_COLUMN_INSET),
        ],
        value_offset: if ctx.is_rtl {
            -META_VALUE_OFFSET
        } else {
            META_VALUE_OFFSET
        },
        label_width: META_VALUE_OFFSET - META_LABEL_GAP,
        // stop one inset short of the next column or the card edge
        value_width: (half - 2.0 * META_COLUMN_INSET - META_VALUE_OFFSET).max(0.0),
        align: ctx.align,
        rows,
    })
}

pub(crate) fn section_title(ctx: &RenderContext, text: &str) -> DrawOp {
    DrawOp::SectionTitle(SectionTitleOp {
        text: text.to_string(),
        x: ctx.leading_anchor(0.0),
        align: ctx.align,
    })
}

/// A full-width table; `description` is the column that absorbs spare width
pub(crate) fn table(
    ctx: &RenderContext,
    specs: &[ColumnSpec<'_>],
    description: usize,
    rows: Vec<Vec<String>>,
    no_data: &str,
) -> DrawOp {
    let base: Vec<f64> = specs.iter().map(|s| s.base_width).collect();
    let widths = compute_column_widths(&base, description, ctx.content_width);
    let xs = layout_columns(&widths, |offset, width| ctx.place_box(offset, width));

    let columns = specs
        .iter()
        .zip(widths.iter().zip(xs))
        .enumerate()
        .map(|(i, (spec, (&width, x)))| Column {
            header: spec.header.to_string(),
            x,
            width,
            align: match spec.kind {
                ColumnKind::Text => ctx.align,
                ColumnKind::Numeric => ctx.opposite_align,
                ColumnKind::Center => Align::Center,
            },
            wrap: i == description,
        })
        .collect();

    DrawOp::Table(TableOp::new(columns, rows, no_data, Align::Center))
}

/// Key/value block on the trailing side, `min(220, content width)` wide
pub(crate) fn totals_block(ctx: &RenderContext, rows: Vec<TotalsRow>) -> DrawOp {
    let width = TOTALS_WIDTH.min(ctx.content_width);
    DrawOp::TotalsBlock(TotalsOp {
        x: ctx.place_box(ctx.content_width - width, width),
        width,
        rows,
        align: ctx.align,
    })
}

pub(crate) fn footer(ctx: &RenderContext, env: &ComposeEnv) -> DrawOp {
    DrawOp::FooterPass(FooterOp {
        generated_at: format!("{}: {}", env.labels.generated_at, env.generated_at),
        page_label: env.labels.page.to_string(),
        leading_x: ctx.leading_anchor(0.0),
        trailing_x: ctx.trailing_anchor(0.0),
        align: ctx.align,
        opposite_align: ctx.opposite_align,
    })
}

pub(crate) fn money(amount: f64, language: Language, currency: &str) -> String {
    format_currency(amount, language, currency)
}

/// Whole quantities without decimals, fractional ones with two
pub(crate) fn quantity(n: f64) -> String {
    if n.fract() == 0.0 {
        format_number(n, 0)
    } else {
        format_number(n, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::labels;
    use crate::palette::{DEFAULT_PRIMARY, DEFAULT_SECONDARY};
    use crate::theme::select_theme;
    use pretty_assertions::assert_eq;

    fn ctx(language: Language) -> RenderContext {
        let theme = select_theme(None, DEFAULT_PRIMARY, DEFAULT_SECONDARY);
        RenderContext::new(language, &theme, false)
    }

    fn env(language: Language) -> ComposeEnv {
        ComposeEnv {
            labels: labels(language),
            logo: None,
            generated_at: "15 Jan 2025 10:00".into(),
        }
    }

    #[test]
    fn test_meta_card_odd_pair_leaves_gap() {
        let pairs = vec![
            ("A".to_string(), "1".to_string()),
            ("B".to_string(), "2".to_string()),
            ("C".to_string(), "3".to_string()),
        ];
        let DrawOp::MetaCard(card) = meta_card(&ctx(Language::En), pairs) else {
            panic!("expected a meta card");
        };
        assert_eq!(card.rows.len(), 2);
        assert_eq!(card.rows[1][1], None);
        assert_eq!(card.value_offset, 90.0);
        assert_eq!(card.label_width, 84.0);
        // second-column values stop one inset short of the card edge
        let c = ctx(Language::En);
        let value_end = card.column_x[1] + card.value_offset + card.value_width;
        assert!((value_end - (card.x + card.width - 12.0)).abs() < 1e-9, "{value_end} / {}", c.content_width);
    }

    #[test]
    fn test_meta_card_columns_mirror() {
        let en = ctx(Language::En);
        let ar = ctx(Language::Ar);
        let pairs = vec![("A".to_string(), "1".to_string())];
        let (DrawOp::MetaCard(l), DrawOp::MetaCard(r)) =
            (meta_card(&en, pairs.clone()), meta_card(&ar, pairs))
        else {
            panic!("expected meta cards");
        };
        assert!((l.column_x[0] + r.column_x[0] - en.page_width).abs() < 1e-9);
        assert!((l.column_x[1] + r.column_x[1] - en.page_width).abs() < 1e-9);
        assert_eq!(r.align, Align::Right);
        assert_eq!(r.value_offset, -90.0);
    }

    #[test]
    fn test_header_without_images() {
        let header = header_op(&ctx(Language::En), &env(Language::En), "T", "S", "N", "D", None);
        assert_eq!(header.title_x, 40.0);
        assert_eq!(header.meta_x, header.meta_x_continued);
        assert_eq!(header.title_align, Align::Left);
        assert_eq!(header.meta_align, Align::Right);
    }

    #[test]
    fn test_totals_block_anchoring() {
        let en = ctx(Language::En);
        let DrawOp::TotalsBlock(ltr) = totals_block(&en, Vec::new()) else {
            panic!("expected totals");
        };
        assert_eq!(ltr.width, 220.0);
        assert!((ltr.x + ltr.width - (en.page_width - 40.0)).abs() < 1e-9);

        let DrawOp::TotalsBlock(rtl) = totals_block(&ctx(Language::Ar), Vec::new()) else {
            panic!("expected totals");
        };
        assert!((rtl.x - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_footer_labels() {
        let DrawOp::FooterPass(op) = footer(&ctx(Language::En), &env(Language::En)) else {
            panic!("expected footer");
        };
        assert_eq!(op.generated_at, "Generated at: 15 Jan 2025 10:00");
        assert_eq!(op.page_label, "Page");
    }

    #[test]
    fn test_quantity() {
        assert_eq!(quantity(2.0), "2");
        assert_eq!(quantity(1500.0), "1,500");
        assert_eq!(quantity(2.5), "2.50");
    }
}
