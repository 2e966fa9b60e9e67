//! Draw operations: the composer output the page driver consumes
//!
//! Horizontal geometry is resolved (physical x, widths, alignments) when an
//! op is built; vertical placement comes from the driver's cursor.

use pdf_core::Align;

use crate::assets::RasterImage;

/// Minimum width of a non-description column
pub const MIN_COLUMN_WIDTH: f64 = 36.0;
/// Minimum width of the description column
pub const MIN_DESCRIPTION_WIDTH: f64 = 80.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Header(HeaderOp),
    MetaCard(MetaCardOp),
    PartyBoxes(PartyBoxesOp),
    KpiCards(KpiCardsOp),
    ProgressBar(ProgressBarOp),
    SectionTitle(SectionTitleOp),
    Table(TableOp),
    TotalsBlock(TotalsOp),
    Paragraph(ParagraphOp),
    FooterPass(FooterOp),
}

/// Header band content, redrawn on every page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderOp {
    pub title: String,
    pub subtitle: String,
    pub number: String,
    pub date: String,
    /// Leading-side logo, drawn on every page
    pub logo: Option<PlacedImage>,
    /// Trailing-side QR code, first page only
    pub qr: Option<PlacedImage>,
    /// Anchor of the title lines
    pub title_x: f64,
    /// Anchor of the number/date lines on the first page
    pub meta_x: f64,
    /// Anchor of the number/date lines on continuation pages (no QR)
    pub meta_x_continued: f64,
    pub title_align: Align,
    pub meta_align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub image: RasterImage,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Rounded card of label/value pairs, two per row
#[derive(Debug, Clone, PartialEq)]
pub struct MetaCardOp {
    pub x: f64,
    pub width: f64,
    /// Text anchors of the two columns, in reading order
    pub column_x: [f64; 2],
    /// Offset from a column anchor to its values, signed for direction
    pub value_offset: f64,
    /// Widest a label may run before wrapping
    pub label_width: f64,
    /// Widest a value may run before wrapping
    pub value_width: f64,
    pub align: Align,
    pub rows: Vec<[Option<(String, String)>; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartyBox {
    pub x: f64,
    pub width: f64,
    pub label: String,
    pub name: String,
    /// Secondary lines (VAT number, address)
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartyBoxesOp {
    /// Seller box, on the leading side
    pub leading: PartyBox,
    pub trailing: PartyBox,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub x: f64,
    pub width: f64,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiCardsOp {
    pub cards: Vec<KpiCard>,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBarOp {
    pub x: f64,
    pub width: f64,
    /// Physical x of the filled part
    pub fill_x: f64,
    pub fill_width: f64,
    pub label: String,
    pub value: String,
    pub label_x: f64,
    pub value_x: f64,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionTitleOp {
    pub text: String,
    pub x: f64,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub x: f64,
    pub width: f64,
    pub align: Align,
    /// Cell text wraps to the column width instead of overflowing
    pub wrap: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    Cells(Vec<String>),
    /// Single full-width message row
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableOp {
    /// Columns in reading order; `x` is already mirrored
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
    pub x: f64,
    pub width: f64,
    pub placeholder_align: Align,
}

impl TableOp {
    /// Rows, or the single placeholder row when there are none
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<String>>, no_data: &str, align: Align) -> Self {
        let x = columns
            .iter()
            .map(|c| c.x)
            .fold(f64::INFINITY, f64::min);
        let width = columns.iter().map(|c| c.width).sum();
        let rows = if rows.is_empty() {
            vec![TableRow::Placeholder(no_data.to_string())]
        } else {
            rows.into_iter().map(TableRow::Cells).collect()
        };
        Self {
            columns,
            rows,
            x: if x.is_finite() { x } else { 0.0 },
            width,
            placeholder_align: align,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRow {
    pub label: String,
    pub value: String,
    /// Bold with a primary-colored value
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsOp {
    pub x: f64,
    pub width: f64,
    pub rows: Vec<TotalsRow>,
    pub align: Align,
}

/// Titled block of wrapped text; `x` is the box's left edge
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphOp {
    pub title: String,
    pub text: String,
    pub x: f64,
    pub width: f64,
    pub align: Align,
}

/// Finalization: footer on every page once the page count is known
#[derive(Debug, Clone, PartialEq)]
pub struct FooterOp {
    pub generated_at: String,
    /// Word preceding `N / total`
    pub page_label: String,
    pub leading_x: f64,
    pub trailing_x: f64,
    pub align: Align,
    pub opposite_align: Align,
}

/// Fit base column widths into the content width
///
/// Widths are scaled proportionally when their sum exceeds `content_width`,
/// non-description columns are floored at [`MIN_COLUMN_WIDTH`] and the
/// description column takes whatever remains, floored at
/// [`MIN_DESCRIPTION_WIDTH`]. The sum never exceeds `content_width`.
pub fn compute_column_widths(base: &[f64], description: usize, content_width: f64) -> Vec<f64> {
    let content_width = content_width.max(0.0);
    if base.is_empty() {
        return Vec::new();
    }
    let description = description.min(base.len() - 1);
    let total: f64 = base.iter().sum();

    let mut widths: Vec<f64> = if total <= content_width {
        base.to_vec()
    } else {
        let scale = content_width / total;
        base.iter()
            .enumerate()
            .map(|(i, w)| {
                if i == description {
                    *w * scale
                } else {
                    (*w * scale).max(MIN_COLUMN_WIDTH)
                }
            })
            .collect()
    };

    let others: f64 = widths
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != description)
        .map(|(_, w)| *w)
        .sum();
    let desc_floor = MIN_DESCRIPTION_WIDTH.min(content_width);
    let remaining = content_width - others;

    if remaining >= desc_floor {
        widths[description] = remaining;
    } else {
        // squeeze the other columns so the description keeps its floor
        widths[description] = desc_floor;
        let available = (content_width - desc_floor).max(0.0);
        let shrink = if others > 0.0 { available / others } else { 0.0 };
        for (i, w) in widths.iter_mut().enumerate() {
            if i != description {
                *w *= shrink;
            }
        }
    }

    widths
}

/// Physical x of each column, first column on the leading side
pub fn layout_columns(
    widths: &[f64],
    place_box: impl Fn(f64, f64) -> f64,
) -> Vec<f64> {
    let mut offset = 0.0;
    widths
        .iter()
        .map(|&w| {
            let x = place_box(offset, w);
            offset += w;
            x
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INVOICE: [f64; 6] = [24.0, 200.0, 48.0, 72.0, 64.0, 84.0];

    fn sum(widths: &[f64]) -> f64 {
        widths.iter().sum()
    }

    #[test]
    fn test_description_absorbs_extra_width() {
        let widths = compute_column_widths(&INVOICE, 1, 600.0);
        assert_eq!(widths, vec![24.0, 308.0, 48.0, 72.0, 64.0, 84.0]);
    }

    #[test]
    fn test_scaled_when_too_wide() {
        let cw = 459.28;
        let widths = compute_column_widths(&INVOICE, 1, cw);
        assert!(sum(&widths) <= cw + 1e-9);
        assert!(widths[1] >= MIN_DESCRIPTION_WIDTH);
        for (i, w) in widths.iter().enumerate() {
            if i != 1 {
                assert!(*w >= MIN_COLUMN_WIDTH, "{widths:?}");
            }
        }
    }

    #[test]
    fn test_narrow_content_keeps_description_floor() {
        let cw = 250.0;
        let widths = compute_column_widths(&INVOICE, 1, cw);
        assert!((sum(&widths) - cw).abs() < 1e-9);
        assert_eq!(widths[1], MIN_DESCRIPTION_WIDTH);
    }

    #[test]
    fn test_never_exceeds_content_width() {
        for cw in [0.0, 10.0, 79.0, 120.0, 300.0, 491.0, 492.0, 515.28, 900.0] {
            let widths = compute_column_widths(&INVOICE, 1, cw);
            assert!(sum(&widths) <= cw + 1e-9, "cw {cw}: {widths:?}");
            assert!(widths[1] >= MIN_DESCRIPTION_WIDTH.min(cw) - 1e-9);
        }
    }

    #[test]
    fn test_empty_base() {
        assert!(compute_column_widths(&[], 0, 100.0).is_empty());
    }

    #[test]
    fn test_layout_columns_ltr_and_rtl() {
        let widths = [10.0, 20.0, 30.0];
        let ltr = layout_columns(&widths, |offset, _| 40.0 + offset);
        assert_eq!(ltr, vec![40.0, 50.0, 70.0]);

        // mirrored inside [40, 100]
        let rtl = layout_columns(&widths, |offset, w| 100.0 - offset - w);
        assert_eq!(rtl, vec![90.0, 70.0, 40.0]);
    }

    #[test]
    fn test_table_placeholder() {
        let table = TableOp::new(Vec::new(), Vec::new(), "No data", Align::Center);
        assert_eq!(table.rows, vec![TableRow::Placeholder("No data".into())]);
        assert_eq!(table.x, 0.0);
    }
}
