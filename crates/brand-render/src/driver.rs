//! Page driver: executes draw operations against a surface
//!
//! The driver owns the vertical cursor. While laying out it opens pages on
//! demand, redrawing the frame and header band once per new page and
//! repeating a table's head row when a table continues. After the last
//! content op it switches to finalizing and stamps the footer on every page,
//! now that the total page count is known.

use pdf_core::wrap_to_width;

use crate::color::Rgb;
use crate::layout::{RenderContext, Side, CONTENT_TOP, FOOTER_BAND};
use crate::ops::{
    DrawOp, FooterOp, HeaderOp, KpiCardsOp, MetaCardOp, ParagraphOp, PartyBox, PartyBoxesOp,
    ProgressBarOp, SectionTitleOp, TableOp, TableRow, TotalsOp,
};
use crate::surface::{Surface, TextStyle};
use crate::theme::{FrameStyle, Theme};
use crate::{RenderError, Result};

const BLOCK_GAP: f64 = 12.0;
const CARD_RADIUS: f64 = 6.0;
const CARD_PADDING: f64 = 10.0;
const BORDER_WIDTH: f64 = 0.75;

const TITLE_BASELINE: f64 = 44.0;
const SUBTITLE_BASELINE: f64 = 62.0;
const LOGO_PADDING: f64 = 4.0;

const META_ROW_HEIGHT: f64 = 16.0;
const META_LINE_HEIGHT: f64 = 11.0;
const PARTY_LINE_HEIGHT: f64 = 13.0;
const PARTY_NAME_LINE_HEIGHT: f64 = 12.0;
const KPI_HEIGHT: f64 = 54.0;
const PROGRESS_TRACK_HEIGHT: f64 = 8.0;
const SECTION_TITLE_HEIGHT: f64 = 20.0;

const TABLE_HEAD_HEIGHT: f64 = 20.0;
const CELL_FONT_SIZE: f32 = 8.5;
const CELL_PADDING_X: f64 = 5.0;
const CELL_PADDING_Y: f64 = 5.0;
const CELL_LINE_HEIGHT: f64 = 11.0;

const TOTALS_ROW_HEIGHT: f64 = 18.0;
const PARAGRAPH_LINE_HEIGHT: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Appending content; new pages may open
    LayingOut,
    /// Footer pass over the finished page set
    Finalizing,
}

pub struct PageDriver<'t, S: Surface> {
    surface: S,
    theme: &'t Theme,
    ctx: RenderContext,
    header: Option<HeaderOp>,
    state: DriverState,
}

impl<'t, S: Surface> PageDriver<'t, S> {
    pub fn new(surface: S, theme: &'t Theme, ctx: RenderContext) -> Self {
        Self {
            surface,
            theme,
            ctx,
            header: None,
            state: DriverState::LayingOut,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Lay out every op, then run the footer pass; returns the page count
    pub fn run(&mut self, ops: &[DrawOp]) -> Result<usize> {
        if self.state != DriverState::LayingOut {
            return Err(RenderError::Layout(
                "page driver already finalized".to_string(),
            ));
        }

        let mut footer = None;
        for op in ops {
            match op {
                DrawOp::Header(header) => {
                    self.header = Some(header.clone());
                    if self.ctx.page == 0 {
                        self.open_page()?;
                    }
                }
                DrawOp::FooterPass(op) => footer = Some(op),
                other => {
                    if self.ctx.page == 0 {
                        self.open_page()?;
                    }
                    self.draw(other)?;
                }
            }
        }
        if self.ctx.page == 0 {
            self.open_page()?;
        }

        self.state = DriverState::Finalizing;
        let total = self.surface.page_count();
        if let Some(footer) = footer {
            self.draw_footers(footer, total)?;
        }
        log::debug!("Layout finished with {total} page(s)");
        Ok(total)
    }

    fn draw(&mut self, op: &DrawOp) -> Result<()> {
        match op {
            DrawOp::MetaCard(op) => self.draw_meta_card(op),
            DrawOp::PartyBoxes(op) => self.draw_party_boxes(op),
            DrawOp::KpiCards(op) => self.draw_kpi_cards(op),
            DrawOp::ProgressBar(op) => self.draw_progress_bar(op),
            DrawOp::SectionTitle(op) => self.draw_section_title(op),
            DrawOp::Table(op) => self.draw_table(op),
            DrawOp::TotalsBlock(op) => self.draw_totals(op),
            DrawOp::Paragraph(op) => self.draw_paragraph(op),
            DrawOp::Header(_) | DrawOp::FooterPass(_) => Ok(()),
        }
    }

    fn open_page(&mut self) -> Result<()> {
        if self.state == DriverState::Finalizing {
            return Err(RenderError::Layout(
                "cannot open a page while finalizing".to_string(),
            ));
        }

        let page = self
            .surface
            .add_page(self.ctx.page_width, self.ctx.page_height)?;
        self.ctx.page = page;
        self.ctx.y = CONTENT_TOP;
        log::debug!("Opened page {page}");

        self.draw_frame(page)?;
        let header = self.header.take();
        let result = match &header {
            Some(header) => self.draw_header(header, page),
            None => Ok(()),
        };
        self.header = header;
        result
    }

    /// Open a new page unless `height` fits below the cursor
    ///
    /// A block taller than a whole page is drawn at the top of a fresh page
    /// and allowed to overflow rather than paging forever.
    fn ensure_space(&mut self, height: f64) -> Result<bool> {
        if height <= self.ctx.remaining() || self.ctx.y <= CONTENT_TOP {
            return Ok(false);
        }
        self.open_page()?;
        Ok(true)
    }

    fn draw_frame(&mut self, page: usize) -> Result<()> {
        let theme = self.theme;
        let (pw, ph) = (self.ctx.page_width, self.ctx.page_height);
        match &theme.frame {
            FrameStyle::Bar { height, color } => {
                self.surface.fill_rect(page, 0.0, 0.0, pw, *height, *color)
            }
            FrameStyle::SteppedBar { height, steps } => self.draw_steps(page, *height, steps),
            FrameStyle::Sidebar { width, color } => {
                let x = match self.ctx.sidebar {
                    Some((Side::Left, _)) => 0.0,
                    _ => pw - width,
                };
                self.surface.fill_rect(page, x, 0.0, *width, ph, *color)
            }
            FrameStyle::Band {
                height,
                color,
                bar_height,
                steps,
            } => {
                self.surface.fill_rect(page, 0.0, 0.0, pw, *height, *color)?;
                self.draw_steps(page, *bar_height, steps)
            }
        }
    }

    fn draw_steps(&mut self, page: usize, height: f64, steps: &[Rgb]) -> Result<()> {
        if steps.is_empty() {
            return Ok(());
        }
        let step = self.ctx.page_width / steps.len() as f64;
        for (i, color) in steps.iter().enumerate() {
            // overlap neighbours slightly so no hairline gaps show
            let width = if i + 1 < steps.len() { step + 0.5 } else { step };
            self.surface
                .fill_rect(page, i as f64 * step, 0.0, width, height, *color)?;
        }
        Ok(())
    }

    fn draw_header(&mut self, header: &HeaderOp, page: usize) -> Result<()> {
        let theme = self.theme;
        let first_page = page == 1;

        if let Some(logo) = &header.logo {
            self.surface.rounded_rect(
                page,
                logo.x,
                logo.y,
                logo.size,
                logo.size,
                CARD_RADIUS,
                Some(Rgb::WHITE),
                Some((theme.border_color, BORDER_WIDTH)),
            )?;
            let inner = logo.size - 2.0 * LOGO_PADDING;
            self.surface.image(
                page,
                &logo.image,
                logo.x + LOGO_PADDING,
                logo.y + LOGO_PADDING,
                inner,
                inner,
            )?;
        }
        if first_page {
            if let Some(qr) = &header.qr {
                self.surface
                    .image(page, &qr.image, qr.x, qr.y, qr.size, qr.size)?;
            }
        }

        let title = TextStyle::new(18.0, theme.header_title_color).bold();
        let muted = TextStyle::new(10.0, theme.header_muted_color);
        self.surface.text(
            page,
            &header.title,
            header.title_x,
            TITLE_BASELINE,
            header.title_align,
            title,
        )?;
        self.surface.text(
            page,
            &header.subtitle,
            header.title_x,
            SUBTITLE_BASELINE,
            header.title_align,
            muted,
        )?;

        let meta_x = if first_page {
            header.meta_x
        } else {
            header.meta_x_continued
        };
        self.surface.text(
            page,
            &header.number,
            meta_x,
            TITLE_BASELINE,
            header.meta_align,
            TextStyle::new(11.0, theme.header_title_color).bold(),
        )?;
        self.surface.text(
            page,
            &header.date,
            meta_x,
            SUBTITLE_BASELINE,
            header.meta_align,
            TextStyle::new(9.0, theme.header_muted_color),
        )
    }

    fn wrap(&self, text: &str, max_width: f64, style: TextStyle) -> Vec<String> {
        wrap_to_width(text, max_width, |s| self.surface.text_width(s, style))
    }

    fn draw_meta_card(&mut self, op: &MetaCardOp) -> Result<()> {
        if op.rows.is_empty() {
            return Ok(());
        }
        let theme = self.theme;
        let label_style = TextStyle::new(8.0, theme.muted_text_color);
        let value_style = TextStyle::new(9.0, theme.body_text_color).bold();

        // (label lines, value lines) per cell, wrapped to the column
        let rows: Vec<Vec<Option<(Vec<String>, Vec<String>)>>> = op
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|pair| {
                        pair.as_ref().map(|(label, value)| {
                            (
                                self.wrap(label, op.label_width, label_style),
                                self.wrap(value, op.value_width, value_style),
                            )
                        })
                    })
                    .collect()
            })
            .collect();
        let row_heights: Vec<f64> = rows
            .iter()
            .map(|row| {
                let lines = row
                    .iter()
                    .flatten()
                    .map(|(labels, values)| labels.len().max(values.len()))
                    .max()
                    .unwrap_or(1)
                    .max(1);
                META_ROW_HEIGHT + (lines - 1) as f64 * META_LINE_HEIGHT
            })
            .collect();

        let height = 2.0 * CARD_PADDING + row_heights.iter().sum::<f64>();
        self.ensure_space(height)?;
        let (page, top) = (self.ctx.page, self.ctx.y);

        self.surface.rounded_rect(
            page,
            op.x,
            top,
            op.width,
            height,
            CARD_RADIUS,
            Some(theme.meta_fill_color),
            Some((theme.border_color, BORDER_WIDTH)),
        )?;

        let mut row_top = top + CARD_PADDING;
        for (row, row_height) in rows.iter().zip(&row_heights) {
            let first_baseline = row_top + META_ROW_HEIGHT - 5.0;
            for (cell, x) in row.iter().zip(op.column_x) {
                let Some((labels, values)) = cell else {
                    continue;
                };
                for (k, label) in labels.iter().enumerate() {
                    let baseline = first_baseline + k as f64 * META_LINE_HEIGHT;
                    self.surface
                        .text(page, label, x, baseline, op.align, label_style)?;
                }
                for (k, value) in values.iter().enumerate() {
                    let baseline = first_baseline + k as f64 * META_LINE_HEIGHT;
                    self.surface.text(
                        page,
                        value,
                        x + op.value_offset,
                        baseline,
                        op.align,
                        value_style,
                    )?;
                }
            }
            row_top += row_height;
        }

        self.ctx.y = top + height + BLOCK_GAP;
        Ok(())
    }

    fn draw_party_boxes(&mut self, op: &PartyBoxesOp) -> Result<()> {
        let theme = self.theme;
        let label_style = TextStyle::new(8.0, theme.muted_text_color);
        let name_style = TextStyle::new(10.0, theme.body_text_color).bold();
        let line_style = TextStyle::new(8.5, theme.body_text_color);

        // (label, name lines, detail lines) per box
        let parties: Vec<(&PartyBox, Vec<String>, Vec<String>)> = [&op.leading, &op.trailing]
            .into_iter()
            .map(|party| {
                let max = (party.width - 2.0 * CARD_PADDING).max(0.0);
                let name = self.wrap(&party.name, max, name_style);
                let lines = party
                    .lines
                    .iter()
                    .flat_map(|line| self.wrap(line, max, line_style))
                    .collect();
                (party, name, lines)
            })
            .collect();
        let height = parties
            .iter()
            .map(|(_, name, lines)| {
                2.0 * CARD_PADDING
                    + 24.0
                    + (name.len().max(1) - 1) as f64 * PARTY_NAME_LINE_HEIGHT
                    + lines.len() as f64 * PARTY_LINE_HEIGHT
            })
            .fold(0.0, f64::max);

        self.ensure_space(height)?;
        let (page, top) = (self.ctx.page, self.ctx.y);

        for (party, name, lines) in &parties {
            self.surface.rounded_rect(
                page,
                party.x,
                top,
                party.width,
                height,
                CARD_RADIUS,
                Some(Rgb::WHITE),
                Some((theme.border_color, BORDER_WIDTH)),
            )?;
            let x = RenderContext::anchor_in_box(party.x, party.width, CARD_PADDING, op.align);
            let mut baseline = top + CARD_PADDING + 8.0;
            self.surface
                .text(page, &party.label, x, baseline, op.align, label_style)?;
            baseline += 14.0;
            for (k, part) in name.iter().enumerate() {
                if k > 0 {
                    baseline += PARTY_NAME_LINE_HEIGHT;
                }
                self.surface
                    .text(page, part, x, baseline, op.align, name_style)?;
            }
            for line in lines {
                baseline += PARTY_LINE_HEIGHT;
                self.surface
                    .text(page, line, x, baseline, op.align, line_style)?;
            }
        }

        self.ctx.y = top + height + BLOCK_GAP;
        Ok(())
    }

    fn draw_kpi_cards(&mut self, op: &KpiCardsOp) -> Result<()> {
        let theme = self.theme;
        self.ensure_space(KPI_HEIGHT)?;
        let (page, top) = (self.ctx.page, self.ctx.y);

        for card in &op.cards {
            self.surface.rounded_rect(
                page,
                card.x,
                top,
                card.width,
                KPI_HEIGHT,
                CARD_RADIUS,
                Some(theme.primary_scale.tone(50)),
                Some((theme.border_color, BORDER_WIDTH)),
            )?;
            let x = RenderContext::anchor_in_box(card.x, card.width, CARD_PADDING, op.align);
            self.surface.text(
                page,
                &card.label,
                x,
                top + 18.0,
                op.align,
                TextStyle::new(8.0, theme.muted_text_color),
            )?;

            // shrink long amounts until they fit the card
            let available = card.width - 2.0 * CARD_PADDING;
            let mut style = TextStyle::new(12.0, theme.primary_scale.tone(700)).bold();
            while style.size > 7.0 && self.surface.text_width(&card.value, style) > available {
                style.size -= 1.0;
            }
            self.surface
                .text(page, &card.value, x, top + 40.0, op.align, style)?;
        }

        self.ctx.y = top + KPI_HEIGHT + BLOCK_GAP;
        Ok(())
    }

    fn draw_progress_bar(&mut self, op: &ProgressBarOp) -> Result<()> {
        let theme = self.theme;
        let height = 16.0 + PROGRESS_TRACK_HEIGHT;
        self.ensure_space(height)?;
        let (page, top) = (self.ctx.page, self.ctx.y);

        let style = TextStyle::new(9.0, theme.body_text_color).bold();
        self.surface
            .text(page, &op.label, op.label_x, top + 10.0, op.align, style)?;
        self.surface.text(
            page,
            &op.value,
            op.value_x,
            top + 10.0,
            op.align.mirrored(),
            TextStyle::new(9.0, theme.primary).bold(),
        )?;

        let radius = PROGRESS_TRACK_HEIGHT / 2.0;
        self.surface.rounded_rect(
            page,
            op.x,
            top + 16.0,
            op.width,
            PROGRESS_TRACK_HEIGHT,
            radius,
            Some(theme.border_color),
            None,
        )?;
        if op.fill_width > 0.0 {
            self.surface.rounded_rect(
                page,
                op.fill_x,
                top + 16.0,
                op.fill_width,
                PROGRESS_TRACK_HEIGHT,
                radius,
                Some(theme.primary),
                None,
            )?;
        }

        self.ctx.y = top + height + BLOCK_GAP;
        Ok(())
    }

    fn draw_section_title(&mut self, op: &SectionTitleOp) -> Result<()> {
        let theme = self.theme;
        // keep the title with the head and first row of what follows
        let min_row = CELL_LINE_HEIGHT + 2.0 * CELL_PADDING_Y;
        self.ensure_space(SECTION_TITLE_HEIGHT + TABLE_HEAD_HEIGHT + min_row)?;
        let (page, top) = (self.ctx.page, self.ctx.y);

        self.surface.text(
            page,
            &op.text,
            op.x,
            top + 12.0,
            op.align,
            TextStyle::new(11.0, theme.primary_scale.tone(700)).bold(),
        )?;
        self.ctx.y = top + SECTION_TITLE_HEIGHT;
        Ok(())
    }

    fn cell_style(&self) -> TextStyle {
        TextStyle::new(CELL_FONT_SIZE, self.theme.body_text_color)
    }

    /// Wrapped lines per cell
    fn row_lines(&self, table: &TableOp, row: &TableRow) -> Vec<Vec<String>> {
        let style = self.cell_style();
        match row {
            TableRow::Cells(cells) => table
                .columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let text = cells.get(i).map(String::as_str).unwrap_or_default();
                    if column.wrap {
                        let max = column.width - 2.0 * CELL_PADDING_X;
                        self.wrap(text, max, style)
                    } else {
                        vec![text.to_string()]
                    }
                })
                .collect(),
            TableRow::Placeholder(text) => vec![vec![text.clone()]],
        }
    }

    fn row_height(lines: &[Vec<String>]) -> f64 {
        let count = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
        count as f64 * CELL_LINE_HEIGHT + 2.0 * CELL_PADDING_Y
    }

    fn draw_table_head(&mut self, table: &TableOp) -> Result<()> {
        let theme = self.theme;
        let (page, top) = (self.ctx.page, self.ctx.y);
        self.surface.fill_rect(
            page,
            table.x,
            top,
            table.width,
            TABLE_HEAD_HEIGHT,
            theme.table_head_fill_color,
        )?;
        let style = TextStyle::new(CELL_FONT_SIZE, theme.table_head_text_color).bold();
        for column in &table.columns {
            let x = RenderContext::anchor_in_box(column.x, column.width, CELL_PADDING_X, column.align);
            self.surface
                .text(page, &column.header, x, top + 13.5, column.align, style)?;
        }
        self.ctx.y = top + TABLE_HEAD_HEIGHT;
        Ok(())
    }

    fn draw_table(&mut self, table: &TableOp) -> Result<()> {
        let theme = self.theme;
        let first_height = table
            .rows
            .first()
            .map(|row| Self::row_height(&self.row_lines(table, row)))
            .unwrap_or(0.0);
        self.ensure_space(TABLE_HEAD_HEIGHT + first_height)?;
        self.draw_table_head(table)?;

        for (index, row) in table.rows.iter().enumerate() {
            let lines = self.row_lines(table, row);
            let height = Self::row_height(&lines);
            if self.ensure_space(height)? {
                self.draw_table_head(table)?;
            }
            let (page, top) = (self.ctx.page, self.ctx.y);

            if index % 2 == 1 {
                self.surface.fill_rect(
                    page,
                    table.x,
                    top,
                    table.width,
                    height,
                    theme.alternate_row_color,
                )?;
            }

            match row {
                TableRow::Cells(_) => {
                    let style = self.cell_style();
                    for (column, cell_lines) in table.columns.iter().zip(&lines) {
                        let x = RenderContext::anchor_in_box(
                            column.x,
                            column.width,
                            CELL_PADDING_X,
                            column.align,
                        );
                        for (k, line) in cell_lines.iter().enumerate() {
                            let baseline = top + CELL_PADDING_Y + 8.0 + k as f64 * CELL_LINE_HEIGHT;
                            self.surface
                                .text(page, line, x, baseline, column.align, style)?;
                        }
                    }
                }
                TableRow::Placeholder(text) => {
                    let x = RenderContext::anchor_in_box(
                        table.x,
                        table.width,
                        CELL_PADDING_X,
                        table.placeholder_align,
                    );
                    self.surface.text(
                        page,
                        text,
                        x,
                        top + CELL_PADDING_Y + 8.0,
                        table.placeholder_align,
                        TextStyle::new(CELL_FONT_SIZE, theme.muted_text_color),
                    )?;
                }
            }

            self.surface.line(
                page,
                table.x,
                top + height,
                table.x + table.width,
                top + height,
                theme.border_color,
                0.5,
            )?;
            self.ctx.y = top + height;
        }

        self.ctx.y += BLOCK_GAP;
        Ok(())
    }

    fn draw_totals(&mut self, op: &TotalsOp) -> Result<()> {
        let theme = self.theme;
        let height = op.rows.len() as f64 * TOTALS_ROW_HEIGHT + 8.0;
        self.ensure_space(height)?;
        let (page, top) = (self.ctx.page, self.ctx.y);

        self.surface.rounded_rect(
            page,
            op.x,
            top,
            op.width,
            height,
            CARD_RADIUS,
            Some(theme.primary_scale.tone(50)),
            Some((theme.border_color, BORDER_WIDTH)),
        )?;

        let label_x = RenderContext::anchor_in_box(op.x, op.width, CARD_PADDING, op.align);
        let value_align = op.align.mirrored();
        let value_x = RenderContext::anchor_in_box(op.x, op.width, CARD_PADDING, value_align);
        for (i, row) in op.rows.iter().enumerate() {
            let row_top = top + 4.0 + i as f64 * TOTALS_ROW_HEIGHT;
            let baseline = row_top + 12.5;
            let (label_style, value_style) = if row.emphasized {
                if i > 0 {
                    self.surface.line(
                        page,
                        op.x + CARD_PADDING,
                        row_top,
                        op.x + op.width - CARD_PADDING,
                        row_top,
                        theme.border_color,
                        0.75,
                    )?;
                }
                (
                    TextStyle::new(10.0, theme.body_text_color).bold(),
                    TextStyle::new(10.0, theme.primary).bold(),
                )
            } else {
                (
                    TextStyle::new(9.0, theme.muted_text_color),
                    TextStyle::new(9.0, theme.body_text_color),
                )
            };
            self.surface
                .text(page, &row.label, label_x, baseline, op.align, label_style)?;
            self.surface
                .text(page, &row.value, value_x, baseline, value_align, value_style)?;
        }

        self.ctx.y = top + height + BLOCK_GAP;
        Ok(())
    }

    fn draw_paragraph(&mut self, op: &ParagraphOp) -> Result<()> {
        let theme = self.theme;
        let style = TextStyle::new(9.0, theme.body_text_color);
        let lines = self.wrap(&op.text, op.width, style);
        let x = RenderContext::anchor_in_box(op.x, op.width, 0.0, op.align);

        self.ensure_space(2.0 * PARAGRAPH_LINE_HEIGHT)?;
        let top = self.ctx.y;
        self.surface.text(
            self.ctx.page,
            &op.title,
            x,
            top + 10.0,
            op.align,
            TextStyle::new(9.0, theme.body_text_color).bold(),
        )?;
        self.ctx.y = top + PARAGRAPH_LINE_HEIGHT + 2.0;

        for line in &lines {
            self.ensure_space(PARAGRAPH_LINE_HEIGHT)?;
            let top = self.ctx.y;
            self.surface
                .text(self.ctx.page, line, x, top + 10.0, op.align, style)?;
            self.ctx.y = top + PARAGRAPH_LINE_HEIGHT;
        }

        self.ctx.y += BLOCK_GAP;
        Ok(())
    }

    fn draw_footers(&mut self, op: &FooterOp, total: usize) -> Result<()> {
        let theme = self.theme;
        let rule_y = self.ctx.page_height - FOOTER_BAND + 10.0;
        let baseline = self.ctx.page_height - 20.0;
        let style = TextStyle::new(8.0, theme.muted_text_color);
        let (left, right) = (
            self.ctx.content_left,
            self.ctx.page_width - self.ctx.content_right,
        );

        for page in 1..=total {
            self.surface
                .line(page, left, rule_y, right, rule_y, theme.border_color, 0.5)?;
            self.surface.text(
                page,
                &op.generated_at,
                op.leading_x,
                baseline,
                op.align,
                style,
            )?;
            let numbering = format!("{} {page} / {total}", op.page_label);
            self.surface.text(
                page,
                &numbering,
                op.trailing_x,
                baseline,
                op.opposite_align,
                style,
            )?;
        }
        Ok(())
    }
}
