use arabic_text::{format_date, Language};

use super::{
    footer, header_op, meta_card, money, quantity, section_title, table, ColumnKind, ColumnSpec,
    ComposeEnv,
};
use crate::layout::RenderContext;
use crate::ops::{DrawOp, KpiCard, KpiCardsOp};
use crate::record::ReportRecord;

const KPI_GAP: f64 = 8.0;

pub fn compose_report(report: &ReportRecord, ctx: &RenderContext, env: &ComposeEnv) -> Vec<DrawOp> {
    let labels = env.labels;
    let language = ctx.language;
    let currency = report.currency.as_deref().unwrap_or("").trim();
    let from = format_date(&report.period.from, language);
    let to = format_date(&report.period.to, language);

    let mut ops = vec![DrawOp::Header(header_op(
        ctx,
        env,
        labels.report_title,
        report.company_name.as_deref().unwrap_or(""),
        &period_text(&from, &to),
        "",
        None,
    ))];

    let mut pairs = vec![
        (labels.from.to_string(), from),
        (labels.to.to_string(), to),
    ];
    if !currency.is_empty() {
        pairs.push((labels.currency.to_string(), currency.to_ascii_uppercase()));
    }
    ops.push(meta_card(ctx, pairs));

    ops.push(kpi_cards(report, ctx, env, currency));

    let breakdown = &report.breakdown;

    ops.push(section_title(ctx, labels.sales_by_type));
    let rows = breakdown
        .sales_by_transaction_type
        .iter()
        .map(|row| {
            vec![
                row.kind.clone(),
                row.count.map(quantity).unwrap_or_default(),
                money(row.total, language, currency),
            ]
        })
        .collect();
    ops.push(table(
        ctx,
        &[
            ColumnSpec { header: labels.transaction_type, base_width: 220.0, kind: ColumnKind::Text },
            ColumnSpec { header: labels.count, base_width: 80.0, kind: ColumnKind::Numeric },
            ColumnSpec { header: labels.total, base_width: 120.0, kind: ColumnKind::Numeric },
        ],
        0,
        rows,
        labels.no_data,
    ));

    ops.push(section_title(ctx, labels.top_customers));
    let rows = breakdown
        .top_customers
        .iter()
        .map(|row| {
            vec![
                row.name.clone(),
                row.invoice_count.map(quantity).unwrap_or_default(),
                money(row.total, language, currency),
            ]
        })
        .collect();
    ops.push(table(
        ctx,
        &[
            ColumnSpec { header: labels.customer_name, base_width: 220.0, kind: ColumnKind::Text },
            ColumnSpec { header: labels.invoices, base_width: 80.0, kind: ColumnKind::Numeric },
            ColumnSpec { header: labels.total, base_width: 120.0, kind: ColumnKind::Numeric },
        ],
        0,
        rows,
        labels.no_data,
    ));

    ops.push(section_title(ctx, labels.expenses_by_category));
    let rows = breakdown
        .expenses_by_category
        .iter()
        .map(|row| vec![row.category.clone(), money(row.total, language, currency)])
        .collect();
    ops.push(table(
        ctx,
        &[
            ColumnSpec { header: labels.category, base_width: 300.0, kind: ColumnKind::Text },
            ColumnSpec { header: labels.total, base_width: 120.0, kind: ColumnKind::Numeric },
        ],
        0,
        rows,
        labels.no_data,
    ));

    ops.push(footer(ctx, env));
    ops
}

fn period_text(from: &str, to: &str) -> String {
    match (from.is_empty(), to.is_empty()) {
        (true, true) => String::new(),
        (false, true) => from.to_string(),
        (true, false) => to.to_string(),
        (false, false) => format!("{from} - {to}"),
    }
}

/// Sales, purchases, expenses and net, in reading order
fn kpi_cards(report: &ReportRecord, ctx: &RenderContext, env: &ComposeEnv, currency: &str) -> DrawOp {
    let labels = env.labels;
    let language: Language = ctx.language;
    let totals = &report.totals;
    let width = ((ctx.content_width - 3.0 * KPI_GAP) / 4.0).max(0.0);

    let cards = [
        (labels.sales, totals.sales),
        (labels.purchases, totals.purchases),
        (labels.expenses, totals.expenses),
        (labels.net, totals.net),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (label, amount))| KpiCard {
        x: ctx.place_box(i as f64 * (width + KPI_GAP), width),
        width,
        label: label.to_string(),
        value: money(amount, language, currency),
    })
    .collect();

    DrawOp::KpiCards(KpiCardsOp {
        cards,
        align: ctx.align,
    })
}
