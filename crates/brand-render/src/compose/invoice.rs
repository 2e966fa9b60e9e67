use arabic_text::{format_date, format_number};

use super::{
    footer, header_op, meta_card, money, quantity, table, totals_block, ColumnKind, ColumnSpec,
    ComposeEnv,
};
use crate::assets::{invoice_qr, zatca_tlv, RasterImage};
use crate::layout::RenderContext;
use crate::ops::{DrawOp, ParagraphOp, PartyBox, PartyBoxesOp, TotalsRow};
use crate::record::{Flow, InvoiceRecord, Party};

const PARTY_GAP: f64 = 12.0;

/// Header, metadata, parties, line items, totals, notes, footer
pub fn compose_invoice(invoice: &InvoiceRecord, ctx: &RenderContext, env: &ComposeEnv) -> Vec<DrawOp> {
    let labels = env.labels;
    let language = ctx.language;
    let currency = invoice.currency.trim();

    let title = if invoice.is_simplified() {
        labels.simplified_invoice
    } else {
        labels.tax_invoice
    };
    let issue_date = format_date(&invoice.issue_date, language);

    let mut ops = vec![DrawOp::Header(header_op(
        ctx,
        env,
        title,
        &invoice.counterparty().name,
        &invoice.invoice_number,
        &issue_date,
        qr_image(invoice),
    ))];

    let mut pairs = vec![
        (labels.invoice_number.to_string(), invoice.invoice_number.clone()),
        (labels.issue_date.to_string(), issue_date),
    ];
    if let Some(due) = &invoice.due_date {
        pairs.push((labels.due_date.to_string(), format_date(due, language)));
    }
    if !currency.is_empty() {
        pairs.push((labels.currency.to_string(), currency.to_ascii_uppercase()));
    }
    if let Some(zatca) = &invoice.zatca {
        if let Some(uuid) = &zatca.uuid {
            pairs.push((labels.uuid.to_string(), uuid.clone()));
        }
        if let Some(status) = &zatca.status {
            pairs.push((labels.zatca_status.to_string(), status.clone()));
        }
    }
    ops.push(meta_card(ctx, pairs));

    ops.push(party_boxes(invoice, ctx, env));

    let specs = [
        ColumnSpec { header: labels.index, base_width: 24.0, kind: ColumnKind::Center },
        ColumnSpec { header: labels.description, base_width: 200.0, kind: ColumnKind::Text },
        ColumnSpec { header: labels.quantity, base_width: 48.0, kind: ColumnKind::Numeric },
        ColumnSpec { header: labels.unit_price, base_width: 72.0, kind: ColumnKind::Numeric },
        ColumnSpec { header: labels.tax, base_width: 64.0, kind: ColumnKind::Numeric },
        ColumnSpec { header: labels.total, base_width: 84.0, kind: ColumnKind::Numeric },
    ];
    let rows = invoice
        .line_items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            vec![
                (i + 1).to_string(),
                item.description.clone(),
                quantity(item.quantity),
                format_number(item.unit_price, 2),
                format_number(item.computed_tax_amount(), 2),
                format_number(item.computed_total_with_tax(), 2),
            ]
        })
        .collect();
    ops.push(table(ctx, &specs, 1, rows, labels.no_data));

    let totals = invoice.totals();
    ops.push(totals_block(
        ctx,
        vec![
            TotalsRow {
                label: labels.subtotal.to_string(),
                value: money(totals.taxable, language, currency),
                emphasized: false,
            },
            TotalsRow {
                label: labels.total_tax.to_string(),
                value: money(totals.tax, language, currency),
                emphasized: false,
            },
            TotalsRow {
                label: labels.grand_total.to_string(),
                value: money(totals.grand, language, currency),
                emphasized: true,
            },
        ],
    ));

    if let Some(notes) = invoice.notes.as_deref() {
        ops.push(DrawOp::Paragraph(ParagraphOp {
            title: labels.notes.to_string(),
            text: notes.to_string(),
            x: ctx.place_box(0.0, ctx.content_width),
            width: ctx.content_width,
            align: ctx.align,
        }));
    }

    ops.push(footer(ctx, env));
    ops
}

/// QR from `zatca.qrCode`, or a TLV payload built from the seller's VAT data
fn qr_image(invoice: &InvoiceRecord) -> Option<RasterImage> {
    let zatca = invoice.zatca.as_ref()?;
    if let Some(code) = zatca.qr_code.as_deref() {
        return invoice_qr(code);
    }
    let vat = invoice.seller.vat_number.as_deref()?;
    let totals = invoice.totals();
    let payload = zatca_tlv(
        &invoice.seller.name,
        vat,
        invoice.issue_date.trim(),
        &format!("{:.2}", totals.grand),
        &format!("{:.2}", totals.tax),
    );
    invoice_qr(&payload)
}

fn party_boxes(invoice: &InvoiceRecord, ctx: &RenderContext, env: &ComposeEnv) -> DrawOp {
    let labels = env.labels;
    let (seller_label, buyer_label) = match invoice.flow {
        Flow::Sales => (labels.seller, labels.customer),
        Flow::Purchase => (labels.supplier, labels.buyer),
    };
    let width = ((ctx.content_width - PARTY_GAP) / 2.0).max(0.0);

    let make = |party: &Party, label: &str, offset: f64| {
        let mut lines = Vec::new();
        if let Some(vat) = &party.vat_number {
            lines.push(format!("{}: {vat}", labels.vat_number));
        }
        let address = party.address.summary();
        if !address.is_empty() {
            lines.push(address);
        }
        PartyBox {
            x: ctx.place_box(offset, width),
            width,
            label: label.to_string(),
            name: party.name.clone(),
            lines,
        }
    };

    DrawOp::PartyBoxes(PartyBoxesOp {
        leading: make(&invoice.seller, seller_label, 0.0),
        trailing: make(&invoice.buyer, buyer_label, width + PARTY_GAP),
        align: ctx.align,
    })
}
