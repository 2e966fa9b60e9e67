use std::cmp::Ordering;

use arabic_text::{format_date, parse_date};

use super::{
    footer, header_op, meta_card, money, quantity, section_title, table, ColumnKind, ColumnSpec,
    ComposeEnv,
};
use crate::layout::RenderContext;
use crate::ops::{DrawOp, ProgressBarOp};
use crate::record::{ProgressUpdate, ProjectRecord};

pub fn compose_project(project: &ProjectRecord, ctx: &RenderContext, env: &ComposeEnv) -> Vec<DrawOp> {
    let labels = env.labels;
    let language = ctx.language;
    let currency = project.currency.as_deref().unwrap_or("").trim();
    let due_date = format_date(&project.due_date, language);
    let progress = clamp_progress(project.progress);

    let mut ops = vec![DrawOp::Header(header_op(
        ctx,
        env,
        labels.project_title,
        &project.name,
        &project.code,
        &due_date,
        None,
    ))];

    ops.push(meta_card(
        ctx,
        vec![
            (labels.code.to_string(), project.code.clone()),
            (labels.status.to_string(), project.status.clone()),
            (labels.owner.to_string(), project.owner.clone()),
            (labels.due_date.to_string(), due_date),
            (labels.budget.to_string(), money(project.budget, language, currency)),
            (labels.progress.to_string(), percent(progress)),
        ],
    ));

    let fill_width = ctx.content_width * progress / 100.0;
    ops.push(DrawOp::ProgressBar(ProgressBarOp {
        x: ctx.place_box(0.0, ctx.content_width),
        width: ctx.content_width,
        fill_x: ctx.place_box(0.0, fill_width),
        fill_width,
        label: labels.progress.to_string(),
        value: percent(progress),
        label_x: ctx.leading_anchor(0.0),
        value_x: ctx.trailing_anchor(0.0),
        align: ctx.align,
    }));

    ops.push(section_title(ctx, labels.progress_updates));
    let rows = sort_updates_newest_first(&project.progress_updates)
        .into_iter()
        .map(|update| {
            vec![
                format_date(&update.date, language),
                percent(clamp_progress(update.progress)),
                update.note.clone(),
                update.author.clone().unwrap_or_default(),
            ]
        })
        .collect();
    ops.push(table(
        ctx,
        &[
            ColumnSpec { header: labels.date, base_width: 90.0, kind: ColumnKind::Text },
            ColumnSpec { header: labels.progress, base_width: 70.0, kind: ColumnKind::Numeric },
            ColumnSpec { header: labels.note, base_width: 250.0, kind: ColumnKind::Text },
            ColumnSpec { header: labels.author, base_width: 100.0, kind: ColumnKind::Text },
        ],
        2,
        rows,
        labels.no_data,
    ));

    ops.push(footer(ctx, env));
    ops
}

/// Newest first; updates with unparsable dates keep their order at the end
pub fn sort_updates_newest_first(updates: &[ProgressUpdate]) -> Vec<&ProgressUpdate> {
    let mut keyed: Vec<_> = updates
        .iter()
        .map(|update| (parse_date(&update.date), update))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, update)| update).collect()
}

fn clamp_progress(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn percent(value: f64) -> String {
    format!("{}%", quantity(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::labels;
    use crate::ops::TableRow;
    use crate::palette::{DEFAULT_PRIMARY, DEFAULT_SECONDARY};
    use crate::theme::select_theme;
    use arabic_text::Language;
    use pretty_assertions::assert_eq;

    fn ctx(language: Language) -> RenderContext {
        let theme = select_theme(Some(4), DEFAULT_PRIMARY, DEFAULT_SECONDARY);
        RenderContext::new(language, &theme, false)
    }

    fn env(language: Language) -> ComposeEnv {
        ComposeEnv {
            labels: labels(language),
            logo: None,
            generated_at: "now".into(),
        }
    }

    fn update(date: &str, note: &str) -> ProgressUpdate {
        ProgressUpdate {
            date: date.into(),
            progress: 10.0,
            note: note.into(),
            author: None,
        }
    }

    #[test]
    fn test_sort_newest_first_unparsable_last() {
        let updates = vec![
            update("2025-01-01", "a"),
            update("soon", "x"),
            update("2025-03-01", "b"),
            update("", "y"),
            update("2025-02-01T08:00:00Z", "c"),
        ];
        let notes: Vec<&str> = sort_updates_newest_first(&updates)
            .iter()
            .map(|u| u.note.as_str())
            .collect();
        assert_eq!(notes, vec!["b", "c", "a", "x", "y"]);
    }

    #[test]
    fn test_progress_bar_clamped_and_leading() {
        let project = ProjectRecord {
            progress: 140.0,
            ..Default::default()
        };
        let en = ctx(Language::En);
        let ops = compose_project(&project, &en, &env(Language::En));
        let bar = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::ProgressBar(b) => Some(b),
                _ => None,
            })
            .expect("progress bar");
        assert_eq!(bar.value, "100%");
        assert!((bar.fill_width - bar.width).abs() < 1e-9);

        let project = ProjectRecord {
            progress: 25.0,
            ..Default::default()
        };
        let ar = ctx(Language::Ar);
        let ops = compose_project(&project, &ar, &env(Language::Ar));
        let bar = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::ProgressBar(b) => Some(b),
                _ => None,
            })
            .expect("progress bar");
        // fills from the right in RTL
        assert!((bar.fill_x + bar.fill_width - (bar.x + bar.width)).abs() < 1e-9);
        assert!((bar.fill_width - bar.width / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_history_placeholder() {
        let ops = compose_project(&ProjectRecord::default(), &ctx(Language::En), &env(Language::En));
        let table = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Table(t) => Some(t),
                _ => None,
            })
            .expect("history table");
        assert_eq!(table.rows, vec![TableRow::Placeholder("No data".into())]);
        assert!(table.columns[2].wrap);
    }

    #[test]
    fn test_meta_card_pairs() {
        let project = ProjectRecord {
            code: "PRJ-7".into(),
            status: "active".into(),
            budget: 2500.0,
            currency: Some("SAR".into()),
            progress: 42.5,
            ..Default::default()
        };
        let ops = compose_project(&project, &ctx(Language::En), &env(Language::En));
        let DrawOp::MetaCard(card) = &ops[1] else {
            panic!("meta card second");
        };
        assert_eq!(card.rows.len(), 3);
        assert_eq!(
            card.rows[2][0],
            Some(("Budget".to_string(), "SAR 2,500.00".to_string()))
        );
        assert_eq!(
            card.rows[2][1],
            Some(("Progress".to_string(), "42.50%".to_string()))
        );
    }

    #[test]
    fn test_non_finite_progress() {
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(-5.0), 0.0);
    }
}
