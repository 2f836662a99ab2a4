use colored::{Color, Colorize};

use crate::analysis::{GroupSummary, Metric, PivotTable, Ranked};
use crate::config::ColorScheme;

use super::format_thousands;

const BAR_WIDTH: usize = 40;
const SHADES: [char; 5] = [' ', '\u{2591}', '\u{2592}', '\u{2593}', '\u{2588}'];

pub(crate) fn paint(text: &str, color: Option<Color>) -> String {
    match color {
        Some(c) => text.color(c).to_string(),
        None => text.to_string(),
    }
}

pub(crate) fn heading(text: &str, scheme: &ColorScheme) -> String {
    match scheme.primary() {
        Some(c) => text.bold().color(c).to_string(),
        None => text.to_string(),
    }
}

fn bar(value: f64, max: f64) -> String {
    let len = if max > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    "\u{2588}".repeat(len)
}

/// Format a horizontal bar chart of labelled values.
pub fn format_bar_chart(
    title: &str,
    entries: &[(String, f64)],
    decimals: usize,
    color: Option<Color>,
    scheme: &ColorScheme,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", heading(title, scheme)));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if entries.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max = entries.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
    let label_width = entries
        .iter()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in entries {
        let pad = label_width - label.chars().count();
        output.push_str(&format!(
            "  {}{}  {:>14}  {}\n",
            label,
            " ".repeat(pad),
            format_thousands(*value, decimals),
            paint(&bar(*value, max), color)
        ));
    }

    output.push('\n');
    output
}

/// Bar chart of one metric across the groups of a summary, in key order.
pub fn format_group_chart(
    summary: &GroupSummary,
    metric: Metric,
    title: &str,
    scheme: &ColorScheme,
) -> String {
    let entries: Vec<(String, f64)> = summary
        .groups
        .iter()
        .map(|(k, a)| (k.clone(), a.metric(metric)))
        .collect();
    let (decimals, color) = match metric {
        Metric::Count => (0, scheme.primary()),
        Metric::Mean => (2, scheme.accent()),
        _ => (0, scheme.secondary()),
    };
    format_bar_chart(title, &entries, decimals, color, scheme)
}

/// Each group's percentage of the grand total, largest first.
pub fn format_share_chart(
    summary: &GroupSummary,
    metric: Metric,
    title: &str,
    scheme: &ColorScheme,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", heading(title, scheme)));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if summary.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let ranked = summary.ranked_by(metric, true);
    let label_width = ranked
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);

    for (key, _) in ranked {
        let pct = match metric {
            Metric::Count => summary.count_share(key),
            _ => summary.share(key),
        }
        .unwrap_or(0.0)
            * 100.0;
        let pad = label_width - key.chars().count();
        output.push_str(&format!(
            "  {}{}  {:>5.1}%  {}\n",
            key,
            " ".repeat(pad),
            pct,
            paint(&bar(pct, 100.0), scheme.secondary())
        ));
    }

    output.push('\n');
    output
}

/// Horizontal bars for ranked parks, first-ranked on top.
pub fn format_ranking_chart(
    ranked: &[Ranked<'_>],
    label_column: &str,
    title: &str,
    scheme: &ColorScheme,
) -> String {
    let entries: Vec<(String, f64)> = ranked
        .iter()
        .map(|r| {
            let label = r
                .record
                .get(label_column)
                .map(|v| v.to_string())
                .unwrap_or_else(|| format!("#{}", r.row));
            (label, r.value)
        })
        .collect();
    format_bar_chart(title, &entries, 0, scheme.accent(), scheme)
}

/// Text heatmap of a pivot table; denser shading means more records.
pub fn format_heatmap(table: &PivotTable, title: &str, scheme: &ColorScheme) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", heading(title, scheme)));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if table.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max = table.max_count();
    let row_width = table
        .rows
        .iter()
        .map(|r| r.chars().count())
        .max()
        .unwrap_or(0)
        .max(table.row_column.chars().count());
    let cell_width = table
        .columns
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    output.push_str(&format!(
        "  {}{}",
        table.row_column,
        " ".repeat(row_width - table.row_column.chars().count())
    ));
    for col in &table.columns {
        output.push_str(&format!(
            " | {}{}",
            " ".repeat(cell_width - col.chars().count()),
            col
        ));
    }
    output.push('\n');
    output.push_str(&format!(
        "  {}\n",
        "-".repeat(row_width + table.columns.len() * (cell_width + 3))
    ));

    for (r, row) in table.rows.iter().enumerate() {
        output.push_str(&format!(
            "  {}{}",
            row,
            " ".repeat(row_width - row.chars().count())
        ));
        for &count in &table.counts[r] {
            let level = if max == 0 {
                0
            } else {
                (count * (SHADES.len() - 1)).div_ceil(max)
            };
            let shade = SHADES[level].to_string().repeat(2);
            let color = if count == max && count > 0 {
                scheme.accent()
            } else {
                scheme.secondary()
            };
            let number = format!("{count}");
            let pad = cell_width.saturating_sub(number.len() + 3);
            output.push_str(&format!(
                " | {}{} {}",
                " ".repeat(pad),
                paint(&shade, color),
                number
            ));
        }
        output.push('\n');
    }

    output.push('\n');
    output
}
