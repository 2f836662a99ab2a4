use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement,
    Table,
};

use crate::analysis::{Aggregate, GroupHighlights, GroupSummary, PivotTable, Ranked};
use crate::config::ColorScheme;

use super::charts::{heading, paint};
use super::format_thousands;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Format a per-group summary table as a string.
pub fn format_group_table(summary: &GroupSummary, title: &str, scheme: &ColorScheme) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", heading(title, scheme)));
    output.push_str(&format!("{}\n", "=".repeat(70)));

    let mut table = new_table();
    table.set_header(vec![
        summary.group_column.as_str(),
        "Count",
        "Total",
        "Mean",
        "Max",
        "Min",
        "% Total",
    ]);

    for (key, agg) in &summary.groups {
        table.add_row(vec![
            Cell::new(key),
            number_cell(format!("{}", agg.count)),
            number_cell(format_thousands(agg.sum, 0)),
            number_cell(format_thousands(agg.mean, 2)),
            number_cell(format_thousands(agg.max, 0)),
            number_cell(format_thousands(agg.min, 0)),
            number_cell(format!("{:.1}%", summary.share(key).unwrap_or(0.0) * 100.0)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Format ranked parks as a table with rank, label, optional extra column and value.
pub fn format_ranking_table(
    ranked: &[Ranked<'_>],
    label_column: &str,
    extra_column: Option<&str>,
    value_column: &str,
    title: &str,
    scheme: &ColorScheme,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", heading(title, scheme)));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if ranked.is_empty() {
        output.push_str("  No parks selected.\n");
        return output;
    }

    let mut header = vec!["#", label_column];
    header.extend(extra_column);
    header.push(value_column);

    let mut table = new_table();
    table.set_header(header);

    for (i, r) in ranked.iter().enumerate() {
        let mut row = vec![
            number_cell(format!("{}", i + 1)),
            Cell::new(
                r.record
                    .get(label_column)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            ),
        ];
        if let Some(col) = extra_column {
            row.push(Cell::new(
                r.record.get(col).map(|v| v.to_string()).unwrap_or_default(),
            ));
        }
        row.push(number_cell(format_thousands(r.value, 0)));
        table.add_row(row);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Format a pivot table with row and column totals.
pub fn format_pivot_table(table: &PivotTable, title: &str, scheme: &ColorScheme) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", heading(title, scheme)));
    output.push_str(&format!("{}\n", "=".repeat(70)));

    if table.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let mut grid = new_table();
    let mut header = vec![table.row_column.clone()];
    header.extend(table.columns.iter().cloned());
    header.push("Total".to_string());
    grid.set_header(header);

    for (r, row) in table.rows.iter().enumerate() {
        let mut cells = vec![Cell::new(row)];
        cells.extend(
            table.counts[r]
                .iter()
                .map(|count| number_cell(count.to_string())),
        );
        cells.push(number_cell(table.row_total(row).to_string()));
        grid.add_row(cells);
    }

    let mut totals = vec![Cell::new("Total")];
    totals.extend(
        table
            .columns
            .iter()
            .map(|c| number_cell(table.column_total(c).to_string())),
    );
    totals.push(number_cell(table.total().to_string()));
    grid.add_row(totals);

    output.push_str(&format!("{grid}\n"));
    output
}

/// Format the headline groups of a summary.
pub fn format_highlights(
    highlights: &GroupHighlights,
    group_label: &str,
    scheme: &ColorScheme,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", heading("Highlights", scheme)));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let (name, value) = &highlights.largest_total;
    output.push_str(&format!(
        "  - Largest total area by {group_label}:  {} ({})\n",
        paint(name, scheme.accent()),
        format_thousands(*value, 0)
    ));
    let (name, value) = &highlights.smallest_total;
    output.push_str(&format!(
        "  - Smallest total area by {group_label}: {} ({})\n",
        paint(name, scheme.accent()),
        format_thousands(*value, 0)
    ));
    let (name, value) = &highlights.largest_mean;
    output.push_str(&format!(
        "  - Largest mean area by {group_label}:   {} ({})\n",
        paint(name, scheme.accent()),
        format_thousands(*value, 2)
    ));
    output
}

/// Format the overall statistics line for a column.
pub fn format_overall(agg: &Aggregate, value_column: &str) -> String {
    format!(
        "  {value_column}: {} records, total {}, mean {}, max {}, min {}\n",
        agg.count,
        format_thousands(agg.sum, 0),
        format_thousands(agg.mean, 2),
        format_thousands(agg.max, 0),
        format_thousands(agg.min, 0)
    )
}
