use crate::analysis::{DistrictOverview, Metric, Ranked, TypeBreakdown};
use crate::config::{ColorScheme, ColumnConfig};
use crate::visualization::{
    format_bar_chart, format_group_chart, format_group_table, format_heatmap, format_highlights,
    format_overall, format_pivot_table, format_ranking_chart, format_ranking_table,
    format_share_chart,
};

/// Per-district summary: statistics table, count/total/mean charts, area shares and highlights.
pub fn generate_district_report(
    title: &str,
    overview: &DistrictOverview,
    scheme: &ColorScheme,
) -> String {
    let summary = &overview.summary;
    let group = summary.group_column.as_str();
    let mut output = String::new();

    output.push_str(&format_group_table(summary, title, scheme));
    output.push_str(&format_overall(&overview.overall, &summary.value_column));
    output.push_str(&format_group_chart(
        summary,
        Metric::Count,
        &format!("Park count by {group}"),
        scheme,
    ));
    output.push_str(&format_group_chart(
        summary,
        Metric::Sum,
        &format!("Total area by {group}"),
        scheme,
    ));
    output.push_str(&format_group_chart(
        summary,
        Metric::Mean,
        &format!("Mean area by {group}"),
        scheme,
    ));
    output.push_str(&format_share_chart(
        summary,
        Metric::Sum,
        &format!("Share of total area by {group}"),
        scheme,
    ));
    if let Some(highlights) = &overview.highlights {
        output.push_str(&format_highlights(highlights, group, scheme));
    }
    output
}

/// Top or bottom N parks: horizontal bars followed by a detail table.
pub fn generate_ranking_report(
    title: &str,
    ranked: &[Ranked<'_>],
    columns: &ColumnConfig,
    scheme: &ColorScheme,
) -> String {
    let mut output = String::new();
    output.push_str(&format_ranking_chart(ranked, &columns.name, title, scheme));
    output.push_str(&format_ranking_table(
        ranked,
        &columns.name,
        Some(&columns.district),
        &columns.area,
        "Details",
        scheme,
    ));
    output
}

/// Park-type breakdown: counts ranked with shares, mean area ranked, and the district heatmap.
pub fn generate_type_report(title: &str, breakdown: &TypeBreakdown, scheme: &ColorScheme) -> String {
    let summary = &breakdown.summary;
    let group = summary.group_column.as_str();
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", title));

    let by_count: Vec<(String, f64)> = summary
        .ranked_by(Metric::Count, true)
        .into_iter()
        .map(|(k, a)| (k.to_string(), a.count as f64))
        .collect();
    output.push_str(&format_bar_chart(
        &format!("Park count by {group}"),
        &by_count,
        0,
        scheme.primary(),
        scheme,
    ));
    output.push_str(&format_share_chart(
        summary,
        Metric::Count,
        &format!("Share of parks by {group}"),
        scheme,
    ));

    let by_mean: Vec<(String, f64)> = summary
        .ranked_by(Metric::Mean, true)
        .into_iter()
        .map(|(k, a)| (k.to_string(), a.mean))
        .collect();
    output.push_str(&format_bar_chart(
        &format!("Mean area by {group}"),
        &by_mean,
        2,
        scheme.secondary(),
        scheme,
    ));

    let heatmap = &breakdown.heatmap;
    let heat_title = format!("{} x {} heatmap", heatmap.row_column, heatmap.col_column);
    output.push_str(&format_heatmap(heatmap, &heat_title, scheme));
    output.push_str(&format_pivot_table(
        heatmap,
        &format!("{} x {} counts", heatmap.row_column, heatmap.col_column),
        scheme,
    ));
    output
}

/// Area of each park in one district, in input order.
pub fn generate_district_parks_report(
    title: &str,
    parks: &[(String, f64)],
    scheme: &ColorScheme,
) -> String {
    format_bar_chart(title, parks, 0, scheme.primary(), scheme)
}
