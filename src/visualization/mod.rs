mod tables;
mod charts;

pub use tables::{
    format_group_table, format_highlights, format_overall, format_pivot_table,
    format_ranking_table,
};
pub use charts::{
    format_bar_chart, format_group_chart, format_heatmap, format_ranking_chart,
    format_share_chart,
};

/// Format a number with `,` thousands separators and a fixed number of decimals.
///
/// # Examples
///
/// ```
/// use park_inventory_analyzer::visualization::format_thousands;
///
/// assert_eq!(format_thousands(2896887.0, 0), "2,896,887");
/// assert_eq!(format_thousands(-1234.5678, 2), "-1,234.57");
/// ```
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
