//! Park-type example: counts per type, the district x type heatmap, and an Excel summary.
//!
//! Run from the project root:
//!   cargo run --example type_heatmap

use std::path::Path;

use park_inventory_analyzer::analysis::{pivot_count, Analyzer};
use park_inventory_analyzer::io::{read_csv, write_summary_excel};
use park_inventory_analyzer::report::generate_type_report;
use park_inventory_analyzer::visualization::{format_heatmap, format_pivot_table};
use park_inventory_analyzer::{ColorScheme, ColumnConfig};

fn main() {
    let dataset = read_csv(Path::new("data/samples/seoul_parks.csv")).expect("Failed to read CSV file");
    let columns = ColumnConfig::default();
    let scheme = ColorScheme::default();

    let breakdown = Analyzer::new(&dataset, columns.clone())
        .type_breakdown()
        .expect("Failed to build the type breakdown");
    print!("{}", generate_type_report("Park types", &breakdown, &scheme));

    // Pivot the other way round: types as rows
    let by_type = pivot_count(&dataset, &columns.park_type, &columns.district)
        .expect("Sample data has type and district columns");
    print!("{}", format_heatmap(&by_type, "Type x district", &scheme));
    print!("{}", format_pivot_table(&by_type, "Type x district counts", &scheme));

    let out = std::env::temp_dir().join("park_type_summary.xlsx");
    match write_summary_excel(&breakdown.summary, &out) {
        Ok(()) => println!("Wrote {}", out.display()),
        Err(e) => eprintln!("Could not write workbook: {e}"),
    }
}
