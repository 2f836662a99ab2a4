//! District overview example: load CSV, summarize park area per district, and print the report.
//!
//! Run from the project root:
//!   cargo run --example district_overview

use std::path::Path;

use park_inventory_analyzer::analysis::Analyzer;
use park_inventory_analyzer::io::{CsvFormat, DatasetReader};
use park_inventory_analyzer::report::generate_district_report;
use park_inventory_analyzer::{ColorScheme, ColumnConfig};

fn main() {
    let path = Path::new("data/samples/seoul_parks.csv");
    let dataset = CsvFormat
        .read(path)
        .expect("Failed to read CSV file")
        .with_label_column("공원명")
        .expect("Sample data has a park name column");
    println!("Loaded '{}': {} parks", dataset.name, dataset.len());

    let analyzer = Analyzer::new(&dataset, ColumnConfig::default());
    match analyzer.district_overview() {
        Ok(overview) => print!(
            "{}",
            generate_district_report("District summary", &overview, &ColorScheme::default())
        ),
        Err(e) => eprintln!("Could not summarize districts: {e}"),
    }
}
