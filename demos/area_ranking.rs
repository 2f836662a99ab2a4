//! Area ranking example: the largest and smallest parks, plus the raw `top_n` call.
//!
//! Run from the project root:
//!   cargo run --example area_ranking [N]

use std::path::Path;

use park_inventory_analyzer::analysis::{parse_count, top_n, Analyzer};
use park_inventory_analyzer::io::load_dataset;
use park_inventory_analyzer::report::generate_ranking_report;
use park_inventory_analyzer::{ColorScheme, ColumnConfig};

fn main() {
    let n = match std::env::args().nth(1) {
        Some(raw) => parse_count(&raw).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(2);
        }),
        None => 5,
    };

    let dataset = load_dataset(Path::new("data/samples/seoul_parks.csv"))
        .expect("Failed to load sample data");
    let columns = ColumnConfig::default();
    let analyzer = Analyzer::new(&dataset, columns.clone());
    let scheme = ColorScheme::default();

    let largest = analyzer.largest(n).expect("Area column should be numeric");
    print!(
        "{}",
        generate_ranking_report(&format!("Top {n} largest parks"), &largest, &columns, &scheme)
    );

    let smallest = analyzer.smallest(n).expect("Area column should be numeric");
    print!(
        "{}",
        generate_ranking_report(&format!("Bottom {n} smallest parks"), &smallest, &columns, &scheme)
    );

    // The same selection through the plain function
    let records = top_n(&dataset, &columns.area, n, true).expect("Area column should be numeric");
    println!("\nSmallest {} by top_n:", records.len());
    for record in records {
        let name = record.get(&columns.name).map(|v| v.to_string()).unwrap_or_default();
        let area = record.get(&columns.area).map(|v| v.to_string()).unwrap_or_default();
        println!("  {name}: {area}");
    }
}
