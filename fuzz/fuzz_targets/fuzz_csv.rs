#![no_main]

use libfuzzer_sys::fuzz_target;
use park_inventory_analyzer::analysis::{group_summary, pivot_count, top_n};
use park_inventory_analyzer::io::read_csv_from_bytes;

fuzz_target!(|data: &[u8]| {
    if let Ok(dataset) = read_csv_from_bytes(data, "fuzz") {
        let columns = dataset.columns().to_vec();
        if let (Some(key), Some(value)) = (columns.first(), columns.last()) {
            let _ = group_summary(&dataset, key, value);
            let _ = top_n(&dataset, value, 3, false);
            let _ = pivot_count(&dataset, key, value);
        }
    }
});
