#![no_main]

use libfuzzer_sys::fuzz_target;
use park_inventory_analyzer::io::read_json_from_bytes;

fuzz_target!(|data: &[u8]| {
    let _ = read_json_from_bytes(data, "fuzz");
});
