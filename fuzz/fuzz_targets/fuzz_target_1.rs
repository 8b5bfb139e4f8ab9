#![no_main]

use libfuzzer_sys::fuzz_target;
use finality::log_reader::classify_line;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string (may fail for invalid UTF-8, that's fine)
    if let Ok(line) = std::str::from_utf8(data) {
        // Just try to classify - we're looking for panics, not errors
        let _ = classify_line(line);
    }
});
