#![no_main]

use libfuzzer_sys::fuzz_target;
use zont_api::{decode, DecodeOptions};

fuzz_target!(|data: &[u8]| {
    // Arbitrary JSON fed to decode() - should never panic, only return errors
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let _ = decode(&value, DecodeOptions::default());
    let opts = DecodeOptions::default()
        .with_sort(false)
        .with_filter_duplicates(true);
    let _ = decode(&value, opts);
});
