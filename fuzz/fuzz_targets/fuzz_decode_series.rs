#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::{json, Value};
use zont_api::{decode, DecodeOptions};

fuzz_target!(|data: &[u8]| {
    // Each 2 bytes: one signed leading field (anchor, delta, or zero sentinel)
    let fields: Vec<i64> = data
        .chunks_exact(2)
        .map(|c| i64::from(i16::from_le_bytes([c[0], c[1]])))
        .collect();
    let series = Value::Array(
        fields
            .iter()
            .enumerate()
            .map(|(i, f)| json!([f, i]))
            .collect(),
    );

    let unsorted_opts = DecodeOptions::default().with_sort(false);
    let unsorted = decode(&series, unsorted_opts).unwrap();
    let sorted = decode(&series, DecodeOptions::default()).unwrap();
    let filtered = decode(&series, unsorted_opts.with_filter_duplicates(true)).unwrap();

    // Property: zero sentinels are the only points dropped
    assert_eq!(unsorted.len(), fields.iter().filter(|&&f| f != 0).count());
    assert_eq!(sorted.len(), unsorted.len());

    // Property: sorted output is ascending
    for w in sorted.windows(2) {
        assert!(w[0].ts <= w[1].ts, "not sorted: {} > {}", w[0].ts, w[1].ts);
    }

    // Property: filtering equals dedup of consecutive timestamps in decode order
    let mut deduped = unsorted.clone();
    deduped.dedup_by_key(|p| p.ts);
    assert_eq!(filtered, deduped);
});
