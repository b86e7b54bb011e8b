#![no_main]

use libfuzzer_sys::fuzz_target;
use zont_api::{redacted, RedactionPolicy};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    // Property: redaction with the default policy is idempotent
    let policy = RedactionPolicy::default();
    let once = redacted(value, &policy);
    let twice = redacted(once.clone(), &policy);
    assert_eq!(once, twice, "redaction not idempotent");
});
