#![no_main]

use libfuzzer_sys::fuzz_target;
use silhouette::normalize_term;

fuzz_target!(|text: &str| {
    let key = normalize_term(text);

    assert!(
        key.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b' '),
        "Key has characters outside [a-z0-9 ]: {key:?}"
    );
    assert!(!key.starts_with(' ') && !key.ends_with(' '), "Key is not trimmed: {key:?}");
    assert!(!key.contains("  "), "Key has a double space: {key:?}");
    assert_eq!(normalize_term(&key), key, "Normalization is not idempotent");
});
