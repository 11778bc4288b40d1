#![no_main]

use jsonspan::{LocateOptions, locate_with};
use libfuzzer_sys::fuzz_target;

// Arbitrary text must never panic, validated or not.
fuzz_target!(|data: (&str, &str, bool)| {
    let (text, pointer, skip_validation) = data;
    let options = LocateOptions {
        skip_validation,
        max_depth: Some(256),
    };
    let _ = locate_with(text, pointer, options);
});
