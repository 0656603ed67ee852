#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(method) = smash::fuzzing::parse_method_input(input) {
            debug_assert!(method.as_str().eq_ignore_ascii_case(input.trim()));
        }
    }
});
