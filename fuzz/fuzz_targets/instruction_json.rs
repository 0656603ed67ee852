#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(set) = smash::fuzzing::parse_instruction_json(input) {
            debug_assert!(!set.is_empty());
            for instruction in &set {
                debug_assert!(!instruction.url.trim().is_empty());
            }
        }
    }
});
