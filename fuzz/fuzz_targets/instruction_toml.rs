#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(set) = smash::fuzzing::parse_instruction_toml(input) {
            debug_assert!(!set.is_empty());
            for instruction in &set {
                debug_assert!(!instruction.url.trim().is_empty());
                debug_assert!(instruction.raw_command.is_none());
                debug_assert!(instruction.effective_parallelism().get() >= 1);
            }
            debug_assert_eq!(set.run_once().len() + set.recurring().len(), set.len());
        }
    }
});
