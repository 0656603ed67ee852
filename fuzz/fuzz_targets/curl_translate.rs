#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let instruction = smash::fuzzing::translate_curl_input(input);
        debug_assert!(instruction.raw_command.is_none());
        for (key, value) in &instruction.headers {
            debug_assert!(!key.is_empty());
            debug_assert_eq!(key, key.trim());
            debug_assert_eq!(value, value.trim());
        }
        if !instruction.url.is_empty() {
            debug_assert!(instruction.url.starts_with("http"));
        }
    }
});
