#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let tokens: Vec<&str> = input.split_whitespace().take(64).collect();
        if let Ok(args) = smash::fuzzing::parse_cli_input(&tokens) {
            debug_assert!(args.max_idle_conns.get() > 0);
            debug_assert!(!args.request_timeout.is_zero());
        }
    }
});
