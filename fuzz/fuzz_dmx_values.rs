//! Fuzz target for the DMX value tokenizer and lenient number parsing.
//!
//! Run with: cargo +nightly fuzz run fuzz_dmx_values

#![no_main]

use libfuzzer_sys::fuzz_target;
use lla_core::parse::{DMX_UNIVERSE_SIZE, dmx_values, is_exact_int, lenient_int};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let values = dmx_values(s);
    assert!(values.len() <= DMX_UNIVERSE_SIZE);

    if let Ok(n) = s.trim().parse::<i32>() {
        assert!(is_exact_int(s));
        assert_eq!(lenient_int(s), n);
    }
});
