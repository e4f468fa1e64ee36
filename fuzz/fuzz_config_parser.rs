//! Fuzz target for the client configuration parser.
//!
//! Run with: cargo +nightly fuzz run fuzz_config_parser
//!
//! Feeds arbitrary text through `ClientConfig::parse()`, which covers both
//! TOML decoding and validation.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = lla_config::ClientConfig::parse(s) {
            assert!(!config.daemon.socket_path.is_empty());
        }
    }
});
