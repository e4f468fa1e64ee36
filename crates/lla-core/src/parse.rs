//! Lenient numeric parsing and DMX value tokenizing.
//!
//! The `lla_*` tools have always accepted sloppy numbers: `-u foo` means
//! universe 0 and `-u 12abc` means universe 12. Both helpers here keep that
//! behaviour so existing scripts see no change.

/// Number of channels in one DMX universe.
pub const DMX_UNIVERSE_SIZE: usize = 512;

/// Parse an integer the way C `atoi` does.
///
/// Leading whitespace and one sign are accepted, then as many decimal digits
/// as follow. Text with no leading digits yields `0`. Out-of-range values
/// saturate at the `i32` bounds.
pub fn lenient_int(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let limit = i64::from(i32::MAX) + 1;
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(limit));

    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Whether `s` is a well-formed decimal integer with nothing left over.
///
/// Used to report values that [`lenient_int`] had to guess at.
pub fn is_exact_int(s: &str) -> bool {
    let s = s.trim();
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Split a comma separated list of channel values into DMX bytes.
///
/// Empty tokens are skipped, every value is clamped to `0..=255`, and at
/// most one universe worth of channels is kept.
pub fn dmx_values(s: &str) -> Vec<u8> {
    s.split(',')
        .filter(|token| !token.is_empty())
        .take(DMX_UNIVERSE_SIZE)
        .map(|token| lenient_int(token).clamp(0, 255) as u8)
        .collect()
}
