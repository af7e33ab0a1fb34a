//! Duration strings
//!
//! Step phrases express durations in the compact form popularised by Go's
//! `time.ParseDuration`: a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit, such as `300ms`, `1.5h` or `2h45m`.
//! Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.

use std::time::Duration;

use crate::error::{DomainError, DomainResult};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

// Fraction digits beyond this add nothing at nanosecond resolution.
const MAX_FRACTION_SCALE: u128 = 1_000_000_000_000_000_000;

/// Parses a duration string such as `"3s"`, `"1h30m"` or `"30ms"`.
///
/// A bare `"0"` is accepted. A leading `+` is allowed; a leading `-` is only
/// accepted for a zero duration since negative waits and bounds are meaningless.
///
/// # Errors
///
/// Returns [`DomainError::InvalidDuration`] if the text does not follow the
/// grammar, names an unknown unit, or overflows.
pub fn parse_duration(input: &str) -> DomainResult<Duration> {
    let invalid = |reason: &str| DomainError::InvalidDuration {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole_digits, after_whole) = split_digits(rest);
        let (fraction_digits, after_number) = match after_whole.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after_whole),
        };
        if whole_digits.is_empty() && fraction_digits.is_empty() {
            return Err(invalid("expected a number"));
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, next) = after_number.split_at(unit_len);
        let unit_nanos = match unit {
            "" => return Err(invalid("missing unit")),
            "ns" => 1,
            "us" | "\u{b5}s" | "\u{3bc}s" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SECOND,
            "m" => NANOS_PER_MINUTE,
            "h" => NANOS_PER_HOUR,
            other => return Err(invalid(&format!("unknown unit '{other}'"))),
        };

        let whole: u128 = if whole_digits.is_empty() {
            0
        } else {
            whole_digits.parse().map_err(|_| invalid("overflow"))?
        };
        let mut value = whole
            .checked_mul(unit_nanos)
            .ok_or_else(|| invalid("overflow"))?;

        if !fraction_digits.is_empty() {
            let mut fraction: u128 = 0;
            let mut scale: u128 = 1;
            for digit in fraction_digits.bytes() {
                if scale >= MAX_FRACTION_SCALE {
                    break;
                }
                fraction = fraction * 10 + u128::from(digit - b'0');
                scale *= 10;
            }
            value = value
                .checked_add(fraction * unit_nanos / scale)
                .ok_or_else(|| invalid("overflow"))?;
        }

        total = total.checked_add(value).ok_or_else(|| invalid("overflow"))?;
        rest = next;
    }

    if negative && total > 0 {
        return Err(invalid("negative durations are not supported"));
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| invalid("overflow"))
}

/// Splits off the leading run of ASCII digits.
fn split_digits(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    input.split_at(end)
}
