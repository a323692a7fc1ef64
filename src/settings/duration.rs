//! Serde adapter for polling intervals.
//!
//! Intervals are written in the duration notation used by Go tooling
//! (`"0s"`, `"1.5ms"`, `"500µs"`, `"1m30s"`, `"2h0m0s"`), which keeps full
//! nanosecond precision. On read, a string in that notation or a bare
//! integer number of nanoseconds is accepted.
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer, de, ser};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// Largest interval representable by a signed 64-bit nanosecond count.
pub const MAX_NANOS: u128 = 9_223_372_036_854_775_807;

/// Serialize `value` as a duration string.
///
/// # Errors
///
/// Fails if `value` exceeds [`MAX_NANOS`].
pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    if value.as_nanos() > MAX_NANOS {
        return Err(ser::Error::custom(format!(
            "interval of {}s is too large",
            value.as_secs()
        )));
    }
    serializer.serialize_str(&format(*value))
}

/// Deserialize an interval from a duration string or integer nanoseconds.
///
/// # Errors
///
/// Returns an error for negative numbers, unknown units, or malformed text.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Nanos(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Nanos(ns) => Ok(Duration::from_nanos(ns)),
        Raw::Text(text) => parse(&text).map_err(de::Error::custom),
    }
}

/// Format `value` the way Go prints a `time.Duration`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use realize_cli::settings::duration::format;
///
/// assert_eq!(format(Duration::ZERO), "0s");
/// assert_eq!(format(Duration::from_micros(1500)), "1.5ms");
/// assert_eq!(format(Duration::from_secs(90)), "1m30s");
/// ```
#[must_use]
pub fn format(value: Duration) -> String {
    let nanos = value.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", decimal(nanos, NANOS_PER_MICRO, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", decimal(nanos, NANOS_PER_MILLI, 6));
    }

    let hours = nanos / NANOS_PER_HOUR;
    let minutes = nanos % NANOS_PER_HOUR / NANOS_PER_MIN;
    let seconds = decimal(nanos % NANOS_PER_MIN, NANOS_PER_SEC, 9);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// `value / unit` as a decimal with trailing zeros removed.
fn decimal(value: u128, unit: u128, places: usize) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:0places$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Parse a duration string such as `"100ms"`, `"1.5s"` or `"1h2m3s"`.
///
/// Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. Every number
/// needs a unit, except a lone `"0"`.
///
/// # Errors
///
/// Returns a message describing why `text` is not a valid interval.
pub fn parse(text: &str) -> Result<Duration, String> {
    let invalid = || format!("invalid interval '{text}': expected e.g. 100ms, 1.5s, 1m30s");

    let mut rest = text.trim();
    if let Some(unsigned) = rest.strip_prefix('+') {
        rest = unsigned;
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        let scale = unit_nanos(unit).ok_or_else(invalid)?;
        let part = scaled(number, scale).ok_or_else(invalid)?;
        total = total
            .checked_add(part)
            .filter(|t| *t <= MAX_NANOS)
            .ok_or_else(|| format!("interval '{text}' is too large"))?;
        rest = tail;
    }

    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| format!("interval '{text}' is too large"))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Convert a decimal `number` of some unit into nanoseconds.
///
/// Fractional digits beyond nanosecond precision are dropped.
fn scaled(number: &str, scale: u128) -> Option<u128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut value = whole.checked_mul(scale)?;
    let mut place = scale;
    for digit in frac.bytes() {
        place /= 10;
        value = value.checked_add(u128::from(digit - b'0') * place)?;
    }
    Some(value)
}
