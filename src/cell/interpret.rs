//! Turning raw cell values into instants.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use super::RawValue;
use super::config::InputFormat;
use super::error::CellError;
use super::pattern::Pattern;

/// Largest magnitude a date may have, in milliseconds from the epoch.
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%dT%H:%M%:z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%b %d %Y", "%B %d %Y", "%b %d, %Y", "%B %d, %Y"];

/// Interpret `value` as an instant according to `input`.
pub fn interpret(value: &RawValue, input: &InputFormat<'_>) -> Result<DateTime<Utc>, CellError> {
    match input {
        InputFormat::Pattern(pattern) => Pattern::compile(pattern).parse(&value.to_string()),
        InputFormat::Auto => auto_detect(value),
    }
}

/// Numbers are epoch milliseconds. Numeric-looking strings are read by their
/// integer prefix as epoch milliseconds. Anything else goes through generic
/// date parsing.
fn auto_detect(value: &RawValue) -> Result<DateTime<Utc>, CellError> {
    match value {
        RawValue::Number(n) => from_epoch_millis(*n)
            .ok_or_else(|| CellError::Parse(format!("{n} is outside the date range"))),
        RawValue::Text(text) if looks_numeric(text) => integer_prefix(text)
            .and_then(|n| from_epoch_millis(n as f64))
            .ok_or_else(|| CellError::Parse(format!("'{text}' has no usable integer value"))),
        RawValue::Text(text) => parse_generic(text),
    }
}

/// Instant `ms` milliseconds from the epoch, truncating fractional milliseconds.
pub(crate) fn from_epoch_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    let ms = ms.trunc();
    if ms.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    Utc.timestamp_millis_opt(ms as i64).single()
}

/// True when the whole string reads as a number, the way a spreadsheet or a
/// JavaScript host would: blank strings, decimals, exponents, `Infinity` and
/// `0x`/`0o`/`0b` literals all count.
fn looks_numeric(text: &str) -> bool {
    let t = text.trim();
    if t.is_empty() {
        return true;
    }
    if matches!(t, "Infinity" | "+Infinity" | "-Infinity") {
        return true;
    }
    if let Some((radix, digits)) = radix_literal(t) {
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }
    let lower = t.to_ascii_lowercase();
    if lower.contains("inf") || lower.contains("nan") {
        return false;
    }
    t.parse::<f64>().is_ok()
}

fn radix_literal(t: &str) -> Option<(u32, &str)> {
    let prefix = t.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    Some((radix, &t[2..]))
}

/// Leading integer of a string: optional sign, then decimal digits, or hex
/// digits after a `0x` prefix. Trailing text is ignored.
fn integer_prefix(text: &str) -> Option<i128> {
    let t = text.trim_start();
    let (negative, t) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let (radix, body) = match t.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => (16, &t[2..]),
        _ => (10, t),
    };

    let digits: Vec<u32> = body.chars().map_while(|c| c.to_digit(radix)).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits
        .into_iter()
        .fold(0i128, |acc, d| acc.saturating_mul(radix as i128).saturating_add(d as i128));
    Some(if negative { -magnitude } else { magnitude })
}

/// Best-effort parsing of common textual date layouts. Values without an
/// offset are taken as UTC.
fn parse_generic(text: &str) -> Result<DateTime<Utc>, CellError> {
    let t = text.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(t) {
        return Ok(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(t) {
        return Ok(date.with_timezone(&Utc));
    }
    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(date) = DateTime::parse_from_str(t, format) {
            return Ok(date.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(t, format) {
            return Ok(date.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(t, format) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }

    Err(CellError::Parse(format!("'{t}' is not a recognized date")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto(value: RawValue) -> Option<DateTime<Utc>> {
        interpret(&value, &InputFormat::Auto).ok()
    }

    fn ymd_hms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn numbers_are_epoch_millis() {
        assert_eq!(
            auto(RawValue::Number(1_700_000_000_000.0)),
            Some(ymd_hms(2023, 11, 14, 22, 13, 20))
        );
        assert_eq!(auto(RawValue::Number(0.0)), Some(DateTime::<Utc>::default()));
    }

    #[test]
    fn non_finite_and_huge_numbers_are_rejected() {
        assert_eq!(auto(RawValue::Number(f64::NAN)), None);
        assert_eq!(auto(RawValue::Number(f64::INFINITY)), None);
        assert_eq!(auto(RawValue::Number(9e15)), None);
    }

    #[test]
    fn numeric_strings_use_integer_prefix() {
        let expected = Some(ymd_hms(2023, 11, 14, 22, 13, 20));
        assert_eq!(auto(RawValue::text("1700000000000")), expected);
        assert_eq!(auto(RawValue::text("  1700000000000 ")), expected);
        assert_eq!(auto(RawValue::text("1700000000000.75")), expected);
        assert_eq!(auto(RawValue::text("1.5e3")), auto(RawValue::Number(1.0)));
    }

    #[test]
    fn blank_and_infinite_strings_are_not_dates() {
        assert_eq!(auto(RawValue::text("")), None);
        assert_eq!(auto(RawValue::text("   ")), None);
        assert_eq!(auto(RawValue::text("Infinity")), None);
    }

    #[test]
    fn hex_strings_are_read_as_integers() {
        assert_eq!(auto(RawValue::text("0x10")), auto(RawValue::Number(16.0)));
    }

    #[test]
    fn generic_date_strings() {
        assert_eq!(
            auto(RawValue::text("2023-11-14T22:13:20Z")),
            Some(ymd_hms(2023, 11, 14, 22, 13, 20))
        );
        assert_eq!(
            auto(RawValue::text("2023-11-14T23:13:20+01:00")),
            Some(ymd_hms(2023, 11, 14, 22, 13, 20))
        );
        assert_eq!(
            auto(RawValue::text("Tue, 14 Nov 2023 22:13:20 +0000")),
            Some(ymd_hms(2023, 11, 14, 22, 13, 20))
        );
        assert_eq!(
            auto(RawValue::text("2023-11-14 22:13")),
            Some(ymd_hms(2023, 11, 14, 22, 13, 0))
        );
        assert_eq!(
            auto(RawValue::text("2023-11-14")),
            Some(ymd_hms(2023, 11, 14, 0, 0, 0))
        );
        assert_eq!(
            auto(RawValue::text("Nov 14, 2023")),
            Some(ymd_hms(2023, 11, 14, 0, 0, 0))
        );
    }

    #[test]
    fn garbage_is_not_a_date() {
        assert_eq!(auto(RawValue::text("hello")), None);
        assert_eq!(auto(RawValue::text("nan")), None);
    }

    #[test]
    fn explicit_pattern_parses_stringified_value() {
        let input = InputFormat::Pattern("YYYYMMDD");
        assert_eq!(
            interpret(&RawValue::Number(20231114.0), &input).ok(),
            Some(ymd_hms(2023, 11, 14, 0, 0, 0))
        );
        assert!(interpret(&RawValue::text("14/11/2023"), &input).is_err());
    }

    #[test]
    fn integer_prefix_semantics() {
        assert_eq!(integer_prefix("42abc"), Some(42));
        assert_eq!(integer_prefix("-17"), Some(-17));
        assert_eq!(integer_prefix("+0x1f"), Some(31));
        assert_eq!(integer_prefix("abc"), None);
        assert_eq!(integer_prefix(""), None);
    }
}
