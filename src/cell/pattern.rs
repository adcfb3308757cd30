//! Moment-style date patterns (`YYYY-MM-DD HH:mm:ss`) compiled onto chrono.
//!
//! Patterns are used in both directions: parsing raw cell values when an input
//! format is configured, and rendering absolute dates for the output format.
//! Text inside `[brackets]` is copied literally, as is any character that is
//! not a token.

use std::fmt::{self, Write};

use chrono::format::{self, Item, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Timelike, Utc};

use super::error::CellError;
use super::interpret::from_epoch_millis;
use super::zone::{Zone, Zoned};

/// Tokens chrono has no direct specifier for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Special {
    OrdinalDay,
    Quarter,
    WeekdayMin,
    /// Hour of day counted 1-24
    Hour24 {
        padded: bool,
    },
    /// Leading digits of the fractional second
    Fraction(usize),
    EpochMillis,
}

#[derive(Debug, Clone, Copy)]
enum Token {
    Strftime(&'static str),
    Special(Special),
}

// Longer tokens must precede their prefixes.
const TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Strftime("%Y")),
    ("YY", Token::Strftime("%y")),
    ("MMMM", Token::Strftime("%B")),
    ("MMM", Token::Strftime("%b")),
    ("MM", Token::Strftime("%m")),
    ("M", Token::Strftime("%-m")),
    ("DDDD", Token::Strftime("%j")),
    ("DDD", Token::Strftime("%-j")),
    ("Do", Token::Special(Special::OrdinalDay)),
    ("DD", Token::Strftime("%d")),
    ("D", Token::Strftime("%-d")),
    ("dddd", Token::Strftime("%A")),
    ("ddd", Token::Strftime("%a")),
    ("dd", Token::Special(Special::WeekdayMin)),
    ("d", Token::Strftime("%w")),
    ("E", Token::Strftime("%u")),
    ("Q", Token::Special(Special::Quarter)),
    ("HH", Token::Strftime("%H")),
    ("H", Token::Strftime("%-H")),
    ("hh", Token::Strftime("%I")),
    ("h", Token::Strftime("%-I")),
    ("kk", Token::Special(Special::Hour24 { padded: true })),
    ("k", Token::Special(Special::Hour24 { padded: false })),
    ("mm", Token::Strftime("%M")),
    ("m", Token::Strftime("%-M")),
    ("ss", Token::Strftime("%S")),
    ("s", Token::Strftime("%-S")),
    ("SSS", Token::Strftime("%3f")),
    ("SS", Token::Special(Special::Fraction(2))),
    ("S", Token::Special(Special::Fraction(1))),
    ("A", Token::Strftime("%p")),
    ("a", Token::Strftime("%P")),
    ("ZZ", Token::Strftime("%z")),
    ("Z", Token::Strftime("%:z")),
    ("X", Token::Strftime("%s")),
    ("x", Token::Special(Special::EpochMillis)),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Strftime(String),
    Special(Special),
}

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn compile(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut pending = String::new();
        let mut rest = source;

        while let Some(c) = rest.chars().next() {
            if c == '['
                && let Some(end) = rest.find(']')
            {
                push_literal(&mut pending, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }

            if let Some((text, token)) = TOKENS.iter().find(|(text, _)| rest.starts_with(text)) {
                match token {
                    Token::Strftime(spec) => pending.push_str(spec),
                    Token::Special(special) => {
                        if !pending.is_empty() {
                            segments.push(Segment::Strftime(std::mem::take(&mut pending)));
                        }
                        segments.push(Segment::Special(*special));
                    }
                }
                rest = &rest[text.len()..];
                continue;
            }

            let width = c.len_utf8();
            push_literal(&mut pending, &rest[..width]);
            rest = &rest[width..];
        }

        if !pending.is_empty() {
            segments.push(Segment::Strftime(pending));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    /// Render `date` in `zone`.
    pub fn format(&self, date: DateTime<Utc>, zone: Zone) -> Result<String, CellError> {
        match Zoned::new(date, zone) {
            Zoned::Local(date) => self.render(&date),
            Zoned::Utc(date) => self.render(&date),
            Zoned::Named(date) => self.render(&date),
        }
    }

    fn render<Z>(&self, date: &DateTime<Z>) -> Result<String, CellError>
    where
        Z: TimeZone,
        Z::Offset: fmt::Display,
    {
        let mut out = String::new();
        for segment in &self.segments {
            let written = match segment {
                Segment::Strftime(spec) => {
                    if StrftimeItems::new(spec).any(|item| matches!(item, Item::Error)) {
                        return Err(CellError::Format(format!(
                            "invalid pattern '{}'",
                            self.source
                        )));
                    }
                    write!(out, "{}", date.format(spec))
                }
                Segment::Special(special) => write_special(&mut out, *special, date),
            };
            written.map_err(|_| CellError::Format(format!("invalid pattern '{}'", self.source)))?;
        }
        Ok(out)
    }

    /// Parse `input` against this pattern.
    ///
    /// Values without an offset are taken as UTC; values without a time are
    /// taken as midnight.
    pub fn parse(&self, input: &str) -> Result<DateTime<Utc>, CellError> {
        let input = input.trim();
        match self.segments.as_slice() {
            [Segment::Special(Special::EpochMillis)] => input
                .parse::<f64>()
                .ok()
                .and_then(from_epoch_millis)
                .ok_or_else(|| CellError::Parse(format!("'{input}' is not epoch milliseconds"))),
            [Segment::Strftime(spec)] => parse_strftime(input, spec),
            _ => Err(CellError::Parse(format!(
                "pattern '{}' cannot be used for parsing",
                self.source
            ))),
        }
    }
}

fn push_literal(pending: &mut String, text: &str) {
    for c in text.chars() {
        if c == '%' {
            pending.push_str("%%");
        } else {
            pending.push(c);
        }
    }
}

/// Fields the pattern leaves out default to the start of their period, and
/// text after the pattern is ignored.
fn parse_strftime(input: &str, spec: &str) -> Result<DateTime<Utc>, CellError> {
    let mut parsed = Parsed::new();
    format::parse_and_remainder(&mut parsed, input, StrftimeItems::new(spec))?;

    if let Some(timestamp) = parsed.timestamp() {
        return DateTime::from_timestamp(timestamp, parsed.nanosecond().unwrap_or(0))
            .ok_or_else(|| CellError::Parse(format!("'{input}' is outside the date range")));
    }

    fill_defaults(&mut parsed)?;
    let wall = parsed.to_naive_datetime_with_offset(0)?.and_utc();
    let offset = TimeDelta::seconds(i64::from(parsed.offset().unwrap_or(0)));
    wall.checked_sub_signed(offset)
        .ok_or_else(|| CellError::Parse(format!("'{input}' is outside the date range")))
}

fn fill_defaults(parsed: &mut Parsed) -> ParseResult<()> {
    if parsed.ordinal().is_none() {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }
    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        // 12-hour clock without a meridiem reads as morning
        (None, Some(_)) => parsed.set_ampm(false)?,
        _ => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    Ok(())
}

fn write_special<Z>(out: &mut String, special: Special, date: &DateTime<Z>) -> fmt::Result
where
    Z: TimeZone,
{
    match special {
        Special::OrdinalDay => write!(out, "{}", ordinal(date.day())),
        Special::Quarter => write!(out, "{}", date.month0() / 3 + 1),
        Special::WeekdayMin => {
            let name = date.weekday().to_string();
            out.push_str(&name[..2]);
            Ok(())
        }
        Special::Hour24 { padded } => {
            let hour = match date.hour() {
                0 => 24,
                h => h,
            };
            if padded {
                write!(out, "{hour:02}")
            } else {
                write!(out, "{hour}")
            }
        }
        Special::Fraction(digits) => {
            let nanos = date.nanosecond() % 1_000_000_000;
            let value = nanos / 10u32.pow(9 - digits as u32);
            write!(out, "{value:0digits$}")
        }
        Special::EpochMillis => write!(out, "{}", date.timestamp_millis()),
    }
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}
