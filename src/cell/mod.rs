//! Date/time cell formatting.
//!
//! [`format_cell`] turns a raw value into a [`CellState`]: the field's default
//! display, an absolute date, a relative phrase, or an invalid-date marker.
//! The result depends only on its arguments; "now" is passed in.

mod config;
mod display;
mod error;
mod interpret;
mod pattern;
mod zone;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use config::{DateTimeCellConfig, DateTimeFormat, OutputFormat};
pub use display::{DisplayValue, Field, StandardDisplay};
pub use error::CellError;
pub use pattern::Pattern;
pub use zone::Zone;

use crate::time::relative_time_string;

/// Text shown for [`CellState::Invalid`].
pub const INVALID_DATE_TEXT: &str = "Invalid Date";

/// A raw field value: text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) if n.is_nan() => f.write_str("NaN"),
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Self::Number(n) if *n == 0.0 => f.write_str("0"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

/// What happens when a configured cell cannot be read or rendered as a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Show the field's default display, as if no format were configured
    #[default]
    Fallback,
    /// Show an "Invalid Date" marker
    Report,
}

impl FallbackPolicy {
    fn recover(self, display: DisplayValue) -> CellState {
        match self {
            Self::Fallback => CellState::Default(display),
            Self::Report => CellState::Invalid,
        }
    }
}

impl std::str::FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fallback" | "default" => Ok(Self::Fallback),
            "report" | "invalid" => Ok(Self::Report),
            _ => Err(format!("Invalid policy: {s}. Use 'fallback' or 'report'")),
        }
    }
}

/// The outcome of formatting one cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum CellState {
    Default(DisplayValue),
    Absolute(String),
    Relative(String),
    Invalid,
}

impl CellState {
    pub fn text(&self) -> String {
        match self {
            Self::Default(display) => display.to_string(),
            Self::Absolute(text) | Self::Relative(text) => text.clone(),
            Self::Invalid => INVALID_DATE_TEXT.to_string(),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Default(_) => "default",
            Self::Absolute(_) => "absolute",
            Self::Relative(_) => "relative",
            Self::Invalid => "invalid",
        }
    }
}

/// Resolve the display state of one cell.
///
/// Without a display transform on the field the raw value is shown. Without
/// a format the field's display is shown. Otherwise the value is read as a
/// date and rendered per the output format; any failure along the way is
/// handled by `policy` and never escapes.
pub fn format_cell(
    value: &RawValue,
    field: &Field,
    format: Option<&DateTimeFormat>,
    policy: FallbackPolicy,
    now: DateTime<Utc>,
) -> CellState {
    let Some(display) = field.display_value(value) else {
        return CellState::Default(DisplayValue::raw(value));
    };
    let Some(format) = format else {
        return CellState::Default(display);
    };

    match resolve_date(value, format, now) {
        Ok(Some(state)) => state,
        Ok(None) => CellState::Default(display),
        Err(err) => {
            debug!(field = %field.name, %value, %err, "date cell fell back");
            policy.recover(display)
        }
    }
}

/// `Ok(None)` means a date was read but no output format asks to show it.
fn resolve_date(
    value: &RawValue,
    format: &DateTimeFormat,
    now: DateTime<Utc>,
) -> Result<Option<CellState>, CellError> {
    let date = interpret::interpret(value, &format.input())?;

    match format.output() {
        None => Ok(None),
        Some(OutputFormat::Relative) => {
            Ok(Some(CellState::Relative(relative_time_string(date, now))))
        }
        Some(OutputFormat::Pattern(pattern)) => {
            let zone = Zone::resolve(format.time_zone())?;
            let text = Pattern::compile(pattern).format(date, zone)?;
            Ok(Some(CellState::Absolute(text)))
        }
    }
}
