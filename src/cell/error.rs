use std::fmt;

/// Failures inside the date/time cell pipeline.
///
/// These never leave [`super::format_cell`]; they select the fallback state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    /// Input could not be interpreted as a date
    Parse(String),
    /// Output pattern could not be rendered
    Format(String),
    /// Output time zone is not a known zone
    TimeZone(String),
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(details) => write!(f, "could not parse date: {details}"),
            Self::Format(details) => write!(f, "could not format date: {details}"),
            Self::TimeZone(name) => write!(f, "unknown time zone: {name}"),
        }
    }
}

impl std::error::Error for CellError {}

impl From<chrono::ParseError> for CellError {
    fn from(err: chrono::ParseError) -> Self {
        Self::Parse(err.to_string())
    }
}
