use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

use super::error::CellError;

/// Time zone an absolute date is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The zone of the machine running the viewer
    Local,
    Utc,
    Named(Tz),
}

impl Zone {
    /// Resolve a zone identifier.
    ///
    /// Missing, empty, `browser`, `default` and `local` all mean the local zone.
    pub fn resolve(name: Option<&str>) -> Result<Self, CellError> {
        let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(Self::Local);
        };
        match name.to_lowercase().as_str() {
            "browser" | "default" | "local" => Ok(Self::Local),
            "utc" | "z" | "gmt" => Ok(Self::Utc),
            _ => name
                .parse::<Tz>()
                .map(Self::Named)
                .map_err(|_| CellError::TimeZone(name.to_string())),
        }
    }
}

/// A date converted into a concrete zone, ready for formatting.
pub enum Zoned {
    Local(DateTime<Local>),
    Utc(DateTime<Utc>),
    Named(DateTime<Tz>),
}

impl Zoned {
    pub fn new(date: DateTime<Utc>, zone: Zone) -> Self {
        match zone {
            Zone::Local => Self::Local(date.with_timezone(&Local)),
            Zone::Utc => Self::Utc(date),
            Zone::Named(tz) => Self::Named(date.with_timezone(&tz)),
        }
    }
}
