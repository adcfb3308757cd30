use serde::{Deserialize, Serialize};

/// Sentinel input format meaning "detect the date automatically".
pub const AUTO_INPUT_FORMAT: &str = "DEFAULT";

/// Output format that renders a relative phrase instead of a date.
pub const RELATIVE_OUTPUT_FORMAT: &str = "relative";

/// Per-column date/time formatting.
///
/// Field names accept both snake_case and the camelCase spelling used in
/// dashboard JSON exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeFormat {
    #[serde(default, alias = "inputFormat", skip_serializing_if = "Option::is_none")]
    pub input_format: Option<String>,

    #[serde(default, alias = "outputFormat", skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,

    #[serde(
        default,
        alias = "outputTimeZone",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_time_zone: Option<String>,
}

/// Wrapper matching the `dateTimeCell` block of a column config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeCellConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DateTimeFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat<'a> {
    Auto,
    Pattern(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat<'a> {
    Relative,
    Pattern(&'a str),
}

impl DateTimeFormat {
    pub fn input(&self) -> InputFormat<'_> {
        match self.input_format.as_deref().map(str::trim) {
            None | Some("") => InputFormat::Auto,
            Some(f)
                if f.eq_ignore_ascii_case(AUTO_INPUT_FORMAT) || f.eq_ignore_ascii_case("auto") =>
            {
                InputFormat::Auto
            }
            Some(f) => InputFormat::Pattern(f),
        }
    }

    /// `None` when no output format is set, which keeps the field's own display.
    pub fn output(&self) -> Option<OutputFormat<'_>> {
        match self.output_format.as_deref() {
            None | Some("") => None,
            Some(f) if f.trim().eq_ignore_ascii_case(RELATIVE_OUTPUT_FORMAT) => {
                Some(OutputFormat::Relative)
            }
            Some(f) => Some(OutputFormat::Pattern(f)),
        }
    }

    pub fn time_zone(&self) -> Option<&str> {
        self.output_time_zone.as_deref()
    }
}
