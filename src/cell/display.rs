use std::fmt;

use serde::Serialize;

use super::RawValue;

/// What a field shows for a value when no date formatting applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayValue {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<f64>,
}

impl DisplayValue {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            prefix: None,
            suffix: None,
            numeric: None,
        }
    }

    /// The value exactly as it arrived.
    pub fn raw(value: &RawValue) -> Self {
        Self {
            numeric: value.as_number(),
            ..Self::text(value.to_string())
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            f.write_str(prefix)?;
        }
        f.write_str(&self.text)?;
        if let Some(suffix) = &self.suffix {
            f.write_str(suffix)?;
        }
        Ok(())
    }
}

/// A field's default value-to-text transform.
pub trait FieldDisplay: Send + Sync {
    fn display(&self, value: &RawValue) -> DisplayValue;
}

/// Numbers with optional fixed decimals and a unit; text passes through.
#[derive(Debug, Clone, Default)]
pub struct StandardDisplay {
    pub unit: Option<String>,
    pub decimals: Option<usize>,
}

impl StandardDisplay {
    fn suffix(&self) -> Option<String> {
        let unit = self.unit.as_deref()?.trim();
        match unit {
            "" | "none" => None,
            "percent" | "%" => Some("%".to_string()),
            _ => Some(format!(" {unit}")),
        }
    }
}

impl FieldDisplay for StandardDisplay {
    fn display(&self, value: &RawValue) -> DisplayValue {
        match value {
            RawValue::Text(text) => DisplayValue::text(text.clone()),
            RawValue::Number(n) if !n.is_finite() => DisplayValue::raw(value),
            RawValue::Number(n) => {
                let text = match self.decimals {
                    Some(decimals) => format!("{n:.decimals$}"),
                    None => value.to_string(),
                };
                DisplayValue {
                    text,
                    prefix: None,
                    suffix: self.suffix(),
                    numeric: Some(*n),
                }
            }
        }
    }
}

/// A data column as far as cell rendering is concerned.
pub struct Field {
    pub name: String,
    display: Option<Box<dyn FieldDisplay>>,
}

impl Field {
    /// A field without a display transform; its values render as-is.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display: None,
        }
    }

    pub fn with_display(mut self, display: impl FieldDisplay + 'static) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    /// The default display for `value`, or `None` when the field has no transform.
    pub fn display_value(&self, value: &RawValue) -> Option<DisplayValue> {
        self.display.as_ref().map(|d| d.display(value))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("display", &self.display.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(unit: Option<&str>, decimals: Option<usize>) -> StandardDisplay {
        StandardDisplay {
            unit: unit.map(String::from),
            decimals,
        }
    }

    #[test]
    fn text_passes_through() {
        let out = standard(Some("ms"), Some(2)).display(&RawValue::text("hello"));
        assert_eq!(out.to_string(), "hello");
        assert_eq!(out.suffix, None);
    }

    #[test]
    fn numbers_use_decimals_and_unit() {
        let out = standard(Some("ms"), Some(2)).display(&RawValue::Number(3.14159));
        assert_eq!(out.to_string(), "3.14 ms");
        assert_eq!(out.numeric, Some(3.14159));
    }

    #[test]
    fn percent_attaches_directly() {
        let out = standard(Some("percent"), None).display(&RawValue::Number(42.0));
        assert_eq!(out.to_string(), "42%");
    }

    #[test]
    fn whole_numbers_print_without_fraction() {
        let out = standard(None, None).display(&RawValue::Number(1_700_000_000_000.0));
        assert_eq!(out.to_string(), "1700000000000");
    }

    #[test]
    fn field_without_display_has_no_value() {
        let field = Field::new("ts");
        assert!(field.display_value(&RawValue::Number(1.0)).is_none());

        let field = field.with_display(StandardDisplay::default());
        assert!(field.display_value(&RawValue::Number(1.0)).is_some());
    }
}
