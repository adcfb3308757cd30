//! Tabular data files shown by the `view` command.
//!
//! ```json
//! {
//!   "title": "Deployments",
//!   "fields": [
//!     { "name": "service" },
//!     { "name": "deployed", "column": { "date_time_cell": { "format": { "output_format": "relative" } } } }
//!   ],
//!   "rows": [["api", 1700000000000]]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cell::{DateTimeCellConfig, DateTimeFormat, FallbackPolicy, Field, RawValue, StandardDisplay};
use crate::theme::ThemeColor;

/// Presentation settings for one column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, alias = "dateTimeCell", skip_serializing_if = "Option::is_none")]
    pub date_time_cell: Option<DateTimeCellConfig>,

    /// Cell background; text switches to the most readable color over it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ThemeColor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_dates: Option<FallbackPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
}

impl ColumnConfig {
    pub fn date_time_format(&self) -> Option<&DateTimeFormat> {
        self.date_time_cell.as_ref()?.format.as_ref()
    }
}

fn default_display() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<usize>,

    /// Whether the field has a display transform; without one, values render raw
    #[serde(default = "default_display")]
    pub display: bool,

    #[serde(default)]
    pub column: ColumnConfig,
}

impl FieldSpec {
    pub fn to_field(&self) -> Field {
        let field = Field::new(self.name.clone());
        if self.display {
            field.with_display(StandardDisplay {
                unit: self.unit.clone(),
                decimals: self.decimals,
            })
        } else {
            field
        }
    }

    pub fn label(&self) -> &str {
        self.column.label.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub rows: Vec<Vec<RawValue>>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse dataset from {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(content)?;
        dataset.validate()?;
        Ok(dataset)
    }

    fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            bail!("Dataset has no fields");
        }
        Ok(())
    }

    /// The value of `field_index` in `row`; short rows yield `None`.
    pub fn value(&self, row: usize, field_index: usize) -> Option<&RawValue> {
        self.rows.get(row)?.get(field_index)
    }
}
