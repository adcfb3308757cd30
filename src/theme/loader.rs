use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::Theme;

/// Load a theme from a TOML file.
pub fn load_theme_file(path: &Path) -> Result<Theme> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme from {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse theme from {}", path.display()))
}

pub fn theme_to_toml(theme: &Theme) -> Result<String> {
    Ok(toml::to_string_pretty(theme)?)
}
