use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::views::cell::CellLayout;

#[derive(Parser, Debug)]
#[command(name = "datecell")]
#[command(about = "Format date/time cells and browse them in a terminal table", long_about = None)]
pub struct Cli {
    /// Theme name or path to a TOML theme file
    #[arg(short, long, global = true)]
    pub theme: Option<String>,

    /// Force dark mode (overrides auto-detection)
    #[arg(long, conflicts_with = "light", global = true)]
    pub dark: bool,

    /// Force light mode (overrides auto-detection)
    #[arg(long, conflicts_with = "dark", global = true)]
    pub light: bool,

    /// Custom config directory (default: ~/.config/datecell)
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Cell layout (inline or block)
    #[arg(long, global = true)]
    pub layout: Option<CellLayout>,

    /// Enable verbose logging (prints log path, sets DEBUG level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format values as date/time cells and print the result
    Format(FormatArgs),
    /// Open a dataset file in a table view
    View {
        /// Dataset JSON file
        file: PathBuf,
    },
    /// Manage themes
    Theme(ThemeArgs),
}

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Values to format; reads stdin lines when empty
    pub values: Vec<String>,

    /// Input pattern, or DEFAULT to auto-detect
    #[arg(short, long)]
    pub input_format: Option<String>,

    /// Output pattern, or "relative"
    #[arg(short, long)]
    pub output_format: Option<String>,

    /// Output time zone: IANA name, utc, or local
    #[arg(long)]
    pub tz: Option<String>,

    /// Print "Invalid Date" instead of the raw value when parsing fails
    #[arg(long)]
    pub report_invalid: bool,

    /// Reference time in epoch milliseconds (default: the current time)
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    pub now: Option<i64>,

    /// Unit for the default numeric display
    #[arg(long)]
    pub unit: Option<String>,

    /// Decimals for the default numeric display
    #[arg(long)]
    pub decimals: Option<usize>,

    /// Print a JSON array instead of one line per value
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: ThemeCommands,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// List available themes
    List {
        /// Show variant and description for each theme
        #[arg(short, long)]
        details: bool,
    },
    /// Show a theme's configuration
    Show {
        /// Theme name to show
        name: String,

        /// Output format (toml or json)
        #[arg(short, long, default_value = "toml")]
        format: OutputFormat,
    },
    /// Show path where custom themes can be placed
    Path,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {s}. Use 'toml' or 'json'")),
        }
    }
}
