mod app;
mod cell;
mod cli;
mod dataset;
mod event;
mod help;
mod keys;
mod logging;
mod settings;
mod theme;
mod time;
mod tui;
mod views;

#[cfg(test)]
mod test_utils;

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use ratatui::Frame;
use serde::Serialize;
use tracing::{debug, info};

use app::{App, Message};
use cell::{DateTimeFormat, FallbackPolicy, Field, RawValue, StandardDisplay, format_cell};
use cli::{Cli, Commands, FormatArgs, OutputFormat, ThemeArgs, ThemeCommands};
use dataset::Dataset;
use event::{Event, EventHandler};
use settings::Settings;
use theme::{
    ResolvedTheme, ThemeVariant, all_themes, by_name, default_for_variant, detect_terminal_theme,
    load_theme_file,
};
use time::{fixed_clock, system_clock};
use views::cell::{StyleTag, select_styles};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_dir = settings::config_dir(cli.config_dir.as_ref());

    if let Commands::Theme(theme_args) = &cli.command {
        return handle_theme_command(theme_args, config_dir.as_ref());
    }

    let _log_guard = config_dir.as_deref().and_then(|dir| {
        match logging::init(dir, cli.verbose) {
            Ok(guard) => {
                if cli.verbose {
                    eprintln!("Logging to {}", logging::log_path(dir).display());
                }
                Some(guard)
            }
            Err(e) => {
                eprintln!("Logging disabled: {e:#}");
                None
            }
        }
    });

    let settings = config_dir
        .as_ref()
        .map(|dir| {
            let path = settings::settings_path(dir);
            Settings::load(&path).unwrap_or_else(|e| {
                eprintln!("Warning: {e:#}");
                Settings::default()
            })
        })
        .unwrap_or_default();

    match &cli.command {
        Commands::Format(args) => run_format(args, &settings),
        Commands::View { file } => run_view(&cli, file, &settings, config_dir).await,
        Commands::Theme(_) => Ok(()),
    }
}

fn handle_theme_command(args: &ThemeArgs, config_dir: Option<&PathBuf>) -> Result<()> {
    match &args.command {
        ThemeCommands::List { details } => {
            for theme in all_themes() {
                if *details {
                    println!(
                        "{:<20} {:?}  {}",
                        theme.name,
                        theme.meta.variant,
                        theme.meta.description.as_deref().unwrap_or("")
                    );
                } else {
                    println!("{}", theme.name);
                }
            }
        }
        ThemeCommands::Show { name, format } => {
            let theme = by_name(name).with_context(|| format!("Theme '{name}' not found"))?;

            match format {
                OutputFormat::Toml => {
                    let toml = theme::loader::theme_to_toml(&theme)
                        .context("Failed to serialize theme")?;
                    println!("{toml}");
                }
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&theme)
                        .context("Failed to serialize theme to JSON")?;
                    println!("{json}");
                }
            }
        }
        ThemeCommands::Path => {
            if let Some(config_dir) = config_dir {
                println!("{}", settings::themes_dir(config_dir).display());
            } else {
                eprintln!("Could not determine config directory");
            }
        }
    }
    Ok(())
}

fn resolve_theme(
    cli: &Cli,
    settings: &Settings,
    config_dir: Option<&PathBuf>,
) -> Result<ResolvedTheme> {
    let variant = if cli.dark {
        ThemeVariant::Dark
    } else if cli.light {
        ThemeVariant::Light
    } else {
        detect_terminal_theme()
    };

    // Priority: CLI --theme > settings file > default
    let theme_name = cli.theme.as_ref().or(settings.theme.as_ref());

    if let Some(theme_arg) = theme_name {
        let path = Path::new(theme_arg);
        if path.exists() && path.extension().is_some_and(|e| e == "toml") {
            let theme = load_theme_file(path)?;
            return Ok(theme.into());
        }

        if let Some(theme) = by_name(theme_arg) {
            return Ok(theme.into());
        }

        if let Some(config_dir) = config_dir {
            let custom_path = settings::themes_dir(config_dir).join(format!("{theme_arg}.toml"));
            if custom_path.exists() {
                let theme = load_theme_file(&custom_path)?;
                return Ok(theme.into());
            }
        }

        anyhow::bail!(
            "Theme '{theme_arg}' not found. Use 'datecell theme list' to see available themes."
        );
    }

    Ok(default_for_variant(variant))
}

/// One formatted value as printed by `format --json`.
#[derive(Debug, Serialize)]
struct FormattedValue {
    value: RawValue,
    state: &'static str,
    text: String,
    tags: Vec<StyleTag>,
}

/// Command-line values that read as JSON numbers are numbers; everything else is text.
fn parse_value(input: &str) -> RawValue {
    match serde_json::from_str::<f64>(input) {
        Ok(n) => RawValue::Number(n),
        Err(_) => RawValue::text(input),
    }
}

fn format_values(
    inputs: &[String],
    args: &FormatArgs,
    policy: FallbackPolicy,
    now: DateTime<Utc>,
) -> Vec<FormattedValue> {
    let format = DateTimeFormat {
        input_format: args.input_format.clone(),
        output_format: args.output_format.clone(),
        output_time_zone: args.tz.clone(),
    };
    let field = Field::new("value").with_display(StandardDisplay {
        unit: args.unit.clone(),
        decimals: args.decimals,
    });

    inputs
        .iter()
        .map(|input| {
            let value = parse_value(input);
            let state = format_cell(&value, &field, Some(&format), policy, now);
            FormattedValue {
                tags: select_styles(&state),
                state: state.kind(),
                text: state.text(),
                value,
            }
        })
        .collect()
}

fn run_format(args: &FormatArgs, settings: &Settings) -> Result<()> {
    let inputs = if args.values.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read values from stdin")?
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect()
    } else {
        args.values.clone()
    };

    let policy = if args.report_invalid {
        FallbackPolicy::Report
    } else {
        settings.invalid_dates.unwrap_or_default()
    };
    let clock = match args.now {
        Some(ms) => fixed_clock(ms),
        None => system_clock(),
    };
    let now = clock.now();
    debug!(count = inputs.len(), ?policy, %now, "formatting values");

    let formatted = format_values(&inputs, args, policy, now);
    if args.json {
        let json =
            serde_json::to_string_pretty(&formatted).context("Failed to serialize output")?;
        println!("{json}");
    } else {
        for value in &formatted {
            println!("{}", value.text);
        }
    }
    Ok(())
}

async fn run_view(
    cli: &Cli,
    file: &Path,
    settings: &Settings,
    config_dir: Option<PathBuf>,
) -> Result<()> {
    let dataset = Dataset::load(file)?;
    let resolved_theme = resolve_theme(cli, settings, config_dir.as_ref())?;
    info!(path = %file.display(), rows = dataset.rows.len(), theme = %resolved_theme.name, "opening dataset");

    let mut app = App::new(
        dataset,
        Some(file.to_path_buf()),
        resolved_theme,
        system_clock(),
    );
    app.layout = cli.layout.or(settings.layout).unwrap_or_default();
    app.policy = settings.invalid_dates.unwrap_or_default();
    app.config_dir = config_dir;

    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(Duration::from_secs(settings.tick_secs()));
    let result = event_loop(&mut terminal, &mut app, &mut events).await;
    tui::restore()?;
    result
}

async fn event_loop(
    terminal: &mut tui::Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    let mut last_height: Option<u16> = None;

    loop {
        terminal.draw(|frame| render(app, frame))?;

        // Track viewport height changes for paging
        let current_height = terminal.size()?.height;
        if last_height != Some(current_height) {
            last_height = Some(current_height);
            app.update(Message::UpdateViewportHeight(current_height));
        }

        if app.should_quit {
            return Ok(());
        }

        match events.next().await? {
            Event::Key(key) => {
                if let Some(msg) = keys::handle_key(key, app) {
                    app.update(msg);
                }
            }
            Event::Tick | Event::Resize => {}
        }
    }
}

fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    views::table::render(frame, app, area);
    views::help_overlay::render(frame, app, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TEST_NOW;

    fn args(output: Option<&str>) -> FormatArgs {
        FormatArgs {
            values: Vec::new(),
            input_format: None,
            output_format: output.map(str::to_string),
            tz: Some("utc".to_string()),
            report_invalid: false,
            now: Some(TEST_NOW),
            unit: None,
            decimals: None,
            json: false,
        }
    }

    fn now() -> DateTime<Utc> {
        fixed_clock(TEST_NOW).now()
    }

    #[test]
    fn numbers_and_text_from_arguments() {
        assert_eq!(parse_value("1700000000000"), RawValue::Number(1_700_000_000_000.0));
        assert_eq!(parse_value("2024-01-31"), RawValue::text("2024-01-31"));
        assert_eq!(parse_value("0x1A"), RawValue::text("0x1A"));
    }

    #[test]
    fn formats_relative_and_absolute() {
        let inputs = vec!["1699999955000".to_string(), "2023-11-01T00:00:00Z".to_string()];

        let relative = format_values(&inputs, &args(Some("relative")), FallbackPolicy::Fallback, now());
        assert_eq!(relative[0].text, "45s ago");
        assert_eq!(relative[0].state, "relative");
        assert_eq!(relative[0].tags, vec![StyleTag::Base, StyleTag::Relative]);

        let absolute = format_values(&inputs, &args(Some("YYYY-MM-DD")), FallbackPolicy::Fallback, now());
        assert_eq!(absolute[1].text, "2023-11-01");
        assert_eq!(absolute[1].state, "absolute");
    }

    #[test]
    fn report_policy_marks_garbage() {
        let inputs = vec!["nope".to_string()];

        let fallback = format_values(&inputs, &args(Some("YYYY")), FallbackPolicy::Fallback, now());
        assert_eq!(fallback[0].text, "nope");
        assert_eq!(fallback[0].state, "default");

        let report = format_values(&inputs, &args(Some("YYYY")), FallbackPolicy::Report, now());
        assert_eq!(report[0].text, "Invalid Date");
        assert_eq!(report[0].tags, vec![StyleTag::Base, StyleTag::Invalid]);
    }

    #[test]
    fn json_output_shape() {
        let inputs = vec!["1700000000000".to_string()];
        let formatted = format_values(&inputs, &args(Some("relative")), FallbackPolicy::Fallback, now());

        insta::assert_snapshot!(serde_json::to_string(&formatted).unwrap(), @r#"[{"value":1700000000000.0,"state":"relative","text":"in 0s","tags":["base","relative"]}]"#);
    }
}
