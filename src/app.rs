use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::cell::{FallbackPolicy, Field};
use crate::dataset::Dataset;
use crate::settings::{self, Settings};
use crate::theme::{ResolvedTheme, all_themes};
use crate::time::Clock;
use crate::views::cell::CellLayout;

/// How long a flash message stays in the status bar.
const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Rows moved by page up/down when the viewport height is unknown.
const DEFAULT_PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    PageDown,
    PageUp,
    ToggleLayout,
    NextTheme,
    Reload,
    ToggleHelp,
    Quit,
    UpdateViewportHeight(u16),
}

pub struct Flash {
    pub text: String,
    pub at: Instant,
}

pub struct App {
    pub dataset: Dataset,
    pub fields: Vec<Field>,
    pub source: Option<PathBuf>,
    pub selected_index: usize,
    pub should_quit: bool,
    pub help_overlay: bool,
    pub theme: ResolvedTheme,
    pub layout: CellLayout,
    pub policy: FallbackPolicy,
    pub clock: Arc<dyn Clock>,
    pub error: Option<String>,
    pub flash: Option<Flash>,
    pub viewport_height: Option<u16>,
    // Config directory for persisting settings
    pub config_dir: Option<PathBuf>,
}

impl App {
    pub fn new(
        dataset: Dataset,
        source: Option<PathBuf>,
        theme: ResolvedTheme,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let fields = dataset.fields.iter().map(|f| f.to_field()).collect();
        Self {
            dataset,
            fields,
            source,
            selected_index: 0,
            should_quit: false,
            help_overlay: false,
            theme,
            layout: CellLayout::default(),
            policy: FallbackPolicy::default(),
            clock,
            error: None,
            flash: None,
            viewport_height: None,
            config_dir: None,
        }
    }

    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::SelectNext => self.select_next(),
            Message::SelectPrev => self.select_prev(),
            Message::SelectFirst => self.selected_index = 0,
            Message::SelectLast => self.selected_index = self.row_count().saturating_sub(1),
            Message::PageDown => {
                let last = self.row_count().saturating_sub(1);
                self.selected_index = (self.selected_index + self.page_size()).min(last);
            }
            Message::PageUp => {
                self.selected_index = self.selected_index.saturating_sub(self.page_size());
            }
            Message::ToggleLayout => {
                self.layout = self.layout.toggle();
                self.set_flash(format!("Layout: {}", self.layout.label()));
            }
            Message::NextTheme => self.next_theme(),
            Message::Reload => self.reload(),
            Message::ToggleHelp => self.help_overlay = !self.help_overlay,
            Message::Quit => self.should_quit = true,
            Message::UpdateViewportHeight(height) => self.viewport_height = Some(height),
        }
    }

    pub fn row_count(&self) -> usize {
        self.dataset.rows.len()
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.row_count() {
            self.selected_index += 1;
        }
    }

    fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn page_size(&self) -> usize {
        // Title, header, borders and status bar
        const CHROME: u16 = 5;
        self.viewport_height
            .map(|h| h.saturating_sub(CHROME).max(1) as usize)
            .unwrap_or(DEFAULT_PAGE)
    }

    fn next_theme(&mut self) {
        let themes = all_themes();
        let current = themes.iter().position(|t| t.name == self.theme.name);
        let next = current.map(|i| (i + 1) % themes.len()).unwrap_or(0);
        let Some(theme) = themes.into_iter().nth(next) else {
            return;
        };
        let name = theme.name.clone();
        self.theme = theme.into();
        self.persist_theme(&name);
        self.set_flash(format!("Theme: {name}"));
    }

    fn persist_theme(&self, name: &str) {
        let Some(dir) = &self.config_dir else {
            return;
        };
        let path = settings::settings_path(dir);
        let mut settings = Settings::load(&path).unwrap_or_default();
        settings.theme = Some(name.to_string());
        if let Err(err) = settings.save(&path) {
            warn!(%err, "failed to save theme");
        }
    }

    fn reload(&mut self) {
        let Some(path) = self.source.clone() else {
            return;
        };
        match Dataset::load(&path) {
            Ok(dataset) => {
                info!(path = %path.display(), rows = dataset.rows.len(), "dataset reloaded");
                self.fields = dataset.fields.iter().map(|f| f.to_field()).collect();
                self.dataset = dataset;
                self.selected_index = self
                    .selected_index
                    .min(self.row_count().saturating_sub(1));
                self.error = None;
                self.set_flash("Reloaded");
            }
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "dataset reload failed");
                self.error = Some(format!("{err:#}"));
            }
        }
    }

    pub fn set_flash(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash {
            text: text.into(),
            at: Instant::now(),
        });
    }

    /// The flash message, while it is still fresh.
    pub fn flash_text(&self) -> Option<&str> {
        self.flash
            .as_ref()
            .filter(|f| f.at.elapsed() < FLASH_DURATION)
            .map(|f| f.text.as_str())
    }
}
