//! Test data builders for view testing.

use std::path::PathBuf;
use std::sync::Arc;

use crate::app::App;
use crate::cell::FallbackPolicy;
use crate::dataset::Dataset;
use crate::theme::{ResolvedTheme, ThemeVariant, default_for_variant};
use crate::time::{Clock, fixed_clock};
use crate::views::cell::CellLayout;

/// Fixed timestamp for deterministic tests: 2023-11-14 22:13:20 UTC, in milliseconds.
pub const TEST_NOW: i64 = 1_700_000_000_000;

/// A small table covering every cell state.
///
/// Relative cells sit at fixed offsets from [`TEST_NOW`] so they render as
/// "5m ago", "in 2h" and so on.
pub fn sample_dataset() -> Dataset {
    Dataset::parse(
        r##"{
            "title": "Deployments",
            "fields": [
                { "name": "service" },
                {
                    "name": "deployed",
                    "column": {
                        "label": "Deployed",
                        "date_time_cell": { "format": { "output_format": "relative" } }
                    }
                },
                {
                    "name": "built",
                    "column": {
                        "label": "Built",
                        "date_time_cell": {
                            "format": { "output_format": "YYYY-MM-DD HH:mm", "output_time_zone": "utc" }
                        }
                    }
                },
                {
                    "name": "expires",
                    "column": {
                        "label": "Expires",
                        "date_time_cell": {
                            "format": { "input_format": "YYYY-MM-DD", "output_format": "MMM D, YYYY", "output_time_zone": "utc" }
                        },
                        "invalid_dates": "report"
                    }
                },
                {
                    "name": "owner",
                    "column": { "label": "Owner", "background": "#FFFFFF" }
                },
                { "name": "load", "unit": "%", "decimals": 1 }
            ],
            "rows": [
                ["api", 1699999700000, 1699990000000, "2024-01-31", "ops", 41.25],
                ["worker", 1700007200000, 1699000000000, "2024-02-29", "data", 7],
                ["web", 1699913600000, "2023-11-01T08:30:00Z", "soon", "web", 88.5],
                ["cron", 1700000000000, "not a date", "2023-12-25", "ops", 0],
                ["queue", "1699996400000", 1690000000000, "2025-06-01", "infra", 12.75],
                ["search", 1697408000000, 1680000000000, "2024-07-04", "data", 99]
            ]
        }"##,
    )
    .expect("sample dataset is valid")
}

pub struct TestAppBuilder {
    dataset: Dataset,
    source: Option<PathBuf>,
    selected_index: usize,
    error: Option<String>,
    show_help: bool,
    theme: ResolvedTheme,
    layout: CellLayout,
    policy: FallbackPolicy,
    clock: Arc<dyn Clock>,
    viewport_height: Option<u16>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            dataset: sample_dataset(),
            source: None,
            selected_index: 0,
            error: None,
            show_help: false,
            theme: default_for_variant(ThemeVariant::Dark),
            layout: CellLayout::default(),
            policy: FallbackPolicy::default(),
            clock: fixed_clock(TEST_NOW),
            viewport_height: None,
        }
    }

    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn source(mut self, path: PathBuf) -> Self {
        self.source = Some(path);
        self
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn error(mut self, msg: &str) -> Self {
        self.error = Some(msg.to_string());
        self
    }

    pub fn help_overlay(mut self) -> Self {
        self.show_help = true;
        self
    }

    pub fn theme(mut self, theme: ResolvedTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn layout(mut self, layout: CellLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Freeze the app clock at `epoch_ms` instead of [`TEST_NOW`].
    pub fn clock_at(mut self, epoch_ms: i64) -> Self {
        self.clock = fixed_clock(epoch_ms);
        self
    }

    pub fn viewport_height(mut self, height: u16) -> Self {
        self.viewport_height = Some(height);
        self
    }

    pub fn build(self) -> App {
        let mut app = App::new(self.dataset, self.source, self.theme, self.clock);
        app.selected_index = self.selected_index;
        app.error = self.error;
        app.help_overlay = self.show_help;
        app.layout = self.layout;
        app.policy = self.policy;
        app.viewport_height = self.viewport_height;
        app
    }
}
