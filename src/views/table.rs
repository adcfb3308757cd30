//! The dataset table: one row per record, date columns formatted per cell.

use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::help::{format_items, status_items};
use crate::keys::{global_keymap, table_keymap};
use crate::views::cell::{CellContext, RenderedCell, render_cell};
use crate::views::common::render_error;
use crate::views::status_bar::StatusBar;

const DEFAULT_TITLE: &str = "datecell";

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Min(0),    // Table
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    // Cells are formatted against a fresh "now" on every draw
    let now = app.clock.now();

    render_title(frame, app, now, chunks[0]);
    match &app.error {
        Some(err) => render_error(frame, err, &app.theme, chunks[1]),
        None => render_table(frame, app, now, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);
}

fn render_title(frame: &mut Frame, app: &App, now: DateTime<Utc>, area: Rect) {
    let theme = &app.theme;
    let title = app.dataset.title.as_deref().unwrap_or(DEFAULT_TITLE);
    let title_line = Line::from(Span::styled(
        title.to_string(),
        theme.header_style().add_modifier(Modifier::BOLD),
    ));

    let clock = Span::styled(now.format("%Y-%m-%d %H:%M:%S UTC").to_string(), theme.dim_style());
    let clock_width = clock.width() as u16;
    let chunks =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(clock_width)]).split(area);
    frame.render_widget(Paragraph::new(title_line), chunks[0]);
    frame.render_widget(Paragraph::new(Line::from(clock)), chunks[1]);
}

/// Format every cell of the dataset. Missing values in short rows are `None`.
pub fn render_rows(app: &App, now: DateTime<Utc>) -> Vec<Vec<Option<RenderedCell>>> {
    let ctx = CellContext {
        theme: &app.theme,
        layout: app.layout,
        policy: app.policy,
        now,
    };
    let backgrounds: Vec<_> = app
        .dataset
        .fields
        .iter()
        .map(|spec| spec.column.background.as_ref().map(|c| c.to_color()))
        .collect();

    (0..app.row_count())
        .map(|row| {
            app.dataset
                .fields
                .iter()
                .zip(&app.fields)
                .enumerate()
                .map(|(idx, (spec, field))| {
                    let value = app.dataset.value(row, idx)?;
                    Some(render_cell(value, field, &spec.column, backgrounds[idx], &ctx))
                })
                .collect()
        })
        .collect()
}

/// Fixed widths win; otherwise a column is as wide as its widest cell or label.
fn column_widths(app: &App, rows: &[Vec<Option<RenderedCell>>]) -> Vec<Constraint> {
    app.dataset
        .fields
        .iter()
        .enumerate()
        .map(|(idx, spec)| {
            if let Some(width) = spec.column.width {
                return Constraint::Length(width);
            }
            let content = rows
                .iter()
                .filter_map(|row| row.get(idx)?.as_ref())
                .map(RenderedCell::width)
                .max()
                .unwrap_or(0);
            let width = content.max(spec.label().width());
            Constraint::Length(u16::try_from(width).unwrap_or(u16::MAX))
        })
        .collect()
}

fn render_table(frame: &mut Frame, app: &App, now: DateTime<Utc>, area: Rect) {
    let theme = &app.theme;
    let rows = render_rows(app, now);
    let widths = column_widths(app, &rows);

    let header = Row::new(
        app.dataset
            .fields
            .iter()
            .map(|spec| Cell::from(spec.label().to_string())),
    )
    .style(theme.header_style());

    let body: Vec<Row> = rows
        .into_iter()
        .map(|cells| {
            Row::new(cells.into_iter().map(|cell| match cell {
                Some(cell) => Cell::from(cell.line).style(cell.container_style),
                None => Cell::from(""),
            }))
        })
        .collect();

    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(2)
        .row_highlight_style(theme.selection_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        );

    let selected = (app.row_count() > 0).then_some(app.selected_index);
    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let label = app
        .source
        .as_ref()
        .and_then(|p| p.file_name())
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_TITLE);
    let keymap = global_keymap().extend(table_keymap());
    let help = format_items(&status_items(), &keymap);

    let mut bar = StatusBar::new(&app.theme)
        .label(label)
        .flash(app.flash_text())
        .help(&help);
    if app.row_count() > 0 {
        bar = bar.position(app.selected_index + 1, app.row_count());
    }
    bar.render(frame, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Message;
    use crate::cell::{CellState, FallbackPolicy};
    use crate::dataset::Dataset;
    use crate::test_utils::{TEST_NOW, TestAppBuilder};
    use crate::theme::{ThemeVariant, default_for_variant};
    use crate::time::fixed_clock;
    use crate::views::cell::{CellLayout, StyleTag};
    use crate::views::tests::render_to_string;

    fn now() -> DateTime<Utc> {
        fixed_clock(TEST_NOW).now()
    }

    fn texts(app: &App) -> Vec<Vec<String>> {
        render_rows(app, app.clock.now())
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.map(|c| c.state.text()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn rows_cover_every_cell_state() {
        let app = TestAppBuilder::new().build();
        let rows = texts(&app);

        assert_eq!(rows[0][1], "5m ago");
        assert_eq!(rows[1][1], "in 2h");
        assert_eq!(rows[2][1], "1d ago");
        assert_eq!(rows[3][1], "in 0s");
        assert_eq!(rows[4][1], "1h ago");
        assert_eq!(rows[5][1], "30d ago");

        assert_eq!(rows[0][2], "2023-11-14 19:26");
        assert_eq!(rows[2][2], "2023-11-01 08:30");
        // Unparseable with the default policy shows the raw value
        assert_eq!(rows[3][2], "not a date");

        assert_eq!(rows[0][3], "Jan 31, 2024");
        assert_eq!(rows[2][3], "Invalid Date");
    }

    #[test]
    fn report_column_marks_invalid() {
        let app = TestAppBuilder::new().build();
        let rows = render_rows(&app, now());
        let cell = rows[2][3].as_ref().unwrap();

        assert_eq!(cell.state, CellState::Invalid);
        assert_eq!(cell.tags, vec![StyleTag::Base, StyleTag::Invalid]);
    }

    #[test]
    fn short_rows_render_blank() {
        let dataset =
            Dataset::parse(r#"{"fields":[{"name":"a"},{"name":"b"}],"rows":[["x"]]}"#).unwrap();
        let app = TestAppBuilder::new().dataset(dataset).build();
        let rows = render_rows(&app, now());

        assert!(rows[0][0].is_some());
        assert!(rows[0][1].is_none());
    }

    #[test]
    fn fixed_width_overrides_content() {
        let dataset = Dataset::parse(
            r#"{"fields":[{"name":"a","column":{"width":3}},{"name":"long label"}],"rows":[["abcdef","x"]]}"#,
        )
        .unwrap();
        let app = TestAppBuilder::new().dataset(dataset).build();
        let rows = render_rows(&app, now());

        assert_eq!(
            column_widths(&app, &rows),
            vec![Constraint::Length(3), Constraint::Length(10)]
        );
    }

    #[test]
    fn table_view_renders() {
        let app = TestAppBuilder::new().build();
        let output = render_to_string(100, 12, |frame| {
            render(frame, &app, frame.area());
        });

        assert!(output.starts_with("Deployments"));
        assert!(output.contains("2023-11-14 22:13:20 UTC"));
        assert!(output.contains("Deployed"));
        assert!(output.contains("5m ago"));
        assert!(output.contains("Jan 31, 2024"));
        assert!(output.contains("1/6"));
        assert!(output.contains("j/k:nav"));
    }

    #[test]
    fn table_follows_clock() {
        let app = TestAppBuilder::new()
            .clock_at(TEST_NOW + 60 * 60 * 1000)
            .build();
        let output = render_to_string(100, 12, |frame| {
            render(frame, &app, frame.area());
        });

        assert!(output.contains("2023-11-14 23:13:20 UTC"));
        assert!(output.contains("1h ago"));
        assert!(output.contains("in 1h"));
        assert!(!output.contains("5m ago"));
        assert!(!output.contains("in 2h"));

        let rows = texts(&app);
        assert_eq!(rows[0][1], "1h ago");
        assert_eq!(rows[1][1], "in 1h");
    }

    #[test]
    fn app_policy_applies_to_columns_without_their_own() {
        let app = TestAppBuilder::new().policy(FallbackPolicy::Report).build();
        let rows = texts(&app);

        // "Built" has no column policy, so the app-wide one decides
        assert_eq!(rows[3][2], "Invalid Date");
        assert_eq!(rows[0][2], "2023-11-14 19:26");
    }

    #[test]
    fn cells_without_background_use_theme_background() {
        let light = default_for_variant(ThemeVariant::Light);
        let app = TestAppBuilder::new().theme(light.clone()).build();
        let rows = render_rows(&app, app.clock.now());

        let plain = rows[0][1].as_ref().unwrap();
        assert_eq!(plain.container_style.bg, Some(light.background));
        let owner = rows[0][4].as_ref().unwrap();
        assert_eq!(owner.container_style.bg, Some(ratatui::style::Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn error_replaces_table() {
        let app = TestAppBuilder::new().error("Failed to parse dataset").build();
        let output = render_to_string(60, 8, |frame| {
            render(frame, &app, frame.area());
        });

        assert!(output.contains("Error"));
        assert!(output.contains("Failed to parse dataset"));
        assert!(!output.contains("Deployed"));
    }

    #[test]
    fn flash_appears_after_layout_toggle() {
        let mut app = TestAppBuilder::new().layout(CellLayout::Block).build();
        app.update(Message::ToggleLayout);
        let output = render_to_string(100, 12, |frame| {
            render(frame, &app, frame.area());
        });

        assert!(output.contains("Layout: inline"));
    }
}
