//! Date/time cell rendering: state to styled text.

use chrono::{DateTime, Utc};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use serde::{Deserialize, Serialize};

use crate::cell::{CellState, FallbackPolicy, Field, RawValue, format_cell};
use crate::dataset::ColumnConfig;
use crate::theme::ResolvedTheme;

/// Presentation classes derived from a cell's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    Base,
    Relative,
    Invalid,
}

/// Base is always present; relative and invalid states add their own tag.
pub fn select_styles(state: &CellState) -> Vec<StyleTag> {
    match state {
        CellState::Relative(_) => vec![StyleTag::Base, StyleTag::Relative],
        CellState::Invalid => vec![StyleTag::Base, StyleTag::Invalid],
        CellState::Default(_) | CellState::Absolute(_) => vec![StyleTag::Base],
    }
}

/// How a cell is laid out.
///
/// `Inline` is the bare text with contrast coloring only. `Block` wraps the
/// text in a container that also carries the relative/invalid styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellLayout {
    Inline,
    #[default]
    Block,
}

impl CellLayout {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Inline => Self::Block,
            Self::Block => Self::Inline,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Block => "block",
        }
    }
}

impl std::str::FromStr for CellLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "block" => Ok(Self::Block),
            _ => Err(format!("Invalid layout: {s}. Use 'inline' or 'block'")),
        }
    }
}

/// Everything a cell render needs besides the cell itself.
pub struct CellContext<'a> {
    pub theme: &'a ResolvedTheme,
    pub layout: CellLayout,
    /// Used when the column does not set its own policy
    pub policy: FallbackPolicy,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RenderedCell {
    pub state: CellState,
    pub tags: Vec<StyleTag>,
    pub line: Line<'static>,
    /// Style for whatever holds the line (a table cell, a paragraph)
    pub container_style: Style,
}

impl RenderedCell {
    pub fn width(&self) -> usize {
        self.line.width()
    }
}

pub fn render_cell(
    value: &RawValue,
    field: &Field,
    column: &ColumnConfig,
    background: Option<Color>,
    ctx: &CellContext<'_>,
) -> RenderedCell {
    let policy = column.invalid_dates.unwrap_or(ctx.policy);
    let state = format_cell(value, field, column.date_time_format(), policy, ctx.now);
    let tags = select_styles(&state);

    let text_style = match background {
        Some(bg) => Style::default().fg(ctx.theme.contrast_text(bg)),
        None => Style::default().bg(ctx.theme.background),
    };
    let line = Line::from(Span::styled(state.text(), text_style));

    let mut container_style = match background {
        Some(bg) => Style::default().bg(bg),
        None => Style::default().bg(ctx.theme.background),
    };
    if ctx.layout == CellLayout::Block {
        for tag in &tags {
            container_style = container_style.patch(tag_style(*tag, ctx.theme));
        }
    }

    RenderedCell {
        state,
        tags,
        line,
        container_style,
    }
}

fn tag_style(tag: StyleTag, theme: &ResolvedTheme) -> Style {
    match tag {
        StyleTag::Base => Style::default(),
        StyleTag::Relative => theme.relative_style(),
        StyleTag::Invalid => theme.invalid_style(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{DateTimeCellConfig, DateTimeFormat, DisplayValue, StandardDisplay};
    use crate::theme::{ThemeVariant, default_for_variant};
    use chrono::TimeZone;
    use ratatui::style::Modifier;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn field() -> Field {
        Field::new("ts").with_display(StandardDisplay::default())
    }

    fn column(output: &str) -> ColumnConfig {
        ColumnConfig {
            date_time_cell: Some(DateTimeCellConfig {
                format: Some(DateTimeFormat {
                    output_format: Some(output.to_string()),
                    output_time_zone: Some("utc".to_string()),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        }
    }

    fn render(
        value: RawValue,
        column: &ColumnConfig,
        background: Option<Color>,
        layout: CellLayout,
    ) -> RenderedCell {
        let theme = default_for_variant(ThemeVariant::Dark);
        let ctx = CellContext {
            theme: &theme,
            layout,
            policy: FallbackPolicy::Fallback,
            now: now(),
        };
        render_cell(&value, &field(), column, background, &ctx)
    }

    #[test]
    fn style_tags_follow_state() {
        assert_eq!(
            select_styles(&CellState::Default(DisplayValue::text("x"))),
            vec![StyleTag::Base]
        );
        assert_eq!(
            select_styles(&CellState::Absolute("2023".into())),
            vec![StyleTag::Base]
        );
        assert_eq!(
            select_styles(&CellState::Relative("in 0s".into())),
            vec![StyleTag::Base, StyleTag::Relative]
        );
        assert_eq!(
            select_styles(&CellState::Invalid),
            vec![StyleTag::Base, StyleTag::Invalid]
        );
    }

    #[test]
    fn block_layout_styles_relative_container() {
        let cell = render(
            RawValue::Number(1_700_000_000_000.0 - 45_000.0),
            &column("relative"),
            None,
            CellLayout::Block,
        );
        let theme = default_for_variant(ThemeVariant::Dark);

        assert_eq!(cell.line.to_string(), "45s ago");
        assert!(cell.container_style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(cell.container_style.fg, Some(theme.relative_time));
        assert_eq!(cell.container_style.bg, Some(theme.background));
    }

    #[test]
    fn inline_layout_skips_tag_styles() {
        let cell = render(
            RawValue::Number(1_700_000_000_000.0),
            &column("relative"),
            None,
            CellLayout::Inline,
        );

        assert_eq!(cell.tags, vec![StyleTag::Base, StyleTag::Relative]);
        assert!(!cell.container_style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn background_sets_contrast_text() {
        let cell = render(
            RawValue::Number(1_700_000_000_000.0),
            &column("YYYY-MM-DD"),
            Some(Color::White),
            CellLayout::Block,
        );

        assert_eq!(cell.line.to_string(), "2023-11-14");
        assert_eq!(cell.line.spans[0].style.fg, Some(Color::Black));
        assert_eq!(cell.container_style.bg, Some(Color::White));
    }

    #[test]
    fn without_background_text_sits_on_theme_background() {
        let theme = default_for_variant(ThemeVariant::Dark);
        let cell = render(RawValue::text("hello"), &ColumnConfig::default(), None, CellLayout::Inline);

        assert_eq!(cell.line.spans[0].style.bg, Some(theme.background));
        assert_eq!(cell.line.spans[0].style.fg, None);
    }

    #[test]
    fn column_policy_overrides_context() {
        let mut col = column("YYYY");
        col.date_time_cell = Some(DateTimeCellConfig {
            format: Some(DateTimeFormat {
                input_format: Some("YYYY-MM-DD".to_string()),
                output_format: Some("YYYY".to_string()),
                output_time_zone: None,
            }),
        });
        col.invalid_dates = Some(FallbackPolicy::Report);

        let cell = render(RawValue::text("garbage"), &col, None, CellLayout::Block);
        let theme = default_for_variant(ThemeVariant::Dark);

        assert_eq!(cell.state, CellState::Invalid);
        assert_eq!(cell.line.to_string(), "Invalid Date");
        assert_eq!(cell.container_style.fg, Some(theme.error));
    }

    #[test]
    fn layout_parses_and_toggles() {
        assert_eq!("INLINE".parse::<CellLayout>(), Ok(CellLayout::Inline));
        assert!("grid".parse::<CellLayout>().is_err());
        assert_eq!(CellLayout::Block.toggle(), CellLayout::Inline);
    }
}
