use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::theme::ResolvedTheme;

/// Render an error message in a bordered block.
pub fn render_error(frame: &mut Frame, error: &str, theme: &ResolvedTheme, area: Rect) {
    let widget = Paragraph::new(error)
        .style(theme.error_style())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title("Error"),
        );
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ThemeVariant, default_for_variant};
    use crate::views::tests::render_to_string;

    #[test]
    fn error_is_boxed_and_titled() {
        let theme = default_for_variant(ThemeVariant::Dark);
        let output = render_to_string(30, 3, |frame| {
            render_error(frame, "bad file", &theme, frame.area());
        });

        insta::assert_snapshot!(output, @r"
        ┌Error───────────────────────┐
        │bad file                    │
        └────────────────────────────┘
        ");
    }
}
