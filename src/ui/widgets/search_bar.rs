//! Search bar widget for query input

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget that displays the query with a trailing cursor
pub struct SearchBar<'a> {
    query: &'a str,
    prompt: &'a str,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, theme: &'a Theme) -> Self {
        Self {
            query,
            prompt: ">",
            theme,
        }
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Search ");

        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled(self.prompt, self.theme.dimmed_style()),
            Span::raw(" "),
            Span::raw(self.query),
            Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
