//! Search bar widget for query input

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget that displays the query with cursor
pub struct SearchBar<'a> {
    query: &'a str,
    /// Byte offset of the cursor in the query
    cursor: usize,
    prompt: &'a str,
    theme: &'a Theme,
    /// Whether results for the query are still loading
    loading: bool,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, cursor: usize, prompt: &'a str, theme: &'a Theme) -> Self {
        Self {
            query,
            cursor,
            prompt,
            theme,
            loading: false,
        }
    }

    /// Show a loading marker in the title
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.loading {
            " Search GitHub (loading…) "
        } else {
            " Search GitHub "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let caret = Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK));
        let (before, after) = self
            .query
            .split_at_checked(self.cursor)
            .unwrap_or((self.query, ""));

        let line = Line::from(vec![
            Span::styled(self.prompt, self.theme.dimmed_style()),
            Span::raw(" "),
            Span::raw(before),
            caret,
            Span::raw(after),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
