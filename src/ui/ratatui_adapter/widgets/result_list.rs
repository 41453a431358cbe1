//! Result list widget
//!
//! Each row reads `<label padded to the shared width> | <description>`, so
//! descriptions line up in one column.

use crate::fetch::ResultEntry;
use crate::ui::ratatui_adapter::state::AppState;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Separator between the label and description columns
pub const COLUMN_SEPARATOR: &str = " | ";

/// Result list widget
pub struct ResultList<'a> {
    entries: &'a [ResultEntry],
    state: &'a AppState,
    theme: &'a Theme,
    loading: bool,
}

impl<'a> ResultList<'a> {
    /// Create a new result list widget
    #[must_use]
    pub const fn new(entries: &'a [ResultEntry], state: &'a AppState, theme: &'a Theme) -> Self {
        Self {
            entries,
            state,
            theme,
            loading: false,
        }
    }

    /// Whether results are still loading
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn render_entry(&self, entry: &'a ResultEntry, is_cursor: bool) -> ListItem<'a> {
        let cursor_char = if is_cursor { ">" } else { " " };
        let width = entry.max_label_width;

        let label_style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.label_style()
        };

        let line = Line::from(vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(format!("{:<width$}", entry.label), label_style),
            Span::styled(COLUMN_SEPARATOR, self.theme.dimmed_style()),
            Span::raw(entry.display_description()),
        ]);

        if is_cursor {
            ListItem::new(line).style(self.theme.selected_style())
        } else {
            ListItem::new(line)
        }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Repositories ({}) ", self.entries.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.entries.is_empty() {
            let text = if self.loading { "Loading…" } else { "No repositories found" };
            Paragraph::new(Line::styled(text, self.theme.dimmed_style())).render(inner, buf);
            return;
        }

        let start = self.state.scroll_offset.min(self.entries.len());
        let end = (start + inner.height as usize).min(self.entries.len());

        let items: Vec<ListItem> = self.entries[start..end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| self.render_entry(entry, start + offset == self.state.cursor))
            .collect();

        List::new(items).render(inner, buf);
    }
}
