//! Status bar widget for displaying messages

use crate::ui::output::MessageLevel;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar widget that displays the most recent message
pub struct StatusBar<'a> {
    messages: &'a [(MessageLevel, String)],
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget
    #[must_use]
    pub const fn new(messages: &'a [(MessageLevel, String)], theme: &'a Theme) -> Self {
        Self { messages, theme }
    }

    fn style_for_level(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Warning => self.theme.warning_style(),
            MessageLevel::Info => self.theme.info_style(),
            MessageLevel::Normal => self.theme.normal_style(),
        }
    }

    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
            MessageLevel::Normal => "",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        if let Some((level, text)) = self.messages.last() {
            let style = self.style_for_level(*level);
            let line = Line::from(vec![
                Span::styled(Self::prefix_for_level(*level), style),
                Span::styled(text.as_str(), style),
            ]);
            Paragraph::new(line).render(inner, buf);
        }
    }
}
