//! View state for the ratatui TUI
//!
//! Holds the query being edited and the list cursor. The result list itself
//! belongs to the query cache, so navigation takes its current length.

use super::widgets::KeyHint;

/// Query and cursor state of the picker
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current search query
    pub query: String,
    /// Cursor position within the query string (byte offset)
    pub query_cursor: usize,
    /// Current cursor position in the result list
    pub cursor: usize,
    /// Scroll offset for the result list
    pub scroll_offset: usize,
    /// Height of the visible list area (set during render)
    pub visible_height: usize,
    /// Prompt shown before the query
    pub prompt: String,
    /// Hints shown in the help bar
    pub hints: Vec<KeyHint>,
}

impl AppState {
    /// Create state seeded with an initial query
    #[must_use]
    pub fn new(initial_query: &str) -> Self {
        Self {
            query: initial_query.to_string(),
            query_cursor: initial_query.len(),
            cursor: 0,
            scroll_offset: 0,
            visible_height: 8, // Default, updated during render
            prompt: ">".to_string(),
            hints: Vec::new(),
        }
    }

    /// Move cursor up
    pub const fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor down within a list of `len` items
    pub const fn cursor_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor up by one page
    pub const fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible_height);
        self.adjust_scroll();
    }

    /// Move cursor down by one page
    pub fn page_down(&mut self, len: usize) {
        let max_cursor = len.saturating_sub(1);
        self.cursor = (self.cursor + self.visible_height).min(max_cursor);
        self.adjust_scroll();
    }

    /// Jump to first item
    pub const fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    /// Jump to last item
    pub const fn jump_to_end(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
        self.adjust_scroll();
    }

    /// Pull the cursor back inside a list of `len` items
    pub fn clamp_cursor(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        self.adjust_scroll();
    }

    /// Move the cursor to the top after the list changed
    pub const fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Adjust scroll offset to keep cursor visible
    const fn adjust_scroll(&mut self) {
        if self.visible_height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.visible_height {
            self.scroll_offset = self.cursor.saturating_sub(self.visible_height - 1);
        }
    }

    /// Add a character to the query
    pub fn query_push(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
    }

    /// Remove a character from the query (backspace)
    pub fn query_backspace(&mut self) {
        if self.query_cursor > 0 {
            let prev_char_boundary = self.query[..self.query_cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
            self.query.remove(prev_char_boundary);
            self.query_cursor = prev_char_boundary;
        }
    }

    /// Delete character under cursor
    pub fn query_delete(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query.remove(self.query_cursor);
        }
    }

    /// Delete the word before the cursor
    pub fn query_delete_word(&mut self) {
        let trimmed = self.query[..self.query_cursor].trim_end();
        if let Some(last_space) = trimmed.rfind(' ') {
            self.query.drain(last_space + 1..self.query_cursor);
            self.query_cursor = last_space + 1;
        } else {
            self.query.drain(..self.query_cursor);
            self.query_cursor = 0;
        }
    }

    /// Move query cursor left
    pub fn query_cursor_left(&mut self) {
        if self.query_cursor > 0 {
            self.query_cursor = self.query[..self.query_cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
        }
    }

    /// Move query cursor right
    pub fn query_cursor_right(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query_cursor = self.query[self.query_cursor..]
                .char_indices()
                .nth(1)
                .map_or(self.query.len(), |(i, _)| self.query_cursor + i);
        }
    }

    /// Clear the query
    pub fn query_clear(&mut self) {
        self.query.clear();
        self.query_cursor = 0;
    }
}
