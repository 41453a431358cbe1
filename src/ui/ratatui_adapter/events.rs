//! Event handling for the ratatui TUI
//!
//! Maps keyboard and mouse events onto query edits and list navigation.

use super::state::AppState;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Choose the highlighted entry
    Select,
    /// Leave without choosing
    Abort,
    /// Query changed, needs a new dispatch
    QueryChanged,
    /// No action taken
    Ignored,
}

/// Handle a key press against a result list of `len` entries
pub fn handle_key(state: &mut AppState, key: KeyEvent, len: usize) -> EventResult {
    match (key.code, key.modifiers) {
        // Exit
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Abort,
        (KeyCode::Enter, _) => EventResult::Select,

        // Navigation
        (KeyCode::Up, _) | (KeyCode::Char('k' | 'p'), KeyModifiers::CONTROL) => {
            state.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) | (KeyCode::Char('j' | 'n'), KeyModifiers::CONTROL) => {
            state.cursor_down(len);
            EventResult::Continue
        }
        (KeyCode::PageUp, _) => {
            state.page_up();
            EventResult::Continue
        }
        (KeyCode::PageDown, _) => {
            state.page_down(len);
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            state.jump_to_start();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            state.jump_to_end(len);
            EventResult::Continue
        }

        // Query editing
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c);
            EventResult::QueryChanged
        }
        (KeyCode::Backspace, _) => {
            if state.query_cursor == 0 {
                EventResult::Ignored
            } else {
                state.query_backspace();
                EventResult::QueryChanged
            }
        }
        (KeyCode::Delete, _) => {
            if state.query_cursor >= state.query.len() {
                EventResult::Ignored
            } else {
                state.query_delete();
                EventResult::QueryChanged
            }
        }
        (KeyCode::Left, _) => {
            state.query_cursor_left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            state.query_cursor_right();
            EventResult::Continue
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            if state.query.is_empty() {
                EventResult::Ignored
            } else {
                state.query_clear();
                EventResult::QueryChanged
            }
        }
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
            if state.query_cursor == 0 {
                EventResult::Ignored
            } else {
                state.query_delete_word();
                EventResult::QueryChanged
            }
        }

        _ => EventResult::Ignored,
    }
}

/// Handle mouse events
fn handle_mouse(state: &mut AppState, mouse: MouseEvent, len: usize) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.cursor_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            state.cursor_down(len);
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(
    state: &mut AppState,
    len: usize,
    timeout: Duration,
) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        // Windows reports releases too
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key, len),
        Event::Mouse(mouse) => handle_mouse(state, mouse, len),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}
