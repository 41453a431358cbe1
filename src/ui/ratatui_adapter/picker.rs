//! Ratatui-based repository picker
//!
//! Implements the `RepoPicker` trait. The terminal is always restored before
//! `pick` returns, whether the session settled, aborted or failed.

use super::events::{EventResult, poll_and_handle};
use super::theme::Theme;
use super::widgets::{HelpBar, ResultList, SearchBar, StatusBar};
use crate::credential::CredentialSources;
use crate::fetch::Fetcher;
use crate::session::{Session, SessionOutcome};
use crate::ui::error::{Result, UiError};
use crate::ui::traits::RepoPicker;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

/// Ratatui-based repository picker
#[derive(Debug, Clone)]
pub struct RatatuiPicker {
    /// How long to wait for input before redrawing
    poll_interval: Duration,
    theme: Theme,
}

impl RatatuiPicker {
    /// Create a new picker
    #[must_use]
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            theme: Theme::default(),
        }
    }

    /// Setup terminal for TUI
    ///
    /// Anything already switched on is switched back off if a later step fails.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(UiError::SetupError)?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = Self::cleanup_terminal();
            return Err(UiError::SetupError(e));
        }

        Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
            let _ = Self::cleanup_terminal();
            UiError::SetupError(e)
        })
    }

    /// Cleanup terminal after TUI
    ///
    /// Every step is attempted even when an earlier one fails.
    fn cleanup_terminal() -> Result<()> {
        let steps: [CleanupStep; 3] = [
            disable_raw_mode,
            || execute!(io::stdout(), LeaveAlternateScreen),
            || execute!(io::stdout(), DisableMouseCapture),
        ];
        run_all(steps)?;
        Ok(())
    }

    /// Draw one frame of the session
    pub(crate) fn render(frame: &mut Frame, session: &mut Session, theme: &Theme) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(3),    // Results
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        // Borders take two rows
        session.state.visible_height = layout[1].height.saturating_sub(2) as usize;
        let len = session.visible().len();
        session.state.clamp_cursor(len);

        let loading = session.is_loading();
        let messages = session.messages();
        let state = &session.state;

        let search_bar =
            SearchBar::new(&state.query, state.query_cursor, &state.prompt, theme).loading(loading);
        frame.render_widget(search_bar, layout[0]);

        let results = ResultList::new(session.visible(), state, theme).loading(loading);
        frame.render_widget(results, layout[1]);

        frame.render_widget(StatusBar::new(&messages, theme), layout[2]);
        frame.render_widget(HelpBar::new(&state.hints, theme), layout[3]);
    }

    /// Run until the session selects or aborts
    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        session: &mut Session,
    ) -> crate::Result<()> {
        loop {
            session.pump(Duration::ZERO)?;

            terminal
                .draw(|frame| Self::render(frame, session, &self.theme))
                .map_err(UiError::from)?;

            let len = session.visible().len();
            let result = poll_and_handle(&mut session.state, len, self.poll_interval)
                .map_err(UiError::from)?;

            match result {
                EventResult::QueryChanged => session.query_changed(),
                EventResult::Select => {
                    if session.select_highlighted() {
                        return Ok(());
                    }
                }
                EventResult::Abort => {
                    session.abort();
                    return Ok(());
                }
                EventResult::Continue | EventResult::Ignored => {}
            }
        }
    }
}

/// One terminal restore step
type CleanupStep = fn() -> io::Result<()>;

/// Run every step, returning the first failure
fn run_all<const N: usize>(steps: [CleanupStep; N]) -> io::Result<()> {
    let mut first = Ok(());
    for step in steps {
        if let Err(e) = step() {
            if first.is_ok() {
                first = Err(e);
            }
        }
    }
    first
}

impl Default for RatatuiPicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

impl RepoPicker for RatatuiPicker {
    fn pick(
        &self,
        fetcher: Arc<Fetcher>,
        sources: &CredentialSources,
        initial_query: Option<&str>,
    ) -> crate::Result<SessionOutcome> {
        let mut session = Session::new(fetcher, initial_query);
        session.state.hints = HelpBar::default_hints();

        let mut terminal = Self::setup_terminal()?;
        session.start(sources);

        let result = self.run_loop(&mut terminal, &mut session);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            tracing::warn!(error = %e, "terminal cleanup failed");
        }

        result?;
        Ok(session.into_outcome())
    }
}
