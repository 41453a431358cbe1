//! Mock repository picker for testing

use super::ratatui_adapter::{EventResult, handle_key};
use super::traits::RepoPicker;
use crate::credential::CredentialSources;
use crate::fetch::Fetcher;
use crate::session::{Session, SessionOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;

/// Picker that replays a fixed sequence of key presses
///
/// Drives a real [`Session`] without a terminal. After every query edit it
/// waits for the fetch to land, so scripts behave like a patient user.
#[derive(Debug, Clone)]
pub struct MockPicker {
    /// Keys to replay, in order
    pub keys: Vec<KeyEvent>,
    /// Longest wait for a single reply
    pub wait: Duration,
}

impl MockPicker {
    /// Create a mock picker replaying `keys`
    #[must_use]
    pub fn new(keys: Vec<KeyEvent>) -> Self {
        Self {
            keys,
            wait: Duration::from_secs(5),
        }
    }

    /// Type `text`, then apply `then`
    #[must_use]
    pub fn typing(text: &str, then: &[KeyCode]) -> Self {
        let keys = text
            .chars()
            .map(KeyCode::Char)
            .chain(then.iter().copied())
            .map(|code| KeyEvent::new(code, KeyModifiers::NONE))
            .collect();
        Self::new(keys)
    }

    fn settle_fetches(&self, session: &mut Session) -> crate::Result<()> {
        while session.is_loading() && session.pump(self.wait)? {}
        Ok(())
    }
}

impl RepoPicker for MockPicker {
    fn pick(
        &self,
        fetcher: Arc<Fetcher>,
        sources: &CredentialSources,
        initial_query: Option<&str>,
    ) -> crate::Result<SessionOutcome> {
        let mut session = Session::new(fetcher, initial_query);
        session.start(sources);
        self.settle_fetches(&mut session)?;

        for key in &self.keys {
            let len = session.visible().len();
            match handle_key(&mut session.state, *key, len) {
                EventResult::QueryChanged => {
                    session.query_changed();
                    self.settle_fetches(&mut session)?;
                }
                EventResult::Select => {
                    if session.select_highlighted() {
                        break;
                    }
                }
                EventResult::Abort => {
                    session.abort();
                    break;
                }
                EventResult::Continue | EventResult::Ignored => {}
            }
        }

        Ok(session.into_outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::CredentialCell;
    use crate::fetch::mock::{MockSource, search_body, trending_body};

    fn fetcher() -> Arc<Fetcher> {
        let source = MockSource::new()
            .with_trending(200, &trending_body(&[("hot/one", "", "main"), ("hot/two", "", "dev")]))
            .with_search("r", 200, &search_body(1, &[("x/r", "", "main")]))
            .with_search("ru", 200, &search_body(1, &[("x/ru", "", "main")]))
            .with_search("rus", 200, &search_body(1, &[("x/rus", "", "main")]))
            .with_search(
                "rust",
                200,
                &search_body(
                    2,
                    &[("a/rust-lang", "desc1", "main"), ("b/rustc", "desc2", "master")],
                ),
            );
        Arc::new(Fetcher::new(source, Arc::new(CredentialCell::new()), "https://github.com"))
    }

    #[test]
    fn test_mock_picker_types_and_selects() {
        let picker = MockPicker::typing("rust", &[KeyCode::Down, KeyCode::Enter]);
        let outcome = picker.pick(fetcher(), &CredentialSources::none(), None).unwrap();

        assert_eq!(
            outcome,
            SessionOutcome::Settled("https://github.com/b/rustc.git#master".to_string())
        );
    }

    #[test]
    fn test_mock_picker_selects_trending() {
        let picker = MockPicker::typing("", &[KeyCode::Down, KeyCode::Enter]);
        let outcome = picker.pick(fetcher(), &CredentialSources::none(), None).unwrap();

        assert_eq!(
            outcome,
            SessionOutcome::Settled("https://github.com/hot/two.git#dev".to_string())
        );
    }

    #[test]
    fn test_mock_picker_aborted() {
        let picker = MockPicker::typing("ru", &[KeyCode::Esc]);
        let outcome = picker.pick(fetcher(), &CredentialSources::none(), None).unwrap();

        assert_eq!(outcome, SessionOutcome::Aborted);
    }

    #[test]
    fn test_mock_picker_without_selection_counts_as_aborted() {
        let picker = MockPicker::new(Vec::new());
        let outcome = picker.pick(fetcher(), &CredentialSources::none(), Some("rust")).unwrap();

        assert_eq!(outcome, SessionOutcome::Aborted);
    }

    #[test]
    fn test_mock_picker_enter_on_empty_list_keeps_going() {
        let picker = MockPicker::typing("zzz", &[KeyCode::Enter, KeyCode::Esc]);
        let outcome = picker.pick(fetcher(), &CredentialSources::none(), None).unwrap();

        assert_eq!(outcome, SessionOutcome::Aborted);
    }
}
