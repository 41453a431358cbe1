//! Ratatui widgets for the repository picker

mod help_bar;
mod result_list;
mod search_bar;
mod status_bar;

pub use help_bar::{HelpBar, KeyHint};
pub use result_list::{COLUMN_SEPARATOR, ResultList};
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
