//! Event board: merged vendor listings with client-side search and sort.

use shared::{domain::Event, error::NetworkError, protocol::SortKey};
use tracing::debug;

mod mount;
mod render;
mod view;

pub use mount::{mount, BoardHandle};
pub use render::{format_price_range, render_html, RenderError};
pub use view::{compare_names, derive_view, parse_timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardPhase {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct EventBoard {
    events: Vec<Event>,
    sort_key: SortKey,
    search_query: String,
    phase: BoardPhase,
}

impl Default for EventBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBoard {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            sort_key: SortKey::default(),
            search_query: String::new(),
            phase: BoardPhase::Loading,
        }
    }

    pub fn phase(&self) -> &BoardPhase {
        &self.phase
    }

    pub fn loading(&self) -> bool {
        self.phase == BoardPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            BoardPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
    }

    /// Applies the joined fetch outcome. Only the first completion while
    /// loading takes effect; returns whether it was applied.
    pub fn finish(&mut self, outcome: Result<Vec<Event>, NetworkError>) -> bool {
        if self.phase != BoardPhase::Loading {
            debug!(phase = ?self.phase, "ignoring fetch completion for settled board");
            return false;
        }

        match outcome {
            Ok(events) => {
                self.events = events;
                self.phase = BoardPhase::Ready;
            }
            Err(err) => {
                self.events.clear();
                self.phase = BoardPhase::Failed(err.to_string());
            }
        }
        true
    }

    pub fn view(&self) -> Vec<&Event> {
        derive_view(&self.events, &self.search_query, self.sort_key)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
