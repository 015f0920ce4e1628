//! View-state machine for the search screen
//!
//! One tagged union covers the search lifecycle (Idle → Loading → Success
//! or Failed), with the modal selection and the input buffer as the only
//! orthogonal slots. Submissions hand out a [`RequestToken`] carrying a
//! generation number; a settle with a stale token is dropped, so a late
//! response from a superseded request can never overwrite newer state.

use crate::error::SearchError;
use crate::models::{Document, SearchResponse};

/// Lifecycle of a search attempt. Exactly one phase at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    /// No query submitted yet.
    Idle,
    /// A request is in flight.
    Loading { query: String },
    /// The last request settled successfully.
    Success(SearchResponse),
    /// The last request failed; `message` is what the user sees.
    Failed { message: String },
}

/// Identifies which submission a settling response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
}

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
}

/// All mutable state behind the search screen.
#[derive(Debug)]
pub struct SearchView {
    /// Live query text being edited.
    pub input: String,
    phase: SearchPhase,
    /// Document shown in the detail modal, if any. Independent of the
    /// search phase: the modal stays usable while a request is in flight.
    selected: Option<Document>,
    /// Highlighted row in the result list.
    cursor: usize,
    focus: Focus,
    generation: u64,
}

impl SearchView {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            phase: SearchPhase::Idle,
            selected: None,
            cursor: 0,
            focus: Focus::Input,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Loading { .. })
    }

    /// Results of the last successful search, if the view is in Success.
    pub fn results(&self) -> &[Document] {
        match &self.phase {
            SearchPhase::Success(response) => &response.results,
            _ => &[],
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Submit the current input. A blank (empty or whitespace-only) query
    /// is a no-op: no phase change, no token. Otherwise prior results and
    /// errors are cleared, the view enters Loading, and the caller gets
    /// the trimmed query plus the token the eventual settle must present.
    /// Submitting while Loading supersedes the in-flight request.
    pub fn submit(&mut self) -> Option<(String, RequestToken)> {
        let query = self.input.trim();
        if query.is_empty() {
            return None;
        }
        let query = query.to_string();
        self.generation += 1;
        self.cursor = 0;
        self.phase = SearchPhase::Loading {
            query: query.clone(),
        };
        Some((
            query,
            RequestToken {
                generation: self.generation,
            },
        ))
    }

    /// Settle the request identified by `token`. Ignored if a newer
    /// submission has superseded it. Exactly one settle per live token
    /// exits the Loading phase.
    pub fn settle(&mut self, token: RequestToken, outcome: Result<SearchResponse, SearchError>) {
        if token.generation != self.generation {
            tracing::debug!(
                stale = token.generation,
                current = self.generation,
                "dropping settle from superseded request"
            );
            return;
        }
        match outcome {
            Ok(response) => {
                tracing::info!(results = response.results.len(), "search settled");
                self.phase = SearchPhase::Success(response);
            }
            Err(error) => {
                tracing::warn!(%error, "search failed");
                self.phase = SearchPhase::Failed {
                    message: error.user_message().to_string(),
                };
            }
        }
        self.cursor = 0;
    }

    pub fn selected_document(&self) -> Option<&Document> {
        self.selected.as_ref()
    }

    /// Open the detail modal for the result at `index`, if it exists.
    pub fn open_document(&mut self, index: usize) {
        if let Some(doc) = self.results().get(index) {
            self.selected = Some(doc.clone());
            self.cursor = index;
        }
    }

    /// Open the modal for the currently highlighted result.
    pub fn open_highlighted(&mut self) {
        self.open_document(self.cursor);
    }

    pub fn close_document(&mut self) {
        self.selected = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Results,
            Focus::Results => Focus::Input,
        };
    }

    pub fn cursor_down(&mut self) {
        let len = self.results().len();
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}
