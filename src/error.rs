//! Error types for Newslens

use thiserror::Error;

/// Generic user-facing message for any failed search attempt. The two
/// variants below are kept apart for diagnostics only.
pub const CONNECTION_ERROR_MESSAGE: &str = "Error connecting to the search server.";

#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport failure or non-success HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// Response body is not a decodable search response.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl SearchError {
    /// The message shown to the user; intentionally the same for both
    /// failure kinds.
    pub fn user_message(&self) -> &'static str {
        CONNECTION_ERROR_MESSAGE
    }
}
