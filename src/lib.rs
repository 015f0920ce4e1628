//! Newslens - terminal client for the NeuralHybrid multilingual search
//! service
//!
//! Library backing the `newslens` binary: wire models, the HTTP search
//! client, the view-state machine, and the terminal rendering.

pub mod app;
pub mod client;
pub mod error;
pub mod models;
pub mod ui;
pub mod view;

pub use app::{App, AppMessage};
pub use client::{SearchClient, DEFAULT_ENDPOINT};
pub use error::{SearchError, CONNECTION_ERROR_MESSAGE};
pub use models::{Document, LanguageCode, SearchResponse};
pub use view::{Focus, RequestToken, SearchPhase, SearchView};
