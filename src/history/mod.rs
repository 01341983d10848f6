pub mod client;
pub mod types;

use std::fmt;

use async_trait::async_trait;

use crate::core::message::Message;

pub use client::HttpHistorySource;
pub use types::{HistoryPage, RawChat, RawId, RawSender};

/// Errors from fetching a history page. None of them are fatal: the
/// pagination controller logs them and leaves the timeline untouched.
#[derive(Debug)]
pub enum HistoryError {
    /// Endpoint misconfigured (bad URL). Not retryable.
    Config(String),
    /// Connection, DNS or timeout failure.
    Network(String),
    /// Endpoint answered with a non-success status.
    Api { status: u16, message: String },
    /// Body did not match the expected `{ "chats": [...] }` shape.
    Malformed(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Config(msg) => write!(f, "config error: {msg}"),
            HistoryError::Network(msg) => write!(f, "network error: {msg}"),
            HistoryError::Api { status, message } => {
                write!(f, "history API error (HTTP {status}): {message}")
            }
            HistoryError::Malformed(msg) => write!(f, "malformed history page: {msg}"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// A paginated source of past messages. Page 0 is the newest.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Returns a short name for logging.
    fn name(&self) -> &str;

    /// Fetch one page, oldest-first within the page.
    async fn fetch_page(&self, page: u32) -> Result<Vec<Message>, HistoryError>;
}
