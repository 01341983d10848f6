//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::core::message::{Author, Message, MessageId};
use crate::core::state::{ChatScreen, Route};
use crate::history::{HistoryError, HistorySource};

/// A UTC instant on the hour.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// A message from another trip member.
pub fn server_msg(id: &str, text: &str, timestamp: DateTime<Utc>) -> Message {
    Message {
        id: MessageId::Server(id.to_string()),
        text: text.to_string(),
        author: Author {
            user_id: Some("driver".to_string()),
            avatar: Some("https://example.test/driver.png".to_string()),
            is_self: false,
        },
        timestamp,
    }
}

/// An optimistic message from the local user.
pub fn local_msg(text: &str, timestamp: DateTime<Utc>) -> Message {
    Message {
        id: MessageId::new_local(),
        text: text.to_string(),
        author: Author::local(None),
        timestamp,
    }
}

/// A mounted screen with the default threshold.
pub fn test_screen() -> ChatScreen {
    ChatScreen::new(
        "Trip 1",
        Route {
            from: "IGI Airport, T3".to_string(),
            to: "Sector 28".to_string(),
        },
        Author::local(None),
        50,
    )
}

/// Serves canned pages and records which pages were asked for.
/// Pages past the end come back empty.
pub struct StubHistory {
    pages: Vec<Vec<Message>>,
    pub requested: Mutex<Vec<u32>>,
}

impl StubHistory {
    pub fn new(pages: Vec<Vec<Message>>) -> Self {
        Self {
            pages,
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HistorySource for StubHistory {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<Message>, HistoryError> {
        self.requested.lock().unwrap().push(page);
        Ok(self.pages.get(page as usize).cloned().unwrap_or_default())
    }
}
