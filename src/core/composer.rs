//! # Composer
//!
//! Turns the input buffer into an optimistic message.
//!
//! Sending never fails and never touches the network: the message is built
//! synchronously, the buffer is cleared, and the caller appends the message
//! to the timeline. Empty input is accepted and produces an empty bubble.

use chrono::{DateTime, Utc};

use crate::core::message::{Author, Message, MessageId};

/// Result of a send: the new message plus the input state left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub message: Message,
    pub cleared_input: String,
}

#[derive(Debug, Default)]
pub struct Composer {
    input: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Take the buffer and wrap it in a local message from `author`.
    /// `is_self` is forced on regardless of what the caller passed.
    pub fn send(&mut self, author: &Author, now: DateTime<Utc>) -> Sent {
        let text = std::mem::take(&mut self.input);
        let message = Message {
            id: MessageId::new_local(),
            text,
            author: Author {
                is_self: true,
                ..author.clone()
            },
            timestamp: now,
        };
        Sent {
            message,
            cleared_input: self.input.clone(),
        }
    }
}
