//! # Messages
//!
//! The atomic unit of the timeline.
//!
//! ```text
//! Message
//! ├── id: MessageId          // Server("812") or Local(uuid)
//! ├── text: String           // may be empty
//! ├── author: Author         // is_self drives bubble alignment
//! └── timestamp: DateTime<Utc>
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity of a message within a timeline.
///
/// Server ids and locally generated ids live in separate variants, so an
/// optimistic message can never be mistaken for (or deduplicated against)
/// a server message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageId {
    Server(String),
    Local(Uuid),
}

impl MessageId {
    /// A fresh id for an optimistic message.
    pub fn new_local() -> Self {
        MessageId::Local(Uuid::new_v4())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, MessageId::Local(_))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Server(id) => write!(f, "{id}"),
            MessageId::Local(id) => write!(f, "local-{id}"),
        }
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Author {
    pub user_id: Option<String>,
    /// Avatar reference (URL or asset path). Only rendered for remote authors.
    pub avatar: Option<String>,
    /// True for the local user. Right-aligned bubble, no avatar.
    pub is_self: bool,
}

impl Author {
    /// The local user, with an optional avatar reference.
    pub fn local(avatar: Option<String>) -> Self {
        Self {
            user_id: None,
            avatar,
            is_self: true,
        }
    }

    /// Short label for the bubble title.
    pub fn display_name(&self) -> &str {
        if self.is_self {
            "you"
        } else {
            self.user_id.as_deref().unwrap_or("member")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub author: Author,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn is_self(&self) -> bool {
        self.author.is_self
    }
}
