//! # Timeline Store
//!
//! The ordered, deduplicated set of messages known to the client.
//!
//! ```text
//!   merge(older page)          append(optimistic)
//!          │                          │
//!          ▼                          ▼
//!   [ o1 o2 | m1 m2 m3 | n1 n2 | local1 ]
//!     ▲ head                      tail ▲
//! ```
//!
//! Merges are idempotent: an id that is already present is never inserted
//! again, and the relative order of present messages never changes.

use std::collections::HashSet;

use log::debug;

use crate::core::message::{Message, MessageId};

/// Where a fetched page lands relative to what is already loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Initial or newer page: extends the tail in arrival order.
    Newer,
    /// Older history: goes before the current head.
    Older,
}

/// Result of a merge, mostly for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    pub inserted: usize,
    pub duplicates: usize,
}

#[derive(Debug, Default)]
pub struct Timeline {
    messages: Vec<Message>,
    ids: HashSet<MessageId>,
    revision: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fetched page. First-seen wins for duplicate ids, including
    /// duplicates within the page itself.
    pub fn merge(&mut self, page: Vec<Message>, position: Position) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        let mut fresh = Vec::with_capacity(page.len());

        for message in page {
            if self.ids.insert(message.id.clone()) {
                fresh.push(message);
            } else {
                outcome.duplicates += 1;
            }
        }
        outcome.inserted = fresh.len();

        if fresh.is_empty() {
            return outcome;
        }

        match position {
            Position::Older => {
                fresh.append(&mut self.messages);
                self.messages = fresh;
            }
            Position::Newer => self.messages.extend(fresh),
        }
        self.revision += 1;

        debug!(
            "Merged {:?} page: {} inserted, {} duplicates, {} total",
            position,
            outcome.inserted,
            outcome.duplicates,
            self.messages.len()
        );
        outcome
    }

    /// Append at the tail, no dedup. Used for optimistic messages whose ids
    /// are generated locally.
    pub fn append(&mut self, message: Message) {
        debug_assert!(!self.contains(&message.id), "append of a known id");
        self.ids.insert(message.id.clone());
        self.messages.push(message);
        self.revision += 1;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.ids.contains(id)
    }

    /// Bumped on every change to the contents. Merges that add nothing leave it alone.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
