//! # Pagination Controller
//!
//! Decides when to request the next older history page and what to do with
//! the response.
//!
//! ```text
//!            observe_scroll(offset < threshold)
//!   ┌──────┐ ─────────────────────────────────▶ ┌──────────┐
//!   │ Idle │                                    │ Fetching │  scroll events ignored
//!   └──────┘ ◀───────────────────────────────── └──────────┘
//!                complete(ticket, result)
//! ```
//!
//! At most one history request is in flight at any time. Each request is
//! identified by a [`FetchTicket`]; a completion carrying any other ticket is
//! stale and is dropped without touching state.

use log::{debug, info, warn};

use crate::core::message::Message;
use crate::core::timeline::Position;
use crate::history::HistoryError;

/// Rows from the top of the list below which an older page is requested.
pub const DEFAULT_SCROLL_THRESHOLD: u16 = 50;

/// Identifies one issued history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub page: u32,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching(FetchTicket),
}

/// What the caller should do after a fetch completes.
#[derive(Debug, PartialEq)]
pub enum Completion {
    /// Merge these messages into the timeline.
    Merge {
        messages: Vec<Message>,
        position: Position,
    },
    /// The page was empty: there is no older history.
    Exhausted,
    /// The fetch failed. Cursor unchanged; scrolling again retries.
    Failed,
    /// The ticket did not match the in-flight request. Ignored.
    Stale,
}

#[derive(Debug)]
pub struct Pagination {
    /// Next page index to request. 0 is the newest page.
    page: u32,
    state: FetchState,
    next_seq: u64,
    threshold: u16,
    exhausted: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

impl Pagination {
    pub fn new(threshold: u16) -> Self {
        Self {
            page: 0,
            state: FetchState::Idle,
            next_seq: 0,
            threshold,
            exhausted: false,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.state, FetchState::Fetching(_))
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Feed a scroll-position observation. Returns a ticket when a fetch
    /// should be issued.
    pub fn observe_scroll(&mut self, offset_from_top: u16) -> Option<FetchTicket> {
        if offset_from_top >= self.threshold {
            return None;
        }
        self.request_next()
    }

    /// Request the page under the cursor, unless a fetch is already in flight
    /// or history is exhausted. Also used for the mount-time load of page 0.
    pub fn request_next(&mut self) -> Option<FetchTicket> {
        if let FetchState::Fetching(in_flight) = self.state {
            debug!("Fetch already in flight (page {}), ignoring trigger", in_flight.page);
            return None;
        }
        if self.exhausted {
            return None;
        }

        let ticket = FetchTicket {
            page: self.page,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.state = FetchState::Fetching(ticket);
        info!("Requesting history page {} (seq={})", ticket.page, ticket.seq);
        Some(ticket)
    }

    /// Resolve the in-flight fetch. Always returns to `Idle` unless the ticket is stale.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Message>, HistoryError>,
    ) -> Completion {
        if self.state != FetchState::Fetching(ticket) {
            debug!(
                "Discarding stale history response (page {}, seq={})",
                ticket.page, ticket.seq
            );
            return Completion::Stale;
        }
        self.state = FetchState::Idle;

        match result {
            Ok(messages) if messages.is_empty() => {
                info!("History page {} was empty, no older messages", ticket.page);
                self.exhausted = true;
                Completion::Exhausted
            }
            Ok(messages) => {
                let position = if ticket.page == 0 {
                    Position::Newer
                } else {
                    Position::Older
                };
                self.page += 1;
                Completion::Merge { messages, position }
            }
            Err(e) => {
                warn!("History fetch for page {} failed: {}", ticket.page, e);
                Completion::Failed
            }
        }
    }
}
