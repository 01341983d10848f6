//! # Actions
//!
//! Everything that can happen on the chat screen becomes an `Action`.
//! User scrolls near the top? That's `Action::ScrollObserved`.
//! History endpoint answers? That's `Action::HistoryLoaded`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the adapter what I/O to perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use chrono::Utc;
use log::{debug, info};

use crate::core::message::Message;
use crate::core::pagination::{Completion, FetchTicket};
use crate::core::state::{ChatScreen, MenuOption};
use crate::history::HistoryError;

#[derive(Debug)]
pub enum Action {
    /// Screen became visible: load the newest page.
    Mount,
    /// Scroll position report, in rows from the top of the list.
    ScrollObserved { offset_from_top: u16 },
    /// A history fetch finished.
    HistoryLoaded {
        ticket: FetchTicket,
        result: Result<Vec<Message>, HistoryError>,
    },
    /// The input buffer was edited.
    InputChanged(String),
    /// Send button / Enter.
    Send,
    ToggleAttachmentMenu,
    OpenOptionsMenu,
    CloseOptionsMenu,
    SelectOption(MenuOption),
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchHistory(FetchTicket),
    Quit,
}

pub fn update(screen: &mut ChatScreen, action: Action) -> Effect {
    match action {
        Action::Mount => match screen.pagination.request_next() {
            Some(ticket) => {
                screen.status_message = "Loading messages...".to_string();
                Effect::FetchHistory(ticket)
            }
            None => Effect::None,
        },
        Action::ScrollObserved { offset_from_top } => {
            match screen.pagination.observe_scroll(offset_from_top) {
                Some(ticket) => {
                    screen.status_message = "Loading older messages...".to_string();
                    Effect::FetchHistory(ticket)
                }
                None => Effect::None,
            }
        }
        Action::HistoryLoaded { ticket, result } => {
            if !screen.is_mounted() {
                debug!("Ignoring history page {} after unmount", ticket.page);
                return Effect::None;
            }
            match screen.pagination.complete(ticket, result) {
                Completion::Merge { messages, position } => {
                    let outcome = screen.timeline.merge(messages, position);
                    info!(
                        "Page {} merged: {} new, {} duplicates",
                        ticket.page, outcome.inserted, outcome.duplicates
                    );
                    screen.refresh_projection();
                    screen.status_message.clear();
                }
                Completion::Exhausted => {
                    screen.status_message = "No older messages".to_string();
                }
                Completion::Failed => {
                    screen.status_message = "Couldn't load messages".to_string();
                }
                Completion::Stale => {}
            }
            Effect::None
        }
        Action::InputChanged(text) => {
            screen.composer.set_input(text);
            Effect::None
        }
        Action::Send => {
            let sent = screen.send_at(Utc::now());
            debug!("Sent {} ({} bytes)", sent.message.id, sent.message.text.len());
            Effect::None
        }
        Action::ToggleAttachmentMenu => {
            screen.attachment_menu_visible = !screen.attachment_menu_visible;
            Effect::None
        }
        Action::OpenOptionsMenu => {
            screen.options_menu_visible = true;
            Effect::None
        }
        Action::CloseOptionsMenu => {
            screen.options_menu_visible = false;
            Effect::None
        }
        Action::SelectOption(option) => {
            info!("Option selected: {}", option.label());
            screen.options_menu_visible = false;
            Effect::None
        }
        Action::Quit => {
            screen.unmount();
            Effect::Quit
        }
    }
}
