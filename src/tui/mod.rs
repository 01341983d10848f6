//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the chat screen,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background fetches
//!
//! `Effect::FetchHistory` spawns a tokio task that calls the
//! [`HistorySource`] and posts `Action::HistoryLoaded` back over an mpsc
//! channel. The loop drains that channel between input batches. A result
//! that arrives after the screen was torn down is dropped by `update()`.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::pagination::FetchTicket;
use crate::core::state::ChatScreen;
use crate::history::HistorySource;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    InputBox, InputEvent, MessageListState, OptionsMenuEvent, OptionsMenuState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// How long to wait for input before checking the fetch channel again.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub options_menu: OptionsMenuState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            options_menu: OptionsMenuState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBar
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady bar cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(config: ResolvedConfig, source: Arc<dyn HistorySource>) -> std::io::Result<()> {
    info!(
        "Opening chat '{}' with history source '{}'",
        config.title,
        source.name()
    );
    let mut screen = ChatScreen::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    for effect in dispatch(&mut screen, Action::Mount) {
        if let Effect::FetchHistory(ticket) = effect {
            spawn_fetch(Arc::clone(&source), ticket, tx.clone());
        }
    }

    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &screen, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for effect in handle_event(&mut screen, &mut tui, event) {
                match effect {
                    Effect::FetchHistory(ticket) => {
                        spawn_fetch(Arc::clone(&source), ticket, tx.clone());
                    }
                    Effect::Quit => should_quit = true,
                    Effect::None => {}
                }
            }
            if should_quit {
                break;
            }
        }

        // Handle background task actions (history pages)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            update(&mut screen, action);
        }
    }

    if screen.is_mounted() {
        screen.unmount();
    }
    ratatui::restore();
    Ok(())
}

fn dispatch(screen: &mut ChatScreen, action: Action) -> Vec<Effect> {
    match update(screen, action) {
        Effect::None => Vec::new(),
        effect => vec![effect],
    }
}

/// Route one terminal event: overlays first, then scrolling, then the input row.
fn handle_event(screen: &mut ChatScreen, tui: &mut TuiState, event: TuiEvent) -> Vec<Effect> {
    match event {
        TuiEvent::Resize => return Vec::new(),
        TuiEvent::ForceQuit => return dispatch(screen, Action::Quit),
        _ => {}
    }

    if screen.options_menu_visible {
        return match tui.options_menu.handle_event(&event) {
            Some(OptionsMenuEvent::Select(option)) => dispatch(screen, Action::SelectOption(option)),
            Some(OptionsMenuEvent::Dismiss) => dispatch(screen, Action::CloseOptionsMenu),
            None => Vec::new(),
        };
    }

    match event {
        TuiEvent::OpenOptions => {
            tui.options_menu.reset();
            dispatch(screen, Action::OpenOptionsMenu)
        }
        TuiEvent::Escape => {
            if screen.attachment_menu_visible {
                dispatch(screen, Action::ToggleAttachmentMenu)
            } else {
                Vec::new()
            }
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            let offset_from_top = tui.message_list.offset_from_top();
            dispatch(screen, Action::ScrollObserved { offset_from_top })
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::ContentChanged) => {
                dispatch(screen, Action::InputChanged(tui.input_box.buffer.clone()))
            }
            Some(InputEvent::Submit(text)) => {
                let mut effects = dispatch(screen, Action::InputChanged(text));
                effects.extend(dispatch(screen, Action::Send));
                tui.input_box.set_buffer(screen.composer.input());
                tui.message_list.stick_to_bottom = true;
                effects
            }
            Some(InputEvent::ToggleAttachments) => dispatch(screen, Action::ToggleAttachmentMenu),
            None => Vec::new(),
        },
    }
}

fn spawn_fetch(
    source: Arc<dyn HistorySource>,
    ticket: FetchTicket,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!(
        "Spawning history fetch: page {} from {} (seq={})",
        ticket.page,
        source.name(),
        ticket.seq
    );
    tokio::spawn(async move {
        // Failures are reported by the pagination controller.
        let result = source.fetch_page(ticket.page).await;
        if tx.send(Action::HistoryLoaded { ticket, result }).is_err() {
            warn!(
                "Failed to deliver history page {}: receiver dropped",
                ticket.page
            );
        }
    })
}
