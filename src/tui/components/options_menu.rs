//! # Options Menu Component
//!
//! Centered modal opened from the header ellipsis (Ctrl+O): Members,
//! Share Number, Report, and a Close row. Dismissed with Esc or Close.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `OptionsMenuState` lives in `TuiState`
//! - `OptionsMenu` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::core::state::MenuOption;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const CLOSE_LABEL: &str = "Close";

/// Persistent state for the options overlay.
pub struct OptionsMenuState {
    /// Index into `MenuOption::ALL`, or `ALL.len()` for the Close row.
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for OptionsMenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsMenuState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    /// Back to the first row, for the next time the modal opens.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.list_state.select(Some(0));
    }

    fn row_count() -> usize {
        MenuOption::ALL.len() + 1
    }
}

/// Events emitted by the options menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsMenuEvent {
    Select(MenuOption),
    Dismiss,
}

impl EventHandler for OptionsMenuState {
    type Event = OptionsMenuEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(OptionsMenuEvent::Dismiss),
            TuiEvent::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::ScrollDown => {
                self.selected = (self.selected + 1).min(Self::row_count() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => Some(
                MenuOption::ALL
                    .get(self.selected)
                    .copied()
                    .map_or(OptionsMenuEvent::Dismiss, OptionsMenuEvent::Select),
            ),
            _ => None,
        }
    }
}

/// Transient render wrapper for the options overlay.
pub struct OptionsMenu<'a> {
    state: &'a mut OptionsMenuState,
}

impl<'a> OptionsMenu<'a> {
    pub fn new(state: &'a mut OptionsMenuState) -> Self {
        Self { state }
    }
}

impl Component for OptionsMenu<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 40, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" ↑↓ Move  Enter Select  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        let labels = MenuOption::ALL
            .iter()
            .map(|option| option.label())
            .chain(std::iter::once(CLOSE_LABEL));

        let items: Vec<ListItem> = labels
            .enumerate()
            .map(|(i, label)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(label, style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
