//! # GroupHeader Component
//!
//! Trip summary under the title bar: group avatar, route, options affordance.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::state::Route;
use crate::tui::component::Component;

/// Rows taken by the header, including its bottom rule.
pub const HEADER_HEIGHT: u16 = 3;

pub struct GroupHeader<'a> {
    pub route: &'a Route,
}

impl<'a> GroupHeader<'a> {
    pub fn new(route: &'a Route) -> Self {
        Self { route }
    }
}

impl Component for GroupHeader<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [avatar, route, menu] = Layout::horizontal([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(inner);

        frame.render_widget(Span::styled("(◉)", Style::default().fg(Color::Green)), avatar);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled(format!("From: {}", self.route.from), bold)),
            Line::from(Span::styled(format!("To: {}", self.route.to), bold)),
        ];
        frame.render_widget(Paragraph::new(lines), route);
        frame.render_widget(Span::raw(" ⋮"), menu);
    }
}
