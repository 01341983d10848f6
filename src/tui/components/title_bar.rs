//! # TitleBar Component
//!
//! Top line of the screen: back affordance, chat title, status, edit affordance.
//!
//! ```text
//! ← Trip 1 | Loading older messages...                                  ✎
//! ```
//!
//! Stateless: every field is a prop copied from `ChatScreen` each frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub title: &'a str,
    pub status_message: &'a str,
    /// Unread content below the viewport.
    pub has_unseen_content: bool,
}

impl<'a> TitleBar<'a> {
    pub fn new(title: &'a str, status_message: &'a str, has_unseen_content: bool) -> Self {
        Self {
            title,
            status_message,
            has_unseen_content,
        }
    }

    fn left_line(&self) -> Line<'a> {
        let mut spans = vec![
            Span::raw("← "),
            Span::styled(self.title, Style::default().add_modifier(Modifier::BOLD)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!(" | {}", self.status_message),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if self.has_unseen_content {
            spans.push(Span::styled(" | ↓ New", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [left, right] = Layout::horizontal([Constraint::Min(0), Constraint::Length(2)]).areas(area);
        frame.render_widget(self.left_line(), left);
        frame.render_widget(Span::raw("✎"), right);
    }
}
