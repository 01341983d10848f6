//! # InputBox Component
//!
//! Single-line message composer at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input and editing keys (backspace, delete, cursor movement, paste)
//! - Emit `Submit` on Enter, `ToggleAttachments` on the paperclip shortcut
//! - Scroll horizontally so the cursor is always visible
//!
//! ## State Management
//!
//! The authoritative text lives in the core `Composer`. The box keeps an
//! editing copy plus the cursor and reports every edit with `ContentChanged`;
//! the parent forwards the buffer to the core and calls [`InputBox::set_buffer`]
//! after a send to resync.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders on both sides.
const BORDER_OFFSET: u16 = 1;
pub const INPUT_HEIGHT: u16 = 3;
const PLACEHOLDER: &str = "Type a message...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed. Carries the buffer, which may be empty.
    Submit(String),
    /// Paperclip shortcut
    ToggleAttachments,
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    /// Editing copy of the composer text
    pub buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// Display columns hidden to the left of the viewport
    scroll: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the buffer (e.g. after the core cleared it) and put the cursor at the end.
    pub fn set_buffer(&mut self, text: &str) {
        if self.buffer != text {
            self.buffer = text.to_string();
            self.cursor = self.buffer.len();
            self.scroll = 0;
        }
    }

    /// Display column of the cursor within the whole buffer.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }

    /// Keep the cursor inside a viewport of `width` columns.
    fn update_scroll(&mut self, width: u16) {
        if width == 0 {
            self.scroll = 0;
            return;
        }
        let column = self.cursor_column();
        if column < self.scroll {
            self.scroll = column;
        } else if column >= self.scroll + width {
            self.scroll = column + 1 - width;
        }
    }

    /// Portion of the buffer starting at the scroll column.
    fn visible_text(&self) -> &str {
        let mut skipped = 0u16;
        for (i, c) in self.buffer.char_indices() {
            if skipped >= self.scroll {
                return &self.buffer[i..];
            }
            skipped += c.width().unwrap_or(0) as u16;
        }
        ""
    }

    fn insert_str(&mut self, text: &str) {
        // Single line: pasted newlines become spaces.
        let text = text.replace(['\r', '\n'], " ");
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(s.len())
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(BORDER_OFFSET * 2);
        self.update_scroll(inner_width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(Line::from(" ^A 📎  ⏎ ➤ ").alignment(Alignment::Right));

        let input = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.visible_text())
        };
        frame.render_widget(input.block(block), area);

        let x = area.x + BORDER_OFFSET + self.cursor_column().saturating_sub(self.scroll);
        let max_x = area.x + area.width.saturating_sub(BORDER_OFFSET + 1);
        frame.set_cursor_position((x.min(max_x), area.y + BORDER_OFFSET));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll = 0;
                Some(InputEvent::Submit(text))
            }
            TuiEvent::ToggleAttachments => Some(InputEvent::ToggleAttachments),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = typed("ab");
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn editing_in_the_middle_respects_char_boundaries() {
        let mut input = typed("héllo");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "hllo");
        input.handle_event(&TuiEvent::InputChar('é'));
        assert_eq!(input.buffer, "héllo");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn boundaries_report_no_change() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(input.handle_event(&TuiEvent::CursorLeft), None);
        assert_eq!(input.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn submit_takes_the_buffer() {
        let mut input = typed("hello");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("hello".into()))
        );
        assert!(input.buffer.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn empty_submit_is_still_emitted() {
        let mut input = InputBox::new();
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit(String::new()))
        );
    }

    #[test]
    fn paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("a\nb".into()));
        assert_eq!(input.buffer, "a b");
    }

    #[test]
    fn set_buffer_moves_cursor_to_end() {
        let mut input = typed("draft");
        input.set_buffer("");
        assert_eq!(input.cursor(), 0);
        input.set_buffer("restored");
        assert_eq!(input.cursor(), "restored".len());
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let mut input = typed("abcdefghij");
        input.update_scroll(4);
        assert_eq!(input.visible_text(), "hij");
        input.handle_event(&TuiEvent::CursorHome);
        input.update_scroll(4);
        assert_eq!(input.visible_text(), "abcdefghij");
    }

    #[test]
    fn renders_placeholder_when_empty() {
        let backend = TestBackend::new(40, INPUT_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new();
        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Type a message..."));
    }
}
