//! Attachment picker bubble shown above the input row (Ctrl+A).
//!
//! Icons only. Picking a file is outside this screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::tui::component::Component;

const ICONS: &str = "📷  🎥  📄";
const BUBBLE_WIDTH: u16 = 16;
pub const BUBBLE_HEIGHT: u16 = 3;

pub struct AttachmentBubble;

impl AttachmentBubble {
    /// Where the bubble sits: right-aligned, directly above `input_area`.
    pub fn area_above(input_area: Rect) -> Rect {
        let width = BUBBLE_WIDTH.min(input_area.width);
        let height = BUBBLE_HEIGHT.min(input_area.y);
        Rect::new(
            input_area.x + input_area.width - width,
            input_area.y - height,
            width,
            height,
        )
    }
}

impl Component for AttachmentBubble {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green));
        frame.render_widget(
            Paragraph::new(ICONS).alignment(Alignment::Center).block(block),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sits_right_aligned_above_input() {
        let input = Rect::new(0, 20, 80, 3);
        assert_eq!(AttachmentBubble::area_above(input), Rect::new(64, 17, 16, 3));
    }

    #[test]
    fn clamps_to_available_space() {
        let input = Rect::new(0, 1, 10, 3);
        assert_eq!(AttachmentBubble::area_above(input), Rect::new(0, 0, 10, 1));
    }
}
