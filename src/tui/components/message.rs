use chrono::Local;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::message::Message;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top + bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;
/// Avatar gutter in front of other members' bubbles: "(D) ".
const AVATAR_WIDTH: u16 = 4;
/// Narrowest bubble, wide enough for the "09:15" footer.
const MIN_BUBBLE_WIDTH: u16 = 10;

const SELF_BUBBLE: Color = Color::Rgb(102, 187, 106);
const OTHER_BORDER: Color = Color::Rgb(176, 190, 197);

/// One chat bubble. Own messages hug the right edge in green; everyone else
/// sits on the left behind an avatar initial.
///
/// Bubbles are at most 80% of the row and shrink to fit short text.
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` so the list can lay out rows without rendering them.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub message: &'a Message,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    fn max_width(message: &Message, row_width: u16) -> u16 {
        let available = if message.is_self() {
            row_width
        } else {
            row_width.saturating_sub(AVATAR_WIDTH)
        };
        (row_width.saturating_mul(4) / 5).min(available)
    }

    /// Outer width of the bubble for a row of `row_width` columns.
    pub fn bubble_width(message: &Message, row_width: u16) -> u16 {
        let max = Self::max_width(message, row_width);
        let longest_line = message
            .text
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0) as u16;
        let title = if message.is_self() {
            0
        } else {
            message.author.display_name().width() as u16
        };
        let natural = longest_line.max(title).saturating_add(HORIZONTAL_OVERHEAD);
        natural.max(MIN_BUBBLE_WIDTH).min(max)
    }

    /// Rows needed for this message in a row of `row_width` columns.
    pub fn calculate_height(message: &Message, row_width: u16) -> u16 {
        let content_width = Self::bubble_width(message, row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            // Empty sends still draw a (blank) bubble.
            return 1 + VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn time_label(&self) -> String {
        self.message
            .timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

impl Widget for Bubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = Self::bubble_width(self.message, area.width);
        let is_self = self.message.is_self();

        let bubble_area = if is_self {
            Rect::new(area.x + area.width.saturating_sub(width), area.y, width, area.height)
        } else {
            let initial = self
                .message
                .author
                .display_name()
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default();
            let avatar = Rect::new(area.x, area.y + area.height.saturating_sub(2), AVATAR_WIDTH, 1);
            Span::styled(format!("({initial})"), Style::default().fg(Color::Cyan))
                .render(avatar.intersection(area), buf);
            Rect::new(area.x + AVATAR_WIDTH, area.y, width, area.height)
        };

        let (border_style, text_style) = if is_self {
            (Style::default().fg(SELF_BUBBLE), Style::default().fg(SELF_BUBBLE))
        } else {
            (Style::default().fg(OTHER_BORDER), Style::default())
        };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H))
            .title_bottom(Line::from(self.time_label()).alignment(Alignment::Right));
        if !is_self {
            block = block.title(self.message.author.display_name());
        }

        let inner = block.inner(bubble_area);
        block.render(bubble_area, buf);
        Paragraph::new(self.message.text.trim())
            .style(text_style)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
