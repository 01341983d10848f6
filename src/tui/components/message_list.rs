//! # MessageList Component
//!
//! Scrollable, date-separated view of the projection.
//!
//! ## Responsibilities
//!
//! - Flatten the projection into rows (date separators and bubbles)
//! - Cache row heights until the projection or the width changes
//! - Stick to the bottom for new messages, unless the user scrolled away
//! - Keep rows already on screen in place when an older page is prepended
//! - Report the offset from the top so the core can decide to paginate
//!
//! `MessageList` is created each frame and borrows `&mut MessageListState`
//! (persistent) together with the current `Arc<Projection>` (props).

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Widget;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::grouping::{Projection, date_label};
use crate::core::message::{Message, MessageId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Bubble;
use crate::tui::event::TuiEvent;

/// One visual row group in the list.
#[derive(Debug, Clone, Copy)]
pub enum Row<'a> {
    Separator(NaiveDate),
    Bubble(&'a Message),
}

/// Flatten buckets into rows, a separator before each bucket.
pub fn rows(projection: &Projection) -> Vec<Row<'_>> {
    let mut rows = Vec::with_capacity(projection.message_count() + projection.buckets.len());
    for bucket in &projection.buckets {
        rows.push(Row::Separator(bucket.date));
        rows.extend(bucket.messages.iter().map(Row::Bubble));
    }
    rows
}

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Content extends below the viewport
    pub has_unseen_content: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            has_unseen_content: false,
        }
    }

    /// Rows between the top of the loaded content and the top of the viewport.
    pub fn offset_from_top(&self) -> u16 {
        let absolute = self.layout.canvas_base() + u32::from(self.scroll_state.offset().y);
        u16::try_from(absolute).unwrap_or(u16::MAX)
    }

    fn max_offset(&self) -> u16 {
        self.layout.canvas_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user is back at the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Shift the viewport by however far `anchor` moved down, so that
    /// rows already on screen stay put after older rows are prepended.
    fn preserve_anchor(&mut self, anchor: Option<(MessageId, u32)>) {
        let Some((id, old_top)) = anchor else {
            return;
        };
        if self.stick_to_bottom {
            return;
        }
        let Some(new_top) = self.layout.top_of(&id) else {
            return;
        };
        if new_top > old_top {
            let shift = u16::try_from(new_top - old_top).unwrap_or(u16::MAX);
            let current = self.scroll_state.offset();
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: current.y.saturating_add(shift),
            });
        }
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Tallest canvas a `ScrollView` can address.
const MAX_CANVAS_HEIGHT: u32 = u16::MAX as u32;

/// Cached row heights for one (projection, width) pair.
///
/// Row positions are kept as `u32` from the top of the whole timeline. The
/// scroll canvas is `u16` tall, so when the timeline outgrows it the canvas
/// covers only the newest rows: `canvas_base()` rows are cut from the top and
/// every canvas coordinate is relative to that base.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u32>,
    /// Message id per row (None for separators), for anchoring.
    row_ids: Vec<Option<MessageId>>,
    projection: Option<Arc<Projection>>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            row_ids: Vec::new(),
            projection: None,
            content_width: 0,
        }
    }

    /// Whether the cached heights still describe `projection` at `content_width`.
    pub fn is_valid_for(&self, projection: &Arc<Projection>, content_width: u16) -> bool {
        self.content_width == content_width
            && self
                .projection
                .as_ref()
                .is_some_and(|cached| Arc::ptr_eq(cached, projection))
    }

    pub fn rebuild(&mut self, projection: &Arc<Projection>, content_width: u16) {
        let rows = rows(projection);
        self.heights = rows
            .iter()
            .map(|row| match row {
                Row::Separator(_) => 1,
                Row::Bubble(message) => Bubble::calculate_height(message, content_width),
            })
            .collect();
        self.row_ids = rows
            .iter()
            .map(|row| match row {
                Row::Separator(_) => None,
                Row::Bubble(message) => Some(message.id.clone()),
            })
            .collect();
        self.rebuild_prefix_heights();
        self.projection = Some(Arc::clone(projection));
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u32, |acc, &h| {
                *acc = acc.saturating_add(u32::from(h));
                Some(*acc)
            })
            .collect();
    }

    /// Height of the whole timeline.
    pub fn total_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Rows above the canvas that cannot be scrolled to.
    pub fn canvas_base(&self) -> u32 {
        self.total_height().saturating_sub(MAX_CANVAS_HEIGHT)
    }

    pub fn canvas_height(&self) -> u16 {
        u16::try_from(self.total_height() - self.canvas_base()).unwrap_or(u16::MAX)
    }

    /// Index of the first row that starts inside the canvas.
    fn first_canvas_row(&self) -> usize {
        let base = self.canvas_base();
        if base == 0 {
            0
        } else {
            self.prefix_heights.partition_point(|&end| end < base) + 1
        }
    }

    /// Canvas top edge of the first message row on the canvas, with its id.
    pub fn first_message_top(&self) -> Option<(MessageId, u32)> {
        let first = self.first_canvas_row();
        self.row_ids
            .iter()
            .enumerate()
            .skip(first)
            .find_map(|(i, id)| id.as_ref().map(|id| (id.clone(), self.canvas_top(i))))
    }

    /// Canvas top edge of the row showing `id`, if that row is on the canvas.
    pub fn top_of(&self, id: &MessageId) -> Option<u32> {
        let first = self.first_canvas_row();
        self.row_ids
            .iter()
            .position(|row_id| row_id.as_ref() == Some(id))
            .filter(|&i| i >= first)
            .map(|i| self.canvas_top(i))
    }

    fn row_top(&self, index: usize) -> u32 {
        if index == 0 {
            0
        } else {
            self.prefix_heights[index - 1]
        }
    }

    fn canvas_top(&self, index: usize) -> u32 {
        self.row_top(index) - self.canvas_base()
    }

    /// Rows to draw for a canvas scroll offset, with half a viewport of slack
    /// on both sides.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let base = self.canvas_base();
        let buffer = u32::from(viewport_height / 2);
        let scroll_offset = base + u32::from(scroll_offset);
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset + u32::from(viewport_height) + buffer;

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start)
            .max(self.first_canvas_row());
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}

/// A centered "──── Today ────" rule.
struct DateSeparator {
    label: String,
}

impl Widget for DateSeparator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = format!(" {} ", self.label);
        let side = (area.width as usize).saturating_sub(label.chars().count()) / 2;
        let rule = "─".repeat(side);
        Line::from(format!("{rule}{label}{rule}"))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// Scrollable conversation view component.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub projection: Arc<Projection>,
    pub today: NaiveDate,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, projection: Arc<Projection>) -> Self {
        Self {
            state,
            projection,
            today: Local::now().date_naive(),
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Refresh layout if the projection or width changed
        if !self.state.layout.is_valid_for(&self.projection, content_width) {
            let anchor = self.state.layout.first_message_top();
            self.state.layout.rebuild(&self.projection, content_width);
            self.state.preserve_anchor(anchor);
        }

        let canvas_height = self.state.layout.canvas_height();
        self.state.viewport_height = area.height;
        if self.state.stick_to_bottom {
            // Pin before picking rows so the first frame draws the tail.
            let y = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y });
        } else {
            self.state.clamp_scroll();
        }

        // 2. Render visible rows into a ScrollView
        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);
        let rows = rows(&self.projection);

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible_range {
            let y = u16::try_from(self.state.layout.canvas_top(i)).unwrap_or(u16::MAX);
            let height = self.state.layout.heights[i].min(canvas_height.saturating_sub(y));
            let rect = Rect::new(0, y, content_width, height);
            match rows[i] {
                Row::Separator(date) => scroll_view.render_widget(
                    DateSeparator {
                        label: date_label(date, self.today),
                    },
                    rect,
                ),
                Row::Bubble(message) => scroll_view.render_widget(Bubble::new(message), rect),
            }
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        let current_offset = self.state.scroll_state.offset().y;
        self.state.has_unseen_content = canvas_height > area.height
            && current_offset < canvas_height.saturating_sub(area.height);
    }
}
