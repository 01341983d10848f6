use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the chat screen that draws itself.
///
/// Components receive their data as struct fields ("props") and render into
/// a `Rect`. `render` takes `&mut self` so stateful components (the message
/// list, the input row) can update caches and scroll positions while drawing,
/// the same way ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that interprets terminal events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
