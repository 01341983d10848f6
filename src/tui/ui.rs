use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::ChatScreen;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    AttachmentBubble, GroupHeader, HEADER_HEIGHT, INPUT_HEIGHT, MessageList, OptionsMenu, TitleBar,
};

/// Screen regions, top to bottom.
pub struct ScreenLayout {
    pub title: Rect,
    pub header: Rect,
    pub messages: Rect,
    pub input: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        use Constraint::{Length, Min};
        let [title, header, messages, input] =
            Layout::vertical([Length(1), Length(HEADER_HEIGHT), Min(0), Length(INPUT_HEIGHT)])
                .areas(area);
        Self {
            title,
            header,
            messages,
            input,
        }
    }
}

pub fn draw_ui(frame: &mut Frame, screen: &ChatScreen, tui: &mut TuiState) {
    let view = screen.view();
    let layout = ScreenLayout::new(frame.area());

    // Message list first: it decides whether there is unseen content below.
    MessageList::new(&mut tui.message_list, view.projection).render(frame, layout.messages);

    TitleBar::new(
        view.title,
        view.status_message,
        tui.message_list.has_unseen_content,
    )
    .render(frame, layout.title);
    GroupHeader::new(view.route).render(frame, layout.header);
    tui.input_box.render(frame, layout.input);

    if view.attachment_menu_visible {
        AttachmentBubble.render(frame, AttachmentBubble::area_above(layout.input));
    }
    if view.options_menu_visible {
        OptionsMenu::new(&mut tui.options_menu).render(frame, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::timeline::Position;
    use crate::test_support::{at, server_msg, test_screen};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(screen: &ChatScreen, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, screen, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn layout_stacks_title_header_list_input() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.title.height, 1);
        assert_eq!(layout.header.y, 1);
        assert_eq!(layout.messages.y, 1 + HEADER_HEIGHT);
        assert_eq!(layout.input.y, 24 - INPUT_HEIGHT);
    }

    #[test]
    fn draws_full_screen() {
        let mut screen = test_screen();
        screen
            .timeline
            .merge(vec![server_msg("1", "Reached the gate", at(2024, 5, 2, 9))], Position::Newer);
        screen.refresh_projection();
        let mut tui = TuiState::new();

        let text = render(&screen, &mut tui);
        assert!(text.contains("Trip 1"));
        assert!(text.contains("From: IGI Airport, T3"));
        assert!(text.contains("Reached the gate"));
        assert!(text.contains("Type a message..."));
    }

    #[test]
    fn overlays_follow_screen_flags() {
        let mut screen = test_screen();
        let mut tui = TuiState::new();
        assert!(!render(&screen, &mut tui).contains("Share Number"));

        update(&mut screen, Action::OpenOptionsMenu);
        update(&mut screen, Action::ToggleAttachmentMenu);
        let text = render(&screen, &mut tui);
        assert!(text.contains("Share Number"));
        assert!(text.contains("📷"));
    }
}
