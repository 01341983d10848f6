//! # Screen State
//!
//! Everything one mounted conversation screen knows. No TUI types here:
//! presentation state (scroll offsets, layout caches) lives in the `tui` module.
//!
//! ```text
//! ChatScreen
//! ├── title / route / me          // header props from config
//! ├── timeline: Timeline          // canonical message set
//! ├── pagination: Pagination      // cursor + Idle/Fetching
//! ├── composer: Composer          // input buffer
//! ├── attachment_menu_visible     // camera / video / document bubble
//! ├── options_menu_visible        // Members / Share Number / Report modal
//! ├── status_message: String      // status line text
//! ├── mounted: bool               // liveness guard for late fetch callbacks
//! └── projection: Arc<Projection> // cached, keyed on timeline revision
//! ```
//!
//! State changes go through `update(state, action)` in action.rs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;

use crate::core::composer::{Composer, Sent};
use crate::core::config::ResolvedConfig;
use crate::core::grouping::{Projection, project_local};
use crate::core::message::Author;
use crate::core::pagination::Pagination;
use crate::core::timeline::Timeline;

/// Pickup and drop-off shown under the title.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    pub from: String,
    pub to: String,
}

/// Entries of the options modal opened from the group header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Members,
    ShareNumber,
    Report,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [MenuOption::Members, MenuOption::ShareNumber, MenuOption::Report];

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Members => "Members",
            MenuOption::ShareNumber => "Share Number",
            MenuOption::Report => "Report",
        }
    }
}

/// Read-only snapshot handed to the view layer after every state change.
#[derive(Debug, Clone)]
pub struct ScreenView<'a> {
    pub title: &'a str,
    pub route: &'a Route,
    pub projection: Arc<Projection>,
    pub input: &'a str,
    pub attachment_menu_visible: bool,
    pub options_menu_visible: bool,
    pub status_message: &'a str,
}

pub struct ChatScreen {
    pub title: String,
    pub route: Route,
    pub me: Author,
    pub timeline: Timeline,
    pub pagination: Pagination,
    pub composer: Composer,
    pub attachment_menu_visible: bool,
    pub options_menu_visible: bool,
    pub status_message: String,
    mounted: bool,
    projection: Arc<Projection>,
    projected_revision: u64,
}

impl ChatScreen {
    pub fn new(title: impl Into<String>, route: Route, me: Author, scroll_threshold: u16) -> Self {
        Self {
            title: title.into(),
            route,
            me,
            timeline: Timeline::new(),
            pagination: Pagination::new(scroll_threshold),
            composer: Composer::new(),
            attachment_menu_visible: false,
            options_menu_visible: false,
            status_message: String::new(),
            mounted: true,
            projection: Arc::new(Projection::default()),
            projected_revision: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.title.clone(),
            Route {
                from: config.route_from.clone(),
                to: config.route_to.clone(),
            },
            Author::local(config.self_avatar.clone()),
            config.scroll_threshold,
        )
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Tear down the screen. Fetch results that arrive afterwards are ignored.
    pub fn unmount(&mut self) {
        info!("Chat screen unmounted ({} messages loaded)", self.timeline.len());
        self.mounted = false;
    }

    /// Grouped view of the timeline. Returns the same `Arc` until the
    /// timeline changes.
    pub fn projection(&self) -> Arc<Projection> {
        Arc::clone(&self.projection)
    }

    /// Recompute the cached projection if the timeline moved on.
    pub(crate) fn refresh_projection(&mut self) {
        if self.timeline.revision() != self.projected_revision {
            self.projection = Arc::new(project_local(self.timeline.messages()));
            self.projected_revision = self.timeline.revision();
        }
    }

    /// Optimistically send the current input with an explicit timestamp.
    pub fn send_at(&mut self, now: DateTime<Utc>) -> Sent {
        let sent = self.composer.send(&self.me, now);
        self.timeline.append(sent.message.clone());
        self.refresh_projection();
        sent
    }

    pub fn view(&self) -> ScreenView<'_> {
        ScreenView {
            title: &self.title,
            route: &self.route,
            projection: self.projection(),
            input: self.composer.input(),
            attachment_menu_visible: self.attachment_menu_visible,
            options_menu_visible: self.options_menu_visible,
            status_message: &self.status_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timeline::Position;
    use crate::test_support::{at, server_msg, test_screen};

    #[test]
    fn new_screen_defaults() {
        let screen = test_screen();
        assert!(screen.is_mounted());
        assert!(screen.timeline.is_empty());
        assert!(!screen.attachment_menu_visible);
        assert!(!screen.options_menu_visible);
        assert_eq!(screen.view().input, "");
        assert!(screen.view().projection.is_empty());
    }

    #[test]
    fn projection_arc_is_reused_until_timeline_changes() {
        let mut screen = test_screen();
        screen
            .timeline
            .merge(vec![server_msg("1", "a", at(2024, 5, 2, 9))], Position::Newer);
        screen.refresh_projection();

        let first = screen.projection();
        let again = screen.projection();
        assert!(Arc::ptr_eq(&first, &again));

        screen.refresh_projection();
        assert!(Arc::ptr_eq(&first, &screen.projection()));

        screen.send_at(at(2024, 5, 2, 10));
        assert!(!Arc::ptr_eq(&first, &screen.projection()));
        assert_eq!(screen.projection().message_count(), 2);
    }

    #[test]
    fn send_round_trip() {
        let mut screen = test_screen();
        screen.composer.set_input("hello");
        screen.send_at(at(2024, 5, 2, 10));

        let last = screen.timeline.last().unwrap();
        assert_eq!(last.text, "hello");
        assert!(last.author.is_self);
        assert_eq!(screen.view().input, "");
    }

    #[test]
    fn unmount_clears_liveness() {
        let mut screen = test_screen();
        screen.unmount();
        assert!(!screen.is_mounted());
    }

    #[test]
    fn menu_labels() {
        let labels: Vec<_> = MenuOption::ALL.iter().map(|o| o.label()).collect();
        assert_eq!(labels, vec!["Members", "Share Number", "Report"]);
    }
}
