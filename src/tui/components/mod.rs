//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: back arrow, title, status line, edit affordance
//! - `GroupHeader`: route summary with the options ellipsis
//! - `Bubble`: one chat message
//! - `AttachmentBubble`: camera / video / document icons
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events:
//! - `InputBox`: single-line composer
//! - `MessageList`: date-grouped scroll view with layout caching
//! - `OptionsMenu`: Members / Share Number / Report modal
//!
//! Stateful components split into a persistent `...State` stored in
//! `TuiState` and a transient wrapper built each frame with the props.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── group_header.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── input_box.rs
//! ├── attachment_bubble.rs
//! └── options_menu.rs
//! ```

mod attachment_bubble;
mod group_header;
mod title_bar;
pub use attachment_bubble::AttachmentBubble;
pub use group_header::{GroupHeader, HEADER_HEIGHT};
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod options_menu;
pub use options_menu::{OptionsMenu, OptionsMenuEvent, OptionsMenuState};
