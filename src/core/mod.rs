//! # Core Application Logic
//!
//! The timeline synchronization engine. It knows nothing about any specific
//! UI technology or transport.
//!
//! ```text
//!   scroll ──▶ Pagination ──▶ HistorySource ──▶ Timeline.merge ──┐
//!                                                                ├──▶ project() ──▶ render
//!   send ────▶ Composer ─────────────────────▶ Timeline.append ──┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message`, `MessageId`, `Author`
//! - [`timeline`]: the ordered, deduplicated message store
//! - [`pagination`]: the `Idle`/`Fetching` controller over the page cursor
//! - [`composer`]: input buffer and optimistic send
//! - [`grouping`]: date-bucket projection
//! - [`state`]: `ChatScreen`, everything one mounted screen owns
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`config`]: layered configuration

pub mod action;
pub mod composer;
pub mod config;
pub mod grouping;
pub mod message;
pub mod pagination;
pub mod state;
pub mod timeline;
