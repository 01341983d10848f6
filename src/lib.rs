//! Tripchat library exports for testing

pub mod core;
pub mod history;
pub mod tui;

#[cfg(test)]
pub mod test_support;
