//! Plain-text report formatting.
//!
//! We keep formatting code in one place so:
//! - the grade/credit math stays clean and testable
//! - the TUI and CLI render exactly the same text

pub mod format;

pub use format::*;
