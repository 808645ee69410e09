//! `gradebook` library crate.
//!
//! The binary (`gpa`) is a thin wrapper around this library so that:
//!
//! - the grade/credit math is testable without spawning processes
//! - modules are reusable (e.g., a future web front end)
//! - code stays easy to navigate as the project grows

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod grade;
pub mod report;
pub mod store;
pub mod tui;
