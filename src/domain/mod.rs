//! Domain types used throughout the tracker.
//!
//! This module defines:
//!
//! - course identifiers and their term markers (`CourseId`, `TermLength`)
//! - course values as a tagged variant (`CourseValue`, `PassFailMark`)
//! - the persisted account record (`AccountRecord`)
//! - aggregation outputs (`GpaInputs`, `CreditProgress`, `CrNcrUsage`)

pub mod types;

pub use types::*;
