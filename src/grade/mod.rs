//! Letter-grade scale and score mapping.

pub mod scale;

pub use scale::*;
