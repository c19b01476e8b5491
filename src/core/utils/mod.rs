//! Utility functions shared by the analysis phases.
//!
//! - `line_index`: byte offset to line number lookups for text scanners

pub mod line_index;

pub use line_index::*;
