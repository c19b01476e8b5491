//! Graph Builder & Analyzer.
//!
//! Edges come from declarations only; references contribute nodes and mark
//! categories as used. The produced [`DependencyGraph`] is immutable.
//!
//! [`DependencyGraph`]: crate::core::DependencyGraph

pub mod build;
pub mod cycles;

pub use build::build_graph;
pub use cycles::find_cycles;
