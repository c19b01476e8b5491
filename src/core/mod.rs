//! Core analysis engine.
//!
//! ## Module Structure
//!
//! - `file_scanner`: walk the root and classify files by role
//! - `collect`: Declaration Collector (manifests, config files, assets)
//! - `extract`: Usage Reference Scanner (inclusion calls, generic patterns)
//! - `graph`: Graph Builder & Analyzer (duplicates, unused, cycles)
//! - `context`: Aggregator driving the phases over a repository
//! - `data`: shared data model
//! - `utils`: small text helpers

pub mod collect;
pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod graph;
pub mod utils;

pub use context::{AnalysisResult, analyze_repository};
pub use data::{
    AssetLists, DeclarationFlags, DeclarationKind, DependencyEdge, DependencyGraph,
    DuplicateDeclaration, EdgeKind, LibraryDeclaration, ReferenceKind, ScanDiagnostic,
    UsageReference,
};
pub use file_scanner::{FileRules, scan_files};
