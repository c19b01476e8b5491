//! clibscan - client library category analysis
//!
//! clibscan is a CLI tool and library that scans a content repository for
//! client library declarations (folder manifests and build-tool configs) and
//! for the places that reference them (templates, policies, scripts). It
//! reports duplicate categories, unused categories and embed/dependency
//! cycles, and can propose a reduced base library for a given page.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Analysis engine (collect, extract, graph)
//! - `correlate`: Page snapshot to category correlation
//! - `issues`: Issue type definitions and reporting
//! - `optimize`: Reduced-manifest proposals
//! - `rules`: Turning analysis output into issues

pub mod cli;
pub mod config;
pub mod core;
pub mod correlate;
pub mod issues;
pub mod optimize;
pub mod rules;
