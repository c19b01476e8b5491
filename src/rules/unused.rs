//! Unused category detection rule.
//!
//! The graph already knows which categories are unused; this rule attaches
//! the declaring location to each of them.

use crate::{
    core::{DependencyGraph, LibraryDeclaration},
    issues::UnusedCategoryIssue,
};

/// One issue per declaration whose category is unused.
///
/// A category declared twice and unused yields two issues, one per location.
pub fn check_unused_categories(
    declarations: &[LibraryDeclaration],
    graph: &DependencyGraph,
) -> Vec<UnusedCategoryIssue> {
    let mut issues: Vec<UnusedCategoryIssue> = declarations
        .iter()
        .filter(|d| graph.is_unused(&d.category))
        .map(|d| UnusedCategoryIssue {
            category: d.category.clone(),
            source_path: d.source_path.clone(),
        })
        .collect();

    issues.sort_by(|a, b| {
        a.source_path
            .cmp(&b.source_path)
            .then_with(|| a.category.cmp(&b.category))
    });
    issues.dedup();

    issues
}
