use crate::{core::DependencyGraph, issues::DuplicateCategoryIssue};

pub fn check_duplicate_categories(graph: &DependencyGraph) -> Vec<DuplicateCategoryIssue> {
    graph
        .duplicates
        .iter()
        .map(|d| DuplicateCategoryIssue {
            category: d.category.clone(),
            paths: d.paths.clone(),
        })
        .collect()
}
