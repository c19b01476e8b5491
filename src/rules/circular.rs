use crate::{core::DependencyGraph, issues::CircularDependencyIssue};

pub fn check_circular_dependencies(graph: &DependencyGraph) -> Vec<CircularDependencyIssue> {
    graph
        .circular
        .iter()
        .map(|cycle| CircularDependencyIssue {
            cycle: cycle.clone(),
        })
        .collect()
}
