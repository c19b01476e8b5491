use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::cycles::{Adjacency, find_cycles};
use crate::core::{
    DependencyEdge, DependencyGraph, DuplicateDeclaration, EdgeKind, LibraryDeclaration,
    UsageReference,
};

/// Build the dependency graph and run every analysis over it.
///
/// The result depends only on the contents of both slices, not on how
/// often this is called; identical inputs give identical graphs.
pub fn build_graph(
    declarations: &[LibraryDeclaration],
    references: &[UsageReference],
) -> DependencyGraph {
    let edges = collect_edges(declarations);
    let nodes = collect_nodes(declarations, references, &edges);

    let circular = {
        let mut adjacency: Adjacency = nodes.iter().map(|n| (n.as_str(), BTreeSet::new())).collect();
        for edge in &edges {
            adjacency
                .entry(edge.from.as_str())
                .or_default()
                .insert(edge.to.as_str());
        }
        find_cycles(&adjacency)
    };

    DependencyGraph {
        duplicates: find_duplicates(declarations),
        unused: find_unused(declarations, references, &edges),
        circular,
        nodes,
        edges,
    }
}

/// Declared categories, aliases, edge targets and referenced categories.
fn collect_nodes(
    declarations: &[LibraryDeclaration],
    references: &[UsageReference],
    edges: &[DependencyEdge],
) -> Vec<String> {
    let mut nodes: BTreeSet<&str> = BTreeSet::new();
    for decl in declarations {
        nodes.extend(decl.all_categories());
    }
    nodes.extend(edges.iter().map(|e| e.to.as_str()));
    nodes.extend(references.iter().map(|r| r.category.as_str()));

    nodes.into_iter().map(str::to_string).collect()
}

fn collect_edges(declarations: &[LibraryDeclaration]) -> Vec<DependencyEdge> {
    let mut edges: BTreeSet<DependencyEdge> = BTreeSet::new();

    for decl in declarations {
        let embeds = decl.embeds.iter().map(|to| (to, EdgeKind::Embed));
        let dependencies = decl.dependencies.iter().map(|to| (to, EdgeKind::Dependency));
        for (to, kind) in embeds.chain(dependencies) {
            edges.insert(DependencyEdge {
                from: decl.category.clone(),
                to: to.clone(),
                kind,
            });
        }
    }

    edges.into_iter().collect()
}

/// Categories declared at two or more distinct paths.
fn find_duplicates(declarations: &[LibraryDeclaration]) -> Vec<DuplicateDeclaration> {
    let mut by_category: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for decl in declarations {
        for category in decl.all_categories() {
            let paths = by_category.entry(category).or_default();
            if !paths.contains(&decl.source_path.as_str()) {
                paths.push(&decl.source_path);
            }
        }
    }

    by_category
        .into_iter()
        .filter(|(_, paths)| paths.len() >= 2)
        .map(|(category, paths)| DuplicateDeclaration {
            category: category.to_string(),
            paths: paths.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

/// Declared categories that nothing references or embeds/depends on.
///
/// A declaration counts as used as soon as any of its categories (primary
/// or alias) is used.
fn find_unused(
    declarations: &[LibraryDeclaration],
    references: &[UsageReference],
    edges: &[DependencyEdge],
) -> Vec<String> {
    let used: HashSet<&str> = references
        .iter()
        .map(|r| r.category.as_str())
        .chain(edges.iter().map(|e| e.to.as_str()))
        .collect();

    let unused: BTreeSet<&str> = declarations
        .iter()
        .filter(|decl| !decl.all_categories().any(|c| used.contains(c)))
        .map(|decl| decl.category.as_str())
        .collect();

    unused.into_iter().map(str::to_string).collect()
}
