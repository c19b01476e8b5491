use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Adjacency list keyed by source category; targets sorted.
pub type Adjacency<'a> = BTreeMap<&'a str, BTreeSet<&'a str>>;

/// Find every elementary cycle with a recursion-stack depth-first search.
///
/// One traversal runs per start node, in sorted order. A traversal only
/// enters nodes that sort after its start and are not already on the
/// current path, so each elementary cycle is found exactly once, from its
/// smallest member. Reaching the start again records the path as a cycle;
/// traversal then backtracks and continues with the remaining neighbors.
/// Cycles over the same node set are reported once.
///
/// Cycles start at their smallest category and are closed by repeating it,
/// so `a -> b -> a` is `["a", "b", "a"]` and a self-embed is `["c", "c"]`.
/// The result is sorted.
pub fn find_cycles(adjacency: &Adjacency<'_>) -> Vec<Vec<String>> {
    let mut search = CycleSearch {
        adjacency,
        start: "",
        on_stack: HashSet::new(),
        path: Vec::new(),
        seen_sets: HashSet::new(),
        cycles: Vec::new(),
    };

    for &node in adjacency.keys() {
        search.start = node;
        search.visit(node);
    }

    let mut cycles = search.cycles;
    cycles.sort();
    cycles
}

struct CycleSearch<'g, 'a> {
    adjacency: &'g Adjacency<'a>,
    /// Smallest member of every cycle the current traversal may record.
    start: &'a str,
    on_stack: HashSet<&'a str>,
    path: Vec<&'a str>,
    seen_sets: HashSet<BTreeSet<&'a str>>,
    cycles: Vec<Vec<String>>,
}

impl<'a> CycleSearch<'_, 'a> {
    fn visit(&mut self, node: &'a str) {
        self.on_stack.insert(node);
        self.path.push(node);

        let adjacency = self.adjacency;
        if let Some(targets) = adjacency.get(node) {
            for &target in targets {
                if target == self.start {
                    self.record();
                } else if target > self.start && !self.on_stack.contains(target) {
                    self.visit(target);
                }
            }
        }

        self.path.pop();
        self.on_stack.remove(node);
    }

    /// Record the current path, which leads back to `start`.
    fn record(&mut self) {
        let node_set: BTreeSet<&str> = self.path.iter().copied().collect();
        if !self.seen_sets.insert(node_set) {
            return;
        }

        let mut cycle: Vec<String> = self.path.iter().map(|s| s.to_string()).collect();
        cycle.push(self.start.to_string());
        self.cycles.push(cycle);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn adjacency<'a>(edges: &[(&'a str, &'a str)]) -> Adjacency<'a> {
        let mut adj: Adjacency<'a> = BTreeMap::new();
        for &(from, to) in edges {
            adj.entry(from).or_default().insert(to);
            adj.entry(to).or_default();
        }
        adj
    }

    fn cycle(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_cycles_in_chain() {
        let adj = adjacency(&[("a", "b"), ("b", "c"), ("a", "c")]);
        assert!(find_cycles(&adj).is_empty());
    }

    #[test]
    fn test_two_node_cycle_reported_once() {
        let adj = adjacency(&[("a", "b"), ("b", "a")]);
        assert_eq!(find_cycles(&adj), vec![cycle(&["a", "b", "a"])]);
    }

    #[test]
    fn test_self_cycle() {
        let adj = adjacency(&[("c", "c")]);
        assert_eq!(find_cycles(&adj), vec![cycle(&["c", "c"])]);
    }

    #[test]
    fn test_cycle_rotated_to_smallest_member() {
        let adj = adjacency(&[("a", "z"), ("z", "m"), ("m", "z")]);
        assert_eq!(find_cycles(&adj), vec![cycle(&["m", "z", "m"])]);
    }

    #[test]
    fn test_cycle_through_finished_node_is_found() {
        let adj = adjacency(&[("a", "b"), ("b", "a"), ("a", "c"), ("c", "b")]);
        assert_eq!(
            find_cycles(&adj),
            vec![cycle(&["a", "b", "a"]), cycle(&["a", "c", "b", "a"])]
        );
    }

    #[test]
    fn test_same_node_set_reported_once() {
        // a -> b -> c -> a and a -> c -> b -> a share one node set.
        let adj = adjacency(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("a", "c"),
            ("c", "b"),
            ("b", "a"),
        ]);
        let cycles = find_cycles(&adj);

        let three: Vec<&Vec<String>> = cycles.iter().filter(|c| c.len() == 4).collect();
        assert_eq!(three, vec![&cycle(&["a", "b", "c", "a"])]);
        assert_eq!(cycles.len(), 4);
    }

    #[test]
    fn test_traversal_continues_after_cycle() {
        let adj = adjacency(&[("a", "a"), ("a", "b"), ("b", "c"), ("c", "b")]);
        assert_eq!(
            find_cycles(&adj),
            vec![cycle(&["a", "a"]), cycle(&["b", "c", "b"])]
        );
    }
}
