//! Connectivity of an inferred topology

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use crate::topology::EdgeMap;

/// Undirected adjacency built from a set of router pairs
#[derive(Debug, Default)]
struct Adjacency<'a> {
    neighbors: BTreeMap<&'a str, BTreeSet<&'a str>>,
}

impl<'a> Adjacency<'a> {
    fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut adjacency = Self::default();
        for (a, b) in pairs {
            adjacency.neighbors.entry(a).or_default().insert(b);
            adjacency.neighbors.entry(b).or_default().insert(a);
        }
        adjacency
    }

    fn start(&self) -> Option<&'a str> {
        self.neighbors.keys().next().copied()
    }

    fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Breadth-first visit from `start`, returning every node reached
    fn visit_from(&self, start: &'a str) -> HashSet<&'a str> {
        let mut visited: HashSet<&'a str> = HashSet::new();
        let mut queue: VecDeque<&'a str> = VecDeque::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let Some(next) = self.neighbors.get(current) else {
                continue;
            };
            for &neighbor in next {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited
    }
}

/// Whether the graph induced by `pairs` is one connected component.
///
/// Only nodes that appear in some pair are considered; an empty edge set is
/// trivially connected.
pub fn pairs_connected<'a, I>(pairs: I) -> bool
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let adjacency = Adjacency::from_pairs(pairs);
    match adjacency.start() {
        None => true,
        Some(start) => adjacency.visit_from(start).len() == adjacency.node_count(),
    }
}

/// Whether every router that appears in `edges` can reach every other
pub fn all_reachable(edges: &EdgeMap) -> bool {
    pairs_connected(edges.keys().map(|key| key.endpoints()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::EdgeKey;

    fn edges(pairs: &[(&str, &str)]) -> EdgeMap {
        pairs
            .iter()
            .map(|(a, b)| (EdgeKey::new(a, b), "10.0.0.0/24".parse().unwrap()))
            .collect()
    }

    #[test]
    fn test_empty_graph_is_reachable() {
        assert!(all_reachable(&EdgeMap::new()));
    }

    #[test]
    fn test_disjoint_pairs_are_not_reachable() {
        assert!(!all_reachable(&edges(&[("A", "B"), ("C", "D")])));
    }

    #[test]
    fn test_chain_is_reachable() {
        assert!(all_reachable(&edges(&[("A", "B"), ("B", "C")])));
    }

    #[test]
    fn test_cycle_with_tail_is_reachable() {
        assert!(all_reachable(&edges(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("C", "D"),
        ])));
    }

    #[test]
    fn test_pairs_connected_ignores_direction() {
        assert!(pairs_connected([("B", "A"), ("C", "B")]));
        assert!(!pairs_connected([("A", "B"), ("C", "D"), ("D", "E")]));
    }
}
