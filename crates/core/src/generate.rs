//! Seeded random data: arrays for the sorts, graphs for the traversals.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::Graph;

/// Inclusive range of values placed in generated arrays.
pub const VALUE_MIN: i64 = 5;
pub const VALUE_MAX: i64 = 100;

/// `size` values drawn uniformly from `VALUE_MIN..=VALUE_MAX`.
pub fn random_array(size: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|_| rng.random_range(VALUE_MIN..=VALUE_MAX))
        .collect()
}

/// A connected graph: a Hamiltonian ring plus one or two random extra edges
/// per node. Extras that would be self-loops or duplicates are dropped.
pub fn random_graph(size: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::ring(size);
    if size < 2 {
        return graph;
    }
    for node in 0..size {
        let extras = rng.random_range(1..=2);
        for _ in 0..extras {
            let target = rng.random_range(0..size);
            if target != node {
                // Both ids are in range and distinct, so this cannot fail.
                let _ = graph.add_edge(node, target);
            }
        }
    }
    log::debug!(
        "generated graph: {} nodes, {} edges (seed {seed})",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_has_requested_length_and_range() {
        let values = random_array(40, 7);
        assert_eq!(values.len(), 40);
        assert!(values.iter().all(|v| (VALUE_MIN..=VALUE_MAX).contains(v)));
    }

    #[test]
    fn same_seed_same_data() {
        assert_eq!(random_array(25, 99), random_array(25, 99));
        assert_eq!(random_graph(10, 3), random_graph(10, 3));
    }

    #[test]
    fn graphs_are_connected_without_self_loops() {
        for seed in 0..50 {
            for size in 5..=15 {
                let g = random_graph(size, seed);
                assert_eq!(g.node_count(), size);
                assert!(g.is_connected(), "size {size} seed {seed}");
                for node in 0..size {
                    assert!(!g.neighbors(node).contains(&node));
                }
            }
        }
    }

    #[test]
    fn ring_edges_come_first_in_adjacency() {
        let g = random_graph(8, 11);
        for node in 0..8 {
            assert_eq!(g.neighbors(node)[0], (node + 1) % 8);
        }
    }

    #[test]
    fn empty_sizes() {
        assert!(random_array(0, 1).is_empty());
        assert!(random_graph(0, 1).is_empty());
    }
}
