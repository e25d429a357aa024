use std::collections::{BTreeSet, VecDeque};

use algoviz_protocol::Point;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

const LAYOUT_CENTER: (f64, f64) = (500.0, 250.0);
const LAYOUT_RADIUS: f64 = 200.0;

/// An undirected graph whose node ids are `0..node_count()`.
///
/// Adjacency lists are ordered; traversals enumerate neighbours in exactly
/// this order, which is what makes a run reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    positions: Vec<Point>,
    edges: BTreeSet<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// An edgeless graph with `n` nodes laid out on a circle.
    pub fn with_nodes(n: usize) -> Self {
        Self {
            positions: circle_layout(n),
            edges: BTreeSet::new(),
            adjacency: vec![Vec::new(); n],
        }
    }

    /// The ring `0-1-…-(n-1)-0`. Each node lists `[next, previous]`.
    pub fn ring(n: usize) -> Self {
        let mut graph = Self::with_nodes(n);
        for i in 0..n {
            let next = (i + 1) % n;
            let prev = (i + n - 1) % n;
            for target in [next, prev] {
                if target != i && !graph.adjacency[i].contains(&target) {
                    graph.adjacency[i].push(target);
                    graph.edges.insert(edge_key(i, target));
                }
            }
        }
        graph
    }

    /// Build from explicit undirected edges, appended to both endpoints'
    /// adjacency lists in the order given. Duplicate edges are ignored.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Self::with_nodes(n);
        for &(a, b) in edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Build from ordered adjacency lists, taken verbatim. Edges are
    /// derived from the lists; symmetry is not enforced.
    pub fn from_adjacency(adjacency: Vec<Vec<usize>>) -> Result<Self> {
        let n = adjacency.len();
        let mut edges = BTreeSet::new();
        for (from, neighbors) in adjacency.iter().enumerate() {
            for &to in neighbors {
                if to >= n {
                    return Err(VizError::UnknownNode { from, to });
                }
                if to == from {
                    return Err(VizError::SelfLoop(from));
                }
                edges.insert(edge_key(from, to));
            }
        }
        Ok(Self {
            positions: circle_layout(n),
            edges,
            adjacency,
        })
    }

    /// Add an undirected edge. Returns `false` if it already existed.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<bool> {
        let n = self.node_count();
        if a >= n {
            return Err(VizError::UnknownNode { from: b, to: a });
        }
        if b >= n {
            return Err(VizError::UnknownNode { from: a, to: b });
        }
        if a == b {
            return Err(VizError::SelfLoop(a));
        }
        if !self.edges.insert(edge_key(a, b)) {
            return Ok(false);
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        Ok(true)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, node: usize) -> bool {
        node < self.node_count()
    }

    /// Neighbours of `node` in enumeration order; empty for unknown ids.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Undirected edges as `(low, high)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn position(&self, node: usize) -> Option<Point> {
        self.positions.get(node).copied()
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Whether every node is reachable from node 0.
    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.node_count()];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        while let Some(node) = queue.pop_front() {
            for &next in self.neighbors(node) {
                if let Some(flag) = seen.get_mut(next)
                    && !*flag
                {
                    *flag = true;
                    queue.push_back(next);
                }
            }
        }
        seen.iter().all(|s| *s)
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

fn circle_layout(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            Point::new(
                LAYOUT_CENTER.0 + LAYOUT_RADIUS * angle.cos(),
                LAYOUT_CENTER.1 + LAYOUT_RADIUS * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_lists_next_then_previous() {
        let g = Graph::ring(5);
        assert_eq!(g.neighbors(0), &[1, 4]);
        assert_eq!(g.neighbors(2), &[3, 1]);
        assert_eq!(g.edge_count(), 5);
        assert!(g.is_connected());
    }

    #[test]
    fn tiny_rings_have_no_self_loops() {
        assert!(Graph::ring(1).neighbors(0).is_empty());
        assert_eq!(Graph::ring(2).neighbors(0), &[1]);
        assert_eq!(Graph::ring(2).edge_count(), 1);
    }

    #[test]
    fn add_edge_is_symmetric_and_deduplicated() {
        let mut g = Graph::with_nodes(3);
        assert!(g.add_edge(0, 2).expect("new edge"));
        assert!(!g.add_edge(2, 0).expect("known edge"));
        assert_eq!(g.neighbors(0), &[2]);
        assert_eq!(g.neighbors(2), &[0]);
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 2)]);
    }

    #[test]
    fn rejects_self_loops_and_unknown_nodes() {
        assert!(matches!(
            Graph::from_edges(3, &[(1, 1)]),
            Err(VizError::SelfLoop(1))
        ));
        assert!(matches!(
            Graph::from_adjacency(vec![vec![1], vec![5]]),
            Err(VizError::UnknownNode { from: 1, to: 5 })
        ));
    }

    #[test]
    fn disconnected_graph_detected() {
        let g = Graph::from_edges(4, &[(0, 1), (2, 3)]).expect("valid graph");
        assert!(!g.is_connected());
    }

    #[test]
    fn layout_places_every_node() {
        let g = Graph::ring(6);
        assert_eq!(g.positions().len(), 6);
        let p0 = g.position(0).unwrap_or(Point::new(0.0, 0.0));
        assert!((p0.x - 700.0).abs() < 1e-9);
        assert!((p0.y - 250.0).abs() < 1e-9);
    }
}
