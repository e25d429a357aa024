//! Instrumented algorithm drivers.
//!
//! Each driver runs one textbook algorithm against a private working copy
//! of the input and reports every meaningful step (comparison, swap, visit,
//! enqueue, backtrack) to a [`Recorder`]. A run always has the same frame
//! layout:
//!
//! ```text
//!   frame 0          untouched input, every role Default
//!   frames 1..n-1    the driver's own records
//!   frame n          every element Sorted / every reached node Visited
//! ```
//!
//! Empty input yields a single frame.

pub mod sort;
pub mod traversal;

use std::str::FromStr;

use algoviz_protocol::Role;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};
use crate::model::{Dataset, FrameStore, Graph};
use crate::recorder::Recorder;

/// Whether an algorithm consumes an array or a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlgorithmKind {
    Sort,
    Traversal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
    Bfs,
    Dfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Quick,
        Self::Merge,
        Self::Bfs,
        Self::Dfs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Quick => "Quick Sort",
            Self::Merge => "Merge Sort",
            Self::Bfs => "Breadth-First Search",
            Self::Dfs => "Depth-First Search",
        }
    }

    /// The kebab-case identifier accepted by `FromStr`.
    pub fn id(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Quick => "quick",
            Self::Merge => "merge",
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
        }
    }

    pub fn kind(self) -> AlgorithmKind {
        match self {
            Self::Bfs | Self::Dfs => AlgorithmKind::Traversal,
            _ => AlgorithmKind::Sort,
        }
    }

    /// The next algorithm in `ALL`, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Run against `data` and return the complete Frame Store.
    ///
    /// `start` is only consulted by traversals and must name an existing
    /// node of a non-empty graph.
    pub fn run(self, data: &Dataset, start: usize) -> Result<FrameStore> {
        let store = match (self.kind(), data) {
            (AlgorithmKind::Sort, Dataset::Array(values)) => sort_frames(self, values),
            (AlgorithmKind::Traversal, Dataset::Graph(graph)) => {
                traversal_frames(self, graph, start)?
            }
            (AlgorithmKind::Sort, _) => {
                return Err(self.wrong_input("an array", data));
            }
            (AlgorithmKind::Traversal, _) => {
                return Err(self.wrong_input("a graph", data));
            }
        };
        log::debug!(
            "{}: recorded {} frames for {} elements",
            self.name(),
            store.len(),
            data.len()
        );
        Ok(store)
    }

    fn wrong_input(self, expected: &'static str, data: &Dataset) -> VizError {
        VizError::WrongInput {
            algorithm: self.name(),
            expected,
            found: data.kind_name(),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let key = key
            .strip_suffix("-sort")
            .or_else(|| key.strip_suffix("sort"))
            .unwrap_or(&key);
        match key {
            "bubble" => Ok(Self::Bubble),
            "selection" => Ok(Self::Selection),
            "insertion" => Ok(Self::Insertion),
            "quick" => Ok(Self::Quick),
            "merge" => Ok(Self::Merge),
            "bfs" | "breadth-first" | "breadth-first-search" => Ok(Self::Bfs),
            "dfs" | "depth-first" | "depth-first-search" => Ok(Self::Dfs),
            _ => Err(VizError::UnknownAlgorithm(s.to_string())),
        }
    }
}

fn sort_frames(algorithm: Algorithm, input: &[i64]) -> FrameStore {
    let mut rec = Recorder::new();
    let n = input.len();
    rec.record_with(input, &vec![Role::Default; n], "Initial array");
    if n == 0 {
        return rec.finish();
    }

    let mut working = input.to_vec();
    let mut roles = vec![Role::Default; n];
    match algorithm {
        Algorithm::Bubble => sort::bubble(&mut working, &mut roles, &mut rec),
        Algorithm::Selection => sort::selection(&mut working, &mut roles, &mut rec),
        Algorithm::Insertion => sort::insertion(&mut working, &mut roles, &mut rec),
        Algorithm::Quick => sort::quick(&mut working, &mut roles, &mut rec),
        Algorithm::Merge => sort::merge(&mut working, &mut roles, &mut rec),
        Algorithm::Bfs | Algorithm::Dfs => {}
    }

    rec.record_with(&working, &vec![Role::Sorted; n], "Sorted");
    rec.finish()
}

fn traversal_frames(algorithm: Algorithm, graph: &Graph, start: usize) -> Result<FrameStore> {
    let mut rec = Recorder::new();
    let n = graph.node_count();
    let ids: Vec<i64> = (0..n as i64).collect();
    let roles = vec![Role::Default; n];
    if n == 0 {
        rec.record_with(&ids, &roles, "Empty graph");
        return Ok(rec.finish());
    }
    if !graph.contains(start) {
        return Err(VizError::InvalidStartNode {
            node: start,
            node_count: n,
        });
    }

    rec.record_with(&ids, &roles, format!("Start at node {start}"));
    let order = match algorithm {
        Algorithm::Dfs => traversal::dfs(graph, start, &mut rec)?,
        _ => traversal::bfs(graph, start, &mut rec)?,
    };

    let mut final_roles = vec![Role::Default; n];
    for &node in &order {
        final_roles[node] = Role::Visited;
    }
    let caption = format!("Visit order: {}", traversal::format_ids(&order));
    let view = algoviz_protocol::TraversalView {
        current: None,
        frontier: Vec::new(),
        visit_order: order,
        path: Vec::new(),
    };
    rec.record_traversal(&ids, &final_roles, view, caption);
    Ok(rec.finish())
}
