use serde::{Deserialize, Serialize};

use crate::model::Graph;

/// The data a session owns until the next "generate".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Dataset {
    Array(Vec<i64>),
    Graph(Graph),
}

impl Dataset {
    /// Number of elements (array) or nodes (graph).
    pub fn len(&self) -> usize {
        match self {
            Self::Array(values) => values.len(),
            Self::Graph(graph) => graph.node_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Array(_) => "an array",
            Self::Graph(_) => "a graph",
        }
    }

    pub fn as_graph(&self) -> Option<&Graph> {
        match self {
            Self::Graph(graph) => Some(graph),
            Self::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&[i64]> {
        match self {
            Self::Array(values) => Some(values),
            Self::Graph(_) => None,
        }
    }
}
