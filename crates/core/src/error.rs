use thiserror::Error;

/// Everything that can go wrong between a user action and a finished run.
///
/// Stepping past either end of a Frame Store is not an error; the cursor
/// simply stays put.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("start node {node} does not exist (graph has {node_count} nodes)")]
    InvalidStartNode { node: usize, node_count: usize },
    #[error("adjacency of node {from} names unknown node {to}")]
    UnknownNode { from: usize, to: usize },
    #[error("edge {0}-{0} is a self-loop")]
    SelfLoop(usize),
    #[error("size {size} is outside {min}..={max} for {what}")]
    SizeOutOfRange {
        what: &'static str,
        size: usize,
        min: usize,
        max: usize,
    },
    #[error("frame {index} is out of range (store has {len} frames)")]
    FrameOutOfRange { index: usize, len: usize },
    #[error("{algorithm} needs {expected} input, but the session holds {found}")]
    WrongInput {
        algorithm: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),
    #[error("{algorithm} aborted: {message}")]
    DriverFault {
        algorithm: &'static str,
        message: String,
    },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = VizError> = std::result::Result<T, E>;
