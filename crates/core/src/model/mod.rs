pub mod dataset;
pub mod frame_store;
pub mod graph;
pub mod session;

pub use dataset::Dataset;
pub use frame_store::FrameStore;
pub use graph::Graph;
pub use session::{Session, SessionConfig};
