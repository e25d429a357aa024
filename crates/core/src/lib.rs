//! Animation-state engine for algorithm visualizations.
//!
//! Drivers run an algorithm to completion and record every step into a
//! [`FrameStore`]; a [`PlaybackController`] then walks that store on the
//! host's timer, handing each frame to a [`Renderer`].

pub mod algorithms;
pub mod error;
pub mod generate;
pub mod model;
pub mod playback;
pub mod recorder;
pub mod views;

pub use algorithms::{Algorithm, AlgorithmKind};
pub use error::{Result, VizError};
pub use model::{Dataset, FrameStore, Graph, Session, SessionConfig};
pub use playback::{FrameRef, PlaybackController, PlaybackState, Renderer};
pub use recorder::Recorder;
