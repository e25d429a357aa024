//! Comparison sorts, instrumented.
//!
//! Every function here sorts `values` in place and keeps `roles` (same
//! length) describing what each slot is doing. The initial and final
//! frames are recorded by the caller.

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::bubble;
pub use insertion::insertion;
pub use merge::merge;
pub use quick::quick;
pub use selection::selection;
