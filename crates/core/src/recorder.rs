//! Snapshot recorder: the only way a driver talks to the outside world.

use algoviz_protocol::{Role, Snapshot, TraversalView};

use crate::model::FrameStore;

/// Collects snapshots from an instrumented driver into a `FrameStore`.
///
/// Every `record*` call copies its arguments, so the driver is free to keep
/// mutating its working array afterwards.
#[derive(Debug, Default)]
pub struct Recorder {
    store: FrameStore,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, values: &[i64], roles: &[Role]) {
        self.record_with(values, roles, String::new());
    }

    pub fn record_with(&mut self, values: &[i64], roles: &[Role], caption: impl Into<String>) {
        self.store.append(Snapshot {
            values: values.to_vec(),
            roles: roles.to_vec(),
            traversal: None,
            caption: caption.into(),
        });
    }

    pub fn record_traversal(
        &mut self,
        values: &[i64],
        roles: &[Role],
        view: TraversalView,
        caption: impl Into<String>,
    ) {
        self.store.append(Snapshot {
            values: values.to_vec(),
            roles: roles.to_vec(),
            traversal: Some(view),
            caption: caption.into(),
        });
    }

    /// Number of frames recorded so far.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn finish(self) -> FrameStore {
        self.store
    }
}
