use algoviz_protocol::Snapshot;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

/// The ordered snapshots produced by exactly one completed run.
///
/// Append-only while a driver is recording; once handed to a
/// `PlaybackController` it is only ever read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameStore {
    frames: Vec<Snapshot>,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, snapshot: Snapshot) {
        self.frames.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The snapshot at `index`, or `FrameOutOfRange`.
    pub fn at(&self, index: usize) -> Result<&Snapshot> {
        self.frames.get(index).ok_or(VizError::FrameOutOfRange {
            index,
            len: self.frames.len(),
        })
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.frames.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.frames.iter()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a FrameStore {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_protocol::Role;

    #[test]
    fn at_is_bounds_checked() {
        let mut store = FrameStore::new();
        store.append(Snapshot::new(vec![1], vec![Role::Default]));
        assert!(store.at(0).is_ok());
        assert!(matches!(
            store.at(1),
            Err(VizError::FrameOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn empty_store() {
        let store = FrameStore::new();
        assert!(store.is_empty());
        assert!(store.first().is_none());
        assert!(store.at(0).is_err());
    }

    #[test]
    fn json_dump_lists_frames() {
        let mut store = FrameStore::new();
        store.append(Snapshot::new(vec![2, 1], vec![Role::Default; 2]));
        store.append(Snapshot::new(vec![1, 2], vec![Role::Sorted; 2]));
        let json = store.to_json().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["frames"].as_array().map(Vec::len), Some(2));
    }
}
