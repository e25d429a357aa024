use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;

/// What an element (array slot or graph node) is doing at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Default,
    /// Being compared against another element.
    Comparing,
    /// Being swapped, or selected (candidate minimum, pivot, merge range).
    Swapping,
    /// In its final sorted position.
    Sorted,
    /// Discovered but not yet finalized: queued (BFS) or stacked (DFS).
    Frontier,
    /// The node the traversal is expanding right now.
    Current,
    /// Finalized by a traversal.
    Visited,
    /// On the DFS path from the start node to the current node.
    Path,
}

impl Role {
    /// Terminal roles are the ones every element carries in the last frame.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Sorted | Self::Visited)
    }

    pub fn theme_token(self) -> ThemeToken {
        match self {
            Self::Default => ThemeToken::ElementDefault,
            Self::Comparing => ThemeToken::ElementComparing,
            Self::Swapping => ThemeToken::ElementSwapping,
            Self::Sorted => ThemeToken::ElementSorted,
            Self::Frontier => ThemeToken::NodeFrontier,
            Self::Current => ThemeToken::NodeCurrent,
            Self::Visited => ThemeToken::NodeVisited,
            Self::Path => ThemeToken::NodePath,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Comparing => "comparing",
            Self::Swapping => "swapping",
            Self::Sorted => "sorted",
            Self::Frontier => "frontier",
            Self::Current => "current",
            Self::Visited => "visited",
            Self::Path => "path",
        };
        f.write_str(name)
    }
}

/// Transient traversal state captured alongside a graph snapshot.
///
/// `frontier` is ordered front-of-queue first (BFS) or bottom-of-stack
/// first (DFS).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TraversalView {
    pub current: Option<usize>,
    pub frontier: Vec<usize>,
    pub visit_order: Vec<usize>,
    pub path: Vec<usize>,
}

/// One recorded, self-contained visual state of an algorithm run.
///
/// `roles[i]` annotates `values[i]`. For sorts `values` holds the array; for
/// traversals it holds the node ids, so `roles` is indexed by node id.
/// A snapshot owns all of its data and never aliases the working array of
/// the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub values: Vec<i64>,
    pub roles: Vec<Role>,
    pub traversal: Option<TraversalView>,
    /// Short description of the step, shown in the status line.
    pub caption: String,
}

impl Snapshot {
    pub fn new(values: Vec<i64>, roles: Vec<Role>) -> Self {
        Self {
            values,
            roles,
            traversal: None,
            caption: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn role(&self, index: usize) -> Role {
        self.roles.get(index).copied().unwrap_or_default()
    }

    /// Indices currently carrying `role`, in ascending order.
    pub fn indices_with(&self, role: Role) -> Vec<usize> {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == role)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn all_terminal(&self) -> bool {
        self.roles.iter().all(|r| r.is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_roles() {
        assert!(Role::Sorted.is_terminal());
        assert!(Role::Visited.is_terminal());
        assert!(!Role::Frontier.is_terminal());
        assert!(!Role::Default.is_terminal());
    }

    #[test]
    fn missing_role_reads_as_default() {
        let snap = Snapshot::new(vec![3, 1], vec![Role::Sorted]);
        assert_eq!(snap.role(0), Role::Sorted);
        assert_eq!(snap.role(1), Role::Default);
        assert!(!snap.all_terminal());
    }

    #[test]
    fn indices_with_role() {
        let snap = Snapshot::new(
            vec![1, 2, 3, 4],
            vec![Role::Comparing, Role::Default, Role::Comparing, Role::Sorted],
        );
        assert_eq!(snap.indices_with(Role::Comparing), vec![0, 2]);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut snap = Snapshot::new(vec![2, 1], vec![Role::Swapping, Role::Swapping]);
        snap.caption = "Swapped 2 and 1".to_string();
        let json = serde_json::to_string(&snap).expect("json");
        assert!(json.contains("\"Swapping\""));
        let back: Snapshot = serde_json::from_str(&json).expect("json");
        assert_eq!(back, snap);
    }
}
