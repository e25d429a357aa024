//! Graph traversals, instrumented.
//!
//! Snapshots carry node ids as values and a [`TraversalView`] with the
//! frontier, visit order and (DFS) current path at the time of the record.

mod bfs;
mod dfs;

pub use bfs::bfs;
pub use dfs::dfs;

use algoviz_protocol::{Role, TraversalView};

/// Transient state shared by both traversals; never stored in frames
/// directly, only copied out through [`TraversalState::view`].
#[derive(Debug)]
pub(crate) struct TraversalState {
    pub visited: Vec<bool>,
    pub frontier: Vec<usize>,
    pub visit_order: Vec<usize>,
    pub path: Vec<usize>,
}

impl TraversalState {
    pub fn new(node_count: usize, start: usize) -> Self {
        Self {
            visited: vec![false; node_count],
            frontier: vec![start],
            visit_order: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn is_visited(&self, node: usize) -> bool {
        self.visited.get(node).copied().unwrap_or(false)
    }

    pub fn visit(&mut self, node: usize) {
        if let Some(flag) = self.visited.get_mut(node)
            && !*flag
        {
            *flag = true;
            self.visit_order.push(node);
        }
    }

    /// Roles by precedence: current, path, frontier, visited, default.
    pub fn roles(&self, current: Option<usize>, frontier: &[usize]) -> Vec<Role> {
        let mut roles: Vec<Role> = self
            .visited
            .iter()
            .map(|v| if *v { Role::Visited } else { Role::Default })
            .collect();
        let mut set = |node: usize, role: Role| {
            if let Some(slot) = roles.get_mut(node) {
                *slot = role;
            }
        };
        for &node in frontier {
            set(node, Role::Frontier);
        }
        for &node in &self.path {
            set(node, Role::Path);
        }
        if let Some(node) = current {
            set(node, Role::Current);
        }
        roles
    }

    pub fn view(&self, current: Option<usize>, frontier: &[usize]) -> TraversalView {
        TraversalView {
            current,
            frontier: frontier.to_vec(),
            visit_order: self.visit_order.clone(),
            path: self.path.clone(),
        }
    }
}

pub(crate) fn format_ids(ids: &[usize]) -> String {
    let parts: Vec<String> = ids.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
