use crate::error::{Result, VizError};
use crate::model::Graph;
use crate::recorder::Recorder;

use super::{TraversalState, format_ids};

/// Iterative, path-tracking depth-first search from `start`; returns the
/// visit order.
///
/// The top of the stack is peeked, not popped. It is visited if new, then
/// either its first unvisited neighbour is pushed or, with none left, the
/// stack is popped (a backtrack). A node is never pushed while already on
/// the stack.
pub fn dfs(graph: &Graph, start: usize, rec: &mut Recorder) -> Result<Vec<usize>> {
    let n = graph.node_count();
    let ids: Vec<i64> = (0..n as i64).collect();
    let mut state = TraversalState::new(n, start);

    while let Some(top) = state.frontier.last().copied() {
        if !state.is_visited(top) {
            state.visit(top);
            if !state.path.contains(&top) {
                state.path.push(top);
            }
            rec.record_traversal(
                &ids,
                &state.roles(Some(top), &state.frontier),
                state.view(Some(top), &state.frontier),
                format!("Visiting node {top}"),
            );
        }

        let mut next = None;
        for &neighbor in graph.neighbors(top) {
            if neighbor >= n {
                return Err(VizError::UnknownNode {
                    from: top,
                    to: neighbor,
                });
            }
            if !state.is_visited(neighbor) {
                next = Some(neighbor);
                break;
            }
        }

        match next {
            Some(next) => {
                if !state.frontier.contains(&next) {
                    state.frontier.push(next);
                }
                if !state.path.contains(&next) {
                    state.path.push(next);
                }
                rec.record_traversal(
                    &ids,
                    &state.roles(Some(top), &state.frontier),
                    state.view(Some(top), &state.frontier),
                    format!(
                        "Moving to neighbor {next}. Stack: {}",
                        format_ids(&state.frontier)
                    ),
                );
            }
            None => {
                let popped = state.frontier.pop();
                if popped.is_some_and(|p| state.path.contains(&p)) && state.path.len() > 1 {
                    state.path.pop();
                }
                let current = state.frontier.last().copied();
                rec.record_traversal(
                    &ids,
                    &state.roles(current, &state.frontier),
                    state.view(current, &state.frontier),
                    format!(
                        "Backtracking from {}. Stack: {}",
                        popped.unwrap_or(top),
                        format_ids(&state.frontier)
                    ),
                );
            }
        }
    }

    Ok(state.visit_order)
}
