use std::collections::VecDeque;

use crate::error::{Result, VizError};
use crate::model::Graph;
use crate::recorder::Recorder;

use super::{TraversalState, format_ids};

/// Breadth-first search from `start`; returns the visit order.
///
/// Two frames per dequeued node: one showing it as current against the
/// queue as it was before the pop, and one after its unvisited, unqueued
/// neighbours were appended in adjacency order.
pub fn bfs(graph: &Graph, start: usize, rec: &mut Recorder) -> Result<Vec<usize>> {
    let n = graph.node_count();
    let ids: Vec<i64> = (0..n as i64).collect();
    let mut state = TraversalState::new(n, start);
    let mut queue: VecDeque<usize> = VecDeque::from([start]);

    while let Some(current) = queue.front().copied() {
        let before: Vec<usize> = queue.iter().copied().collect();
        queue.pop_front();

        rec.record_traversal(
            &ids,
            &state.roles(Some(current), &before),
            state.view(Some(current), &before),
            format!("Visiting node {current}"),
        );
        state.visit(current);

        for &neighbor in graph.neighbors(current) {
            if neighbor >= n {
                return Err(VizError::UnknownNode {
                    from: current,
                    to: neighbor,
                });
            }
            if !state.is_visited(neighbor) && !queue.contains(&neighbor) {
                queue.push_back(neighbor);
            }
        }

        let after: Vec<usize> = queue.iter().copied().collect();
        rec.record_traversal(
            &ids,
            &state.roles(Some(current), &after),
            state.view(Some(current), &after),
            format!("Visited node {current}. Queue: {}", format_ids(&after)),
        );
    }

    Ok(state.visit_order)
}
