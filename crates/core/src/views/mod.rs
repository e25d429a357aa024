//! View transforms: `Snapshot` in, `Vec<RenderCommand>` out.
//!
//! Views are pure functions of their inputs. They never touch the Frame
//! Store or the controller, so any frame can be drawn in any order.

pub mod bars;
pub mod graph;

use algoviz_protocol::{RenderCommand, Snapshot, Viewport};

use crate::model::Graph;

/// Lay out `snapshot` as a graph when `graph` is given, as bars otherwise.
pub fn render_snapshot(
    snapshot: &Snapshot,
    graph: Option<&Graph>,
    viewport: &Viewport,
) -> Vec<RenderCommand> {
    match graph {
        Some(graph) => graph::render_graph(graph, snapshot, viewport),
        None => bars::render_bars(snapshot, viewport),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_protocol::Role;

    #[test]
    fn dispatches_on_graph() {
        let snap = Snapshot::new(vec![0, 1, 2], vec![Role::Default; 3]);
        let vp = Viewport::new(100.0, 50.0);

        let bars = render_snapshot(&snap, None, &vp);
        assert!(bars.iter().any(|c| matches!(c, RenderCommand::DrawRect { .. })));

        let ring = Graph::ring(3);
        let nodes = render_snapshot(&snap, Some(&ring), &vp);
        assert!(nodes.iter().any(|c| matches!(c, RenderCommand::DrawCircle { .. })));
        assert!(!nodes.iter().any(|c| matches!(c, RenderCommand::DrawRect { .. })));
    }
}
