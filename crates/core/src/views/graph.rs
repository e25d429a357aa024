use algoviz_protocol::{Point, RenderCommand, Snapshot, TextAlign, ThemeToken, Viewport};

use crate::algorithms::traversal::format_ids;
use crate::model::Graph;

/// Margin kept free on each side, as a fraction of the viewport.
const MARGIN: f64 = 0.1;
const NODE_RADIUS_FRACTION: f64 = 0.06;

/// Render a graph snapshot: edges first, then nodes, then one line of
/// traversal text along the bottom edge.
///
/// The layout stored on the graph is fitted to the viewport on each axis
/// independently, so terminal cells with a 2:1 aspect still fill the area.
pub fn render_graph(graph: &Graph, snapshot: &Snapshot, viewport: &Viewport) -> Vec<RenderCommand> {
    if graph.is_empty() || viewport.is_empty() {
        return Vec::new();
    }

    let fit = Fit::new(graph.positions(), viewport);
    let path = snapshot
        .traversal
        .as_ref()
        .map(|t| t.path.as_slice())
        .unwrap_or_default();

    let mut commands = Vec::with_capacity(graph.edge_count() + graph.node_count() + 6);

    commands.push(RenderCommand::BeginGroup {
        id: "edges".to_string(),
        label: None,
    });
    for (a, b) in graph.edges() {
        let (Some(pa), Some(pb)) = (graph.position(a), graph.position(b)) else {
            continue;
        };
        let on_path = path.windows(2).any(|w| (w[0], w[1]) == (a, b) || (w[0], w[1]) == (b, a));
        commands.push(RenderCommand::DrawLine {
            from: fit.apply(pa),
            to: fit.apply(pb),
            color: if on_path {
                ThemeToken::EdgeOnPath
            } else {
                ThemeToken::Edge
            },
            width: if on_path { 2.0 } else { 1.0 },
        });
    }
    commands.push(RenderCommand::EndGroup);

    commands.push(RenderCommand::BeginGroup {
        id: "nodes".to_string(),
        label: Some("Graph".to_string()),
    });
    let radius = viewport.width.min(viewport.height) * NODE_RADIUS_FRACTION;
    for (node, &pos) in graph.positions().iter().enumerate() {
        commands.push(RenderCommand::DrawCircle {
            center: fit.apply(pos),
            radius,
            color: snapshot.role(node).theme_token(),
            label: Some(node.to_string()),
            element: Some(node),
        });
    }
    commands.push(RenderCommand::EndGroup);

    if let Some(text) = traversal_line(snapshot) {
        commands.push(RenderCommand::DrawText {
            position: Point::new(0.0, viewport.height),
            text,
            color: ThemeToken::TextSecondary,
            align: TextAlign::Left,
        });
    }

    commands
}

fn traversal_line(snapshot: &Snapshot) -> Option<String> {
    let view = snapshot.traversal.as_ref()?;
    let mut parts = Vec::new();
    if !view.frontier.is_empty() {
        parts.push(format!("frontier {}", format_ids(&view.frontier)));
    }
    parts.push(format!("visited {}", format_ids(&view.visit_order)));
    if !view.path.is_empty() {
        parts.push(format!("path {}", format_ids(&view.path)));
    }
    Some(parts.join("  "))
}

/// Per-axis linear map from layout space into the viewport.
struct Fit {
    min: Point,
    scale: (f64, f64),
    offset: (f64, f64),
}

impl Fit {
    fn new(points: &[Point], viewport: &Viewport) -> Self {
        let (mut min, mut max) = (
            Point::new(f64::INFINITY, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        );
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        let axis = |lo: f64, hi: f64, extent: f64| {
            let inner = extent * (1.0 - 2.0 * MARGIN);
            let span = hi - lo;
            if span > f64::EPSILON {
                (inner / span, extent * MARGIN)
            } else {
                // Degenerate axis: centre it.
                (0.0, extent / 2.0)
            }
        };
        let (sx, ox) = axis(min.x, max.x, viewport.width);
        let (sy, oy) = axis(min.y, max.y, viewport.height);
        Self {
            min,
            scale: (sx, sy),
            offset: (ox, oy),
        }
    }

    fn apply(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.min.x) * self.scale.0 + self.offset.0,
            (p.y - self.min.y) * self.scale.1 + self.offset.1,
        )
    }
}
