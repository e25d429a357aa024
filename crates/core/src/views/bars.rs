use algoviz_protocol::{Rect, RenderCommand, Snapshot, ThemeToken, Viewport};

use crate::generate::VALUE_MAX;

/// Fraction of each slot left empty between neighbouring bars.
const GAP_FRACTION: f64 = 0.15;

/// Render an array snapshot as vertical bars anchored to the bottom edge.
///
/// Bar height is `value / 100` of the viewport height; a larger value
/// rescales the whole chart so nothing is clipped.
pub fn render_bars(snapshot: &Snapshot, viewport: &Viewport) -> Vec<RenderCommand> {
    if snapshot.is_empty() || viewport.is_empty() {
        return Vec::new();
    }

    let scale_max = snapshot
        .values
        .iter()
        .copied()
        .max()
        .unwrap_or(VALUE_MAX)
        .max(VALUE_MAX) as f64;
    let slot = viewport.width / snapshot.len() as f64;
    let gap = slot * GAP_FRACTION;

    let mut commands = Vec::with_capacity(snapshot.len() + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "bars".to_string(),
        label: Some("Array".to_string()),
    });

    for (i, &value) in snapshot.values.iter().enumerate() {
        let h = viewport.height * (value.max(0) as f64 / scale_max);
        let x = i as f64 * slot + gap / 2.0;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, viewport.height - h, slot - gap, h),
            color: snapshot.role(i).theme_token(),
            border_color: Some(ThemeToken::Border),
            label: Some(value.to_string()),
            element: Some(i),
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
