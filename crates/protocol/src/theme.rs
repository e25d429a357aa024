use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    // Element roles
    ElementDefault,
    ElementComparing,
    ElementSwapping,
    ElementSorted,
    NodeFrontier,
    NodeCurrent,
    NodeVisited,
    NodePath,

    Edge,
    EdgeOnPath,

    TextPrimary,
    TextSecondary,
    TextMuted,

    Background,
    Border,

    // Status bar
    StatusBackground,
    StatusText,
    StatusError,
}
