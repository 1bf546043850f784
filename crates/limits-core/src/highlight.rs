//! Targeted-tile highlighting seam

/// Host's tile highlighting, driven by `highlightTargetedTiles`
pub trait TileHighlighter {
    /// Highlight the tiles targeted by the selected event
    fn target(&mut self);

    /// Clear every highlight
    fn untarget(&mut self);

    /// Whether any tile is currently highlighted
    fn has_targets(&self) -> bool;
}

/// Highlighter for hosts without tile rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighlighter;

impl TileHighlighter for NoHighlighter {
    fn target(&mut self) {}

    fn untarget(&mut self) {}

    fn has_targets(&self) -> bool {
        false
    }
}
