//! Hover target and tooltip placement.

use serde::{Deserialize, Serialize};

/// Tooltip position relative to the chart container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipAnchor {
    pub x: f64,
    pub y: f64,
}

/// Tracks which wedge is under the pointer.
///
/// Hover is cosmetic: it grows the wedge's outer radius and positions the
/// tooltip, and never touches drill state.
#[derive(Debug, Clone)]
pub struct HoverTracker {
    hovered: Option<String>,
    anchor: Option<TooltipAnchor>,
    offset: TooltipAnchor,
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self::new(TooltipAnchor { x: 12.0, y: 12.0 })
    }
}

impl HoverTracker {
    pub fn new(offset: TooltipAnchor) -> Self {
        Self {
            hovered: None,
            anchor: None,
            offset,
        }
    }

    /// Id of the hovered wedge.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered.as_deref() == Some(id)
    }

    /// Last tooltip anchor, cleared on leave.
    pub fn anchor(&self) -> Option<TooltipAnchor> {
        self.anchor
    }

    /// Pointer entered wedge `id`. Returns whether the target changed.
    pub fn enter(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.hovered.as_deref() == Some(id.as_str()) {
            return false;
        }
        self.hovered = Some(id);
        true
    }

    /// Pointer left the hovered wedge. Returns whether anything was hovered.
    pub fn leave(&mut self) -> bool {
        self.anchor = None;
        self.hovered.take().is_some()
    }

    /// Pointer moved; places the tooltip relative to the container.
    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        container_left: f64,
        container_top: f64,
    ) -> TooltipAnchor {
        let anchor = TooltipAnchor {
            x: client_x - container_left + self.offset.x,
            y: client_y - container_top + self.offset.y,
        };
        self.anchor = Some(anchor);
        anchor
    }

    /// Forget the hover target if it is no longer a known node.
    pub fn retain(&mut self, exists: impl Fn(&str) -> bool) {
        if self.hovered.as_deref().is_some_and(|id| !exists(id)) {
            self.leave();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_leave() {
        let mut hover = HoverTracker::default();
        assert!(hover.enter("goals"));
        assert!(!hover.enter("goals"));
        assert!(hover.is_hovered("goals"));
        assert!(hover.leave());
        assert!(!hover.leave());
        assert_eq!(hover.hovered(), None);
    }

    #[test]
    fn test_pointer_move_is_container_relative() {
        let mut hover = HoverTracker::new(TooltipAnchor { x: 10.0, y: 5.0 });
        let anchor = hover.pointer_move(150.0, 300.0, 100.0, 250.0);
        assert_eq!(anchor, TooltipAnchor { x: 60.0, y: 55.0 });
        assert_eq!(hover.anchor(), Some(anchor));
    }

    #[test]
    fn test_retain_drops_missing_target() {
        let mut hover = HoverTracker::default();
        hover.enter("gone");
        hover.retain(|id| id == "still-here");
        assert_eq!(hover.hovered(), None);
    }
}
