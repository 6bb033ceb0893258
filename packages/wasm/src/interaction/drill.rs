//! Drill-down state machine.
//!
//! The whole navigation state is one ordered list of ids, from a level-1
//! category down to the node the user drilled into. Visibility and dimming of
//! every wedge are derived from that list on demand.

use tracing::debug;

use crate::tree::{NodeIndex, SunburstTree};

/// What a transition did to the active path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillTransition {
    /// The deepest entry was popped.
    Collapsed,
    /// The path was replaced by the clicked node's chain.
    Jumped,
    /// The path was cut back to a shorter prefix.
    Truncated,
    /// The path was cleared.
    Reset,
    /// Nothing changed.
    Ignored,
}

impl DrillTransition {
    /// Whether the active path changed.
    #[inline]
    pub fn changed(self) -> bool {
        self != Self::Ignored
    }
}

/// Owns the active path and its transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrillStateMachine {
    active_path: Vec<String>,
}

impl DrillStateMachine {
    /// Create a machine with nothing drilled into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids from the level-1 category down to the deepest active node.
    pub fn active_path(&self) -> &[String] {
        &self.active_path
    }

    /// Whether nothing is drilled into.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active_path.is_empty()
    }

    /// The deepest active id.
    pub fn deepest(&self) -> Option<&str> {
        self.active_path.last().map(String::as_str)
    }

    /// Whether `id` is anywhere on the active path.
    pub fn is_active(&self, id: &str) -> bool {
        self.active_path.iter().any(|entry| entry == id)
    }

    /// Whether `id` is the deepest active entry.
    pub fn is_last_active(&self, id: &str) -> bool {
        self.deepest() == Some(id)
    }

    /// Level 1 is always shown; deeper nodes only once their parent is active.
    pub fn visible(&self, tree: &SunburstTree, index: NodeIndex) -> bool {
        match tree.node(index).level {
            0 => false,
            1 => true,
            _ => tree
                .parent(index)
                .is_some_and(|parent| self.is_active(&tree.node(parent).id)),
        }
    }

    /// A node is dimmed when one of its siblings, not itself, is active.
    pub fn dimmed(&self, tree: &SunburstTree, index: NodeIndex) -> bool {
        let id = &tree.node(index).id;
        if self.active_path.is_empty() || self.is_active(id) {
            return false;
        }
        let Some(parent) = tree.parent(index) else {
            return false;
        };
        tree.children(parent)
            .into_iter()
            .filter(|&sibling| sibling != index)
            .any(|sibling| self.is_active(&tree.node(sibling).id))
    }

    /// Handle a click on node `id`.
    ///
    /// Clicking the deepest active node collapses one level; clicking any
    /// other node replaces the path with that node's full chain.
    pub fn click(&mut self, tree: &SunburstTree, id: &str) -> DrillTransition {
        if self.is_last_active(id) {
            self.active_path.pop();
            debug!(id, depth = self.active_path.len(), "collapsed drill level");
            return DrillTransition::Collapsed;
        }

        match tree.path_to(id) {
            Some(path) => {
                debug!(id, depth = path.len(), "jumped to node");
                self.active_path = path;
                DrillTransition::Jumped
            }
            None => {
                debug!(id, "ignoring click on unknown or orphaned node");
                DrillTransition::Ignored
            }
        }
    }

    /// A click outside the chart clears the path.
    pub fn click_outside(&mut self) -> DrillTransition {
        if self.active_path.is_empty() {
            return DrillTransition::Ignored;
        }
        debug!("click outside chart, resetting drill path");
        self.reset()
    }

    /// Keep the first `index + 1` entries.
    pub fn truncate_to(&mut self, index: usize) -> DrillTransition {
        let keep = index.saturating_add(1);
        if keep >= self.active_path.len() {
            return DrillTransition::Ignored;
        }
        self.active_path.truncate(keep);
        debug!(depth = keep, "truncated drill path");
        DrillTransition::Truncated
    }

    /// Clear the path.
    pub fn reset(&mut self) -> DrillTransition {
        if self.active_path.is_empty() {
            return DrillTransition::Ignored;
        }
        self.active_path.clear();
        DrillTransition::Reset
    }

    /// Replace the path wholesale, as a search selection does.
    pub fn jump_to(&mut self, path: Vec<String>) -> DrillTransition {
        if path == self.active_path {
            return DrillTransition::Ignored;
        }
        self.active_path = path;
        DrillTransition::Jumped
    }

    /// After new data arrives, keep the longest prefix that still names a
    /// chain in `tree`.
    pub fn retain_valid(&mut self, tree: &SunburstTree) -> DrillTransition {
        let valid = (0..self.active_path.len())
            .take_while(|&i| {
                tree.path_to(&self.active_path[i]).as_deref() == Some(&self.active_path[..=i])
            })
            .count();

        if valid == self.active_path.len() {
            return DrillTransition::Ignored;
        }
        debug!(kept = valid, dropped = self.active_path.len() - valid, "pruned stale drill path");
        self.active_path.truncate(valid);
        DrillTransition::Truncated
    }
}
