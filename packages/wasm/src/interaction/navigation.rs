//! Breadcrumbs and the center label.

use serde::Serialize;

use super::drill::{DrillStateMachine, DrillTransition};
use crate::tree::{SunburstTree, display_value};

/// Default label for the root crumb and the empty center.
pub const DEFAULT_ROOT_LABEL: &str = "All Stats";

/// One entry of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    /// Node id; `None` for the root sentinel.
    pub id: Option<String>,
    pub name: String,
    pub level: u32,
    /// Index to pass to `truncate_to`; `None` for the root sentinel.
    pub path_index: Option<usize>,
    /// The deepest crumb, or the root when nothing is selected.
    pub active: bool,
}

/// Text shown in the chart center.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterLabel {
    pub id: Option<String>,
    pub name: String,
    pub display_value: String,
}

/// Builds the breadcrumb trail from the drill state.
#[derive(Debug, Clone)]
pub struct NavigationController {
    root_label: String,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_LABEL)
    }
}

impl NavigationController {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            root_label: root_label.into(),
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    /// Root sentinel followed by one crumb per active entry.
    ///
    /// Entries that no longer resolve in `tree` fall back to their id as the
    /// name.
    pub fn breadcrumbs(&self, tree: Option<&SunburstTree>, drill: &DrillStateMachine) -> Vec<Breadcrumb> {
        let path = drill.active_path();
        let mut crumbs = Vec::with_capacity(path.len() + 1);
        crumbs.push(Breadcrumb {
            id: None,
            name: self.root_label.clone(),
            level: 0,
            path_index: None,
            active: path.is_empty(),
        });

        for (position, id) in path.iter().enumerate() {
            let node = tree.and_then(|tree| tree.node_by_id(id));
            crumbs.push(Breadcrumb {
                id: Some(id.clone()),
                name: node.map_or_else(|| id.clone(), |n| n.name.clone()),
                level: node.map_or(position as u32 + 1, |n| n.level),
                path_index: Some(position),
                active: position + 1 == path.len(),
            });
        }
        crumbs
    }

    /// Handle a breadcrumb click: the root sentinel resets, any other crumb
    /// truncates to its index.
    pub fn click_crumb(&self, drill: &mut DrillStateMachine, path_index: Option<usize>) -> DrillTransition {
        match path_index {
            Some(index) => drill.truncate_to(index),
            None => drill.reset(),
        }
    }

    /// Deepest active node's name and value, or the root label with the
    /// tree total.
    pub fn center_label(&self, tree: Option<&SunburstTree>, drill: &DrillStateMachine) -> CenterLabel {
        let deepest = tree.zip(drill.deepest()).and_then(|(tree, id)| tree.node_by_id(id));
        match deepest {
            Some(node) => CenterLabel {
                id: Some(node.id.clone()),
                name: node.name.clone(),
                display_value: node.display_value(),
            },
            None => CenterLabel {
                id: None,
                name: self.root_label.clone(),
                display_value: display_value(tree.map(SunburstTree::total), None),
            },
        }
    }
}
