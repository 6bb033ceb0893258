//! Stats tree node type.
//!
//! A `StatsNode` is the element of the hierarchical input. Each node has:
//! - A string id, unique within the tree
//! - A display name and an optional abbreviation
//! - An optional raw value (null means "no data", shown as `--`)
//! - Ordered children; order decides angular order in the chart
//! - Angles, filled in by the partition pass

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown for a node without data.
pub const NO_DATA: &str = "--";

/// One node of the statistics tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsNode {
    /// Unique id within the tree.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Pre-set abbreviation used when the wedge is too small for the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Raw value. Overwritten with the subtree sum for internal nodes.
    #[serde(default)]
    pub value: Option<f64>,
    /// Children in angular order.
    #[serde(
        default,
        deserialize_with = "children_or_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<StatsNode>,
    /// Depth in the tree (root = 0).
    #[serde(default)]
    pub level: u32,
    /// Start of the angular span, radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_angle: Option<f64>,
    /// End of the angular span, radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_angle: Option<f64>,
    /// Midpoint of the angular span, radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_angle: Option<f64>,
    /// Display suffix such as `%`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// `children: null` is accepted as a leaf.
fn children_or_empty<'de, D>(deserializer: D) -> Result<Vec<StatsNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<StatsNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl StatsNode {
    /// Create a leaf node.
    pub fn leaf(id: impl Into<String>, name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_name: None,
            value,
            children: Vec::new(),
            level: 0,
            start_angle: None,
            end_angle: None,
            center_angle: None,
            suffix: None,
        }
    }

    /// Create an internal node with the given children.
    pub fn branch(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<StatsNode>,
    ) -> Self {
        Self {
            children,
            ..Self::leaf(id, name, None)
        }
    }

    /// Set the display suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// A node with no children is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Angular width after partitioning, 0 before.
    pub fn angular_width(&self) -> f64 {
        match (self.start_angle, self.end_angle) {
            (Some(start), Some(end)) => end - start,
            _ => 0.0,
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(StatsNode::subtree_len).sum::<usize>()
    }
}

/// Format a value for display.
///
/// Whole numbers print without decimals, everything else with one decimal.
/// A missing value prints as [`NO_DATA`] and never carries the suffix.
pub fn display_value(value: Option<f64>, suffix: Option<&str>) -> String {
    let Some(v) = value else {
        return NO_DATA.to_string();
    };
    let number = if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    };
    match suffix {
        Some(suffix) => format!("{number}{suffix}"),
        None => number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "root",
            "name": "All Stats",
            "level": 0,
            "children": [
                {"id": "att", "name": "Attacking", "shortName": "ATT", "level": 1,
                 "children": [{"id": "goals", "name": "Goals", "value": 3, "level": 2}]},
                {"id": "pos", "name": "Possession", "value": null, "suffix": "%", "children": null}
            ]
        }"#;
        let node: StatsNode = serde_json::from_str(json).unwrap();

        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].short_name.as_deref(), Some("ATT"));
        assert_eq!(node.children[0].children[0].value, Some(3.0));
        assert!(node.children[1].is_leaf());
        assert_eq!(node.children[1].value, None);
        assert_eq!(node.children[1].suffix.as_deref(), Some("%"));
        assert_eq!(node.start_angle, None);
    }

    #[test]
    fn test_missing_fields_default() {
        let node: StatsNode = serde_json::from_str(r#"{"id": "x", "name": "X"}"#).unwrap();
        assert!(node.is_leaf());
        assert_eq!(node.value, None);
        assert_eq!(node.level, 0);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(None, None), "--");
        assert_eq!(display_value(None, Some("%")), "--");
        assert_eq!(display_value(Some(0.0), None), "0");
        assert_eq!(display_value(Some(40.0), None), "40");
        assert_eq!(display_value(Some(62.5), Some("%")), "62.5%");
        assert_eq!(display_value(Some(7.84), None), "7.8");
    }

    #[test]
    fn test_subtree_len() {
        let tree = StatsNode::branch(
            "root",
            "All",
            vec![
                StatsNode::branch("a", "A", vec![StatsNode::leaf("a1", "A1", Some(1.0))]),
                StatsNode::leaf("b", "B", None),
            ],
        );
        assert_eq!(tree.subtree_len(), 4);
    }
}
