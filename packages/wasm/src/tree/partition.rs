//! Proportional angular partitioning.
//!
//! Each node's span is divided among its children in array order, each child
//! receiving a share proportional to its aggregated value. A subtree whose
//! total is zero is split evenly so every child still gets a usable wedge.
//! No gaps are introduced here; padding is applied when drawing.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::node::StatsNode;

/// Root span start: 12 o'clock.
pub const ROOT_START_ANGLE: f64 = -FRAC_PI_2;

/// Root span end: a full clockwise turn from 12 o'clock.
pub const ROOT_END_ANGLE: f64 = -FRAC_PI_2 + TAU;

/// Assign `[start_angle, end_angle]` to `node` and recursively to its children.
///
/// Expects `node` to be aggregated already.
pub fn assign_angles(node: &mut StatsNode, start_angle: f64, end_angle: f64) {
    node.start_angle = Some(start_angle);
    node.end_angle = Some(end_angle);
    node.center_angle = Some((start_angle + end_angle) / 2.0);

    if node.is_leaf() {
        return;
    }

    let span = end_angle - start_angle;
    let total = node.value.unwrap_or(0.0);
    let child_count = node.children.len() as f64;

    let mut cursor = start_angle;
    for child in &mut node.children {
        let child_span = if total > 0.0 {
            child.value.unwrap_or(0.0) / total * span
        } else {
            span / child_count
        };
        assign_angles(child, cursor, cursor + child_span);
        cursor += child_span;
    }
}

/// Partition `root` over the full circle.
pub fn assign_full_circle(root: &mut StatsNode) {
    assign_angles(root, ROOT_START_ANGLE, ROOT_END_ANGLE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::aggregate::aggregate;

    const EPS: f64 = 1e-9;

    fn span(node: &StatsNode) -> f64 {
        node.angular_width()
    }

    #[test]
    fn test_root_is_full_circle() {
        let mut root = StatsNode::branch("root", "All", vec![StatsNode::leaf("a", "A", Some(1.0))]);
        aggregate(&mut root);
        assign_full_circle(&mut root);

        assert_eq!(root.start_angle, Some(-FRAC_PI_2));
        assert!((span(&root) - TAU).abs() < EPS);
        assert!((root.center_angle.unwrap() - (FRAC_PI_2)).abs() < EPS);
    }

    #[test]
    fn test_proportional_split() {
        let mut a = StatsNode::branch(
            "A",
            "A",
            vec![
                StatsNode::leaf("A1", "A1", Some(30.0)),
                StatsNode::leaf("A2", "A2", Some(10.0)),
            ],
        );
        aggregate(&mut a);
        assign_angles(&mut a, 0.0, 4.0);

        assert!((span(&a.children[0]) - 3.0).abs() < EPS);
        assert!((span(&a.children[1]) - 1.0).abs() < EPS);
        assert_eq!(a.children[0].start_angle, Some(0.0));
        assert_eq!(a.children[1].start_angle, a.children[0].end_angle);
        assert!((a.children[1].end_angle.unwrap() - 4.0).abs() < EPS);
    }

    #[test]
    fn test_zero_total_splits_evenly() {
        let mut a = StatsNode::branch(
            "A",
            "A",
            vec![
                StatsNode::leaf("A1", "A1", Some(0.0)),
                StatsNode::leaf("A2", "A2", None),
                StatsNode::leaf("A3", "A3", Some(0.0)),
            ],
        );
        aggregate(&mut a);
        assign_angles(&mut a, 0.0, 3.0);

        for child in &a.children {
            let s = span(child);
            assert!(s.is_finite(), "span must be finite, got {s}");
            assert!((s - 1.0).abs() < EPS, "expected equal spans of 1.0, got {s}");
        }
    }

    #[test]
    fn test_zero_valued_sibling_gets_empty_span() {
        let mut a = StatsNode::branch(
            "A",
            "A",
            vec![
                StatsNode::leaf("A1", "A1", Some(5.0)),
                StatsNode::leaf("A2", "A2", Some(0.0)),
            ],
        );
        aggregate(&mut a);
        assign_angles(&mut a, 0.0, 1.0);

        assert!((span(&a.children[0]) - 1.0).abs() < EPS);
        assert!(span(&a.children[1]).abs() < EPS);
    }

    #[test]
    fn test_nested_spans_conserved() {
        let mut root = StatsNode::branch(
            "root",
            "All",
            vec![
                StatsNode::branch(
                    "att",
                    "Attacking",
                    vec![
                        StatsNode::leaf("goals", "Goals", Some(3.0)),
                        StatsNode::leaf("shots", "Shots", Some(9.0)),
                    ],
                ),
                StatsNode::leaf("def", "Defending", Some(4.0)),
            ],
        );
        aggregate(&mut root);
        assign_full_circle(&mut root);

        let att = &root.children[0];
        let child_sum: f64 = att.children.iter().map(span).sum();
        assert!((child_sum - span(att)).abs() < EPS);
        assert!((span(att) - TAU * 0.75).abs() < EPS);
    }
}
