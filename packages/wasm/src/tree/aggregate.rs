//! Bottom-up subtree totals.
//!
//! Leaves keep their raw value (a missing value counts as 0 but stays `None`
//! so the chart can still show "no data"). Every internal node has its value
//! replaced by the sum of its children, whatever the caller supplied.

use super::node::StatsNode;

/// Aggregate `node` in place and return its total.
pub fn aggregate(node: &mut StatsNode) -> f64 {
    if node.is_leaf() {
        return node.value.unwrap_or(0.0);
    }

    let total: f64 = node.children.iter_mut().map(aggregate).sum();
    node.value = Some(total);
    total
}

/// Aggregate a copy of `input`, leaving the caller's tree untouched.
pub fn aggregated(input: &StatsNode) -> StatsNode {
    let mut working = input.clone();
    aggregate(&mut working);
    working
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_value_untouched() {
        let mut leaf = StatsNode::leaf("a", "A", Some(7.0));
        assert_eq!(aggregate(&mut leaf), 7.0);
        assert_eq!(leaf.value, Some(7.0));
    }

    #[test]
    fn test_null_leaf_counts_as_zero_but_stays_null() {
        let mut tree = StatsNode::branch(
            "a",
            "A",
            vec![
                StatsNode::leaf("a1", "A1", None),
                StatsNode::leaf("a2", "A2", Some(5.0)),
            ],
        );
        assert_eq!(aggregate(&mut tree), 5.0);
        assert_eq!(tree.value, Some(5.0));
        assert_eq!(tree.children[0].value, None);
    }

    #[test]
    fn test_internal_value_overwritten() {
        let mut parent = StatsNode::branch(
            "a",
            "A",
            vec![
                StatsNode::leaf("a1", "A1", Some(30.0)),
                StatsNode::leaf("a2", "A2", Some(10.0)),
            ],
        );
        parent.value = Some(999.0);

        assert_eq!(aggregate(&mut parent), 40.0);
        assert_eq!(parent.value, Some(40.0));
    }

    #[test]
    fn test_deep_tree_sums_every_level() {
        let mut root = StatsNode::branch(
            "root",
            "All",
            vec![
                StatsNode::branch(
                    "att",
                    "Attacking",
                    vec![
                        StatsNode::branch(
                            "shots",
                            "Shots",
                            vec![
                                StatsNode::leaf("on", "On Target", Some(4.0)),
                                StatsNode::leaf("off", "Off Target", Some(6.0)),
                            ],
                        ),
                        StatsNode::leaf("goals", "Goals", Some(2.0)),
                    ],
                ),
                StatsNode::leaf("def", "Defending", Some(8.0)),
            ],
        );

        assert_eq!(aggregate(&mut root), 20.0);
        assert_eq!(root.children[0].value, Some(12.0));
        assert_eq!(root.children[0].children[0].value, Some(10.0));
    }

    #[test]
    fn test_aggregated_does_not_mutate_input() {
        let input = StatsNode::branch("a", "A", vec![StatsNode::leaf("a1", "A1", Some(3.0))]);
        let output = aggregated(&input);

        assert_eq!(input.value, None);
        assert_eq!(output.value, Some(3.0));
    }

    #[test]
    fn test_all_null_subtree_aggregates_to_zero() {
        let mut tree = StatsNode::branch(
            "a",
            "A",
            vec![StatsNode::leaf("a1", "A1", None), StatsNode::leaf("a2", "A2", None)],
        );
        assert_eq!(aggregate(&mut tree), 0.0);
        assert_eq!(tree.value, Some(0.0));
    }
}
