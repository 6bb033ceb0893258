//! SunburstTree - the annotated arena built once per input tree.
//!
//! The input tree is cloned, aggregated and partitioned, then loaded into a
//! petgraph StableGraph so that parent, sibling and ancestor lookups are O(1)
//! per step instead of a scan over a flattened node list.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::aggregate::aggregated;
use super::node::{StatsNode, display_value};
use super::partition::assign_full_circle;
use crate::error::{Result, SunburstError};

/// A node after aggregation and partitioning.
#[derive(Debug, Clone, PartialEq)]
pub struct SunburstNode {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    /// Aggregated value; `None` only for leaves without data.
    pub value: Option<f64>,
    pub suffix: Option<String>,
    /// Depth in the tree (root = 0).
    pub level: u32,
    pub start_angle: f64,
    pub end_angle: f64,
    pub center_angle: f64,
}

impl SunburstNode {
    fn from_partitioned(node: &StatsNode, level: u32) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            short_name: node.short_name.clone(),
            value: node.value,
            suffix: node.suffix.clone(),
            level,
            start_angle: node.start_angle.unwrap_or_default(),
            end_angle: node.end_angle.unwrap_or_default(),
            center_angle: node.center_angle.unwrap_or_default(),
        }
    }

    /// Width of the unpadded angular span.
    #[inline]
    pub fn angular_width(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Value formatted for labels and tooltips.
    pub fn display_value(&self) -> String {
        display_value(self.value, self.suffix.as_deref())
    }
}

/// Annotated tree with stable indices and explicit parent links.
///
/// Edges point parent → child and carry the child's position among its
/// siblings, which keeps angular order independent of edge iteration order.
pub struct SunburstTree {
    graph: StableGraph<SunburstNode, usize, Directed>,
    index_of: HashMap<String, NodeIndex>,
    /// Depth-first pre-order, root first.
    order: Vec<NodeIndex>,
    root: NodeIndex,
}

impl SunburstTree {
    /// Clone, aggregate and partition `input`, then index the result.
    ///
    /// The caller's tree is never modified. Fails only when two nodes share
    /// an id, since parent lookup by id would be ambiguous.
    pub fn build(input: &StatsNode) -> Result<Self> {
        let mut working = aggregated(input);
        assign_full_circle(&mut working);

        let capacity = working.subtree_len();
        let mut tree = Self {
            graph: StableGraph::with_capacity(capacity, capacity.saturating_sub(1)),
            index_of: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            root: NodeIndex::new(0),
        };
        tree.root = tree.insert(&working, None, 0, 0)?;

        debug!(nodes = tree.len(), total = tree.total(), "annotated stats tree");
        Ok(tree)
    }

    fn insert(
        &mut self,
        node: &StatsNode,
        parent: Option<NodeIndex>,
        ordinal: usize,
        depth: u32,
    ) -> Result<NodeIndex> {
        if self.index_of.contains_key(&node.id) {
            return Err(SunburstError::DuplicateId(node.id.clone()));
        }
        if node.level != 0 && node.level != depth {
            warn!(id = %node.id, given = node.level, depth, "normalizing node level");
        }

        let index = self.graph.add_node(SunburstNode::from_partitioned(node, depth));
        self.index_of.insert(node.id.clone(), index);
        self.order.push(index);
        if let Some(parent) = parent {
            self.graph.add_edge(parent, index, ordinal);
        }

        for (child_ordinal, child) in node.children.iter().enumerate() {
            self.insert(child, Some(index), child_ordinal, depth + 1)?;
        }
        Ok(index)
    }

    /// The synthetic root (level 0).
    #[inline]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Node data by index.
    ///
    /// Indices come from this tree, so they are always live.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &SunburstNode {
        &self.graph[index]
    }

    /// Look up a node index by id.
    pub fn get(&self, id: &str) -> Option<NodeIndex> {
        self.index_of.get(id).copied()
    }

    /// Look up node data by id.
    pub fn node_by_id(&self, id: &str) -> Option<&SunburstNode> {
        self.get(id).map(|index| self.node(index))
    }

    /// Parent of a node, `None` for the root.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(index, Direction::Incoming)
            .next()
    }

    /// Children in angular order.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut ordered: Vec<(usize, NodeIndex)> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect();
        ordered.sort_unstable_by_key(|&(ordinal, _)| ordinal);
        ordered.into_iter().map(|(_, child)| child).collect()
    }

    /// Ancestors of a node from the top-level category down to the direct
    /// parent. The root is never included.
    pub fn ancestors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut chain = Vec::new();
        let mut current = self.parent(index);
        while let Some(ancestor) = current {
            if ancestor == self.root {
                break;
            }
            chain.push(ancestor);
            current = self.parent(ancestor);
        }
        chain.reverse();
        chain
    }

    /// Ids from the top-level ancestor down to `id` inclusive.
    ///
    /// `None` for unknown ids, for the root itself, and for a node whose
    /// chain does not end at the root.
    pub fn path_to(&self, id: &str) -> Option<Vec<String>> {
        let index = self.get(id)?;
        if index == self.root {
            return None;
        }

        let ancestors = self.ancestors(index);
        let top = ancestors.first().copied().unwrap_or(index);
        if self.parent(top) != Some(self.root) {
            return None;
        }

        let mut path: Vec<String> = ancestors
            .into_iter()
            .map(|ancestor| self.node(ancestor).id.clone())
            .collect();
        path.push(self.node(index).id.clone());
        Some(path)
    }

    /// The level-1 category a node belongs to (the node itself at level 1).
    pub fn top_level_ancestor(&self, index: NodeIndex) -> Option<NodeIndex> {
        if index == self.root {
            return None;
        }
        self.ancestors(index).first().copied().or(Some(index))
    }

    /// Every non-root node in depth-first, children-in-order sequence.
    pub fn descendants(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.order.iter().copied().skip(1)
    }

    /// Number of nodes, including the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// A built tree always holds at least the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Aggregated total of the whole tree.
    pub fn total(&self) -> f64 {
        self.node(self.root).value.unwrap_or(0.0)
    }
}
