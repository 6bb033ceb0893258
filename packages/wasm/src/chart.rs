//! SunburstChart - the composition root.
//!
//! The chart owns the annotated tree and search index, both rebuilt only when
//! new data arrives, and the interaction state that outlives a render. Every
//! output (wedges, breadcrumbs, center label, search results) is derived on
//! demand from those two halves.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ChartConfig;
use crate::error::Result;
use crate::geometry::{
    ArcGeometryEngine, LabelPlacementPolicy, Variant, WedgeLabel, WedgeShape,
};
use crate::interaction::{
    Breadcrumb, CenterLabel, DrillStateMachine, DrillTransition, HoverTracker,
    NavigationController, SearchIndex, SearchKey, SearchOutcome, SearchResults, SearchState,
    TooltipAnchor,
};
use crate::palette::CategoryTag;
use crate::spatial::{WedgeEntry, WedgeHitIndex};
use crate::tree::{NodeIndex, StatsNode, SunburstTree};

/// One wedge as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedWedge {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub value: Option<f64>,
    pub display_value: String,
    /// Unpadded angular span.
    pub start_angle: f64,
    pub end_angle: f64,
    pub center_angle: f64,
    pub visible: bool,
    pub dimmed: bool,
    /// On the active path.
    pub active: bool,
    /// Deepest entry of the active path.
    pub last_active: bool,
    pub hovered: bool,
    pub opacity: f64,
    pub category: CategoryTag,
    pub color: &'static str,
    /// `None` for a degenerate wedge.
    pub shape: Option<WedgeShape>,
    pub label: Option<WedgeLabel>,
}

/// An interactive sunburst chart over one stats tree.
pub struct SunburstChart {
    config: ChartConfig,
    variant: Variant,
    geometry: ArcGeometryEngine,
    labels: LabelPlacementPolicy,
    navigation: NavigationController,
    tree: Option<SunburstTree>,
    search_index: SearchIndex,
    drill: DrillStateMachine,
    search: SearchState,
    hover: HoverTracker,
    hit_index: WedgeHitIndex,
    hit_dirty: bool,
    revision: u64,
}

impl Default for SunburstChart {
    fn default() -> Self {
        Self::from_config(ChartConfig::default())
    }
}

impl SunburstChart {
    /// Create an empty chart. Fails if `config` does not validate.
    pub fn new(config: ChartConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: ChartConfig) -> Self {
        let geometry = ArcGeometryEngine::new(
            config.doughnut_radii.clone(),
            config.pie_radii.clone(),
            config.padding,
            config.center,
            config.hover_growth,
        );
        Self {
            variant: config.variant,
            geometry,
            labels: LabelPlacementPolicy::new(config.labels),
            navigation: NavigationController::new(config.root_label.clone()),
            tree: None,
            search_index: SearchIndex::default(),
            drill: DrillStateMachine::new(),
            search: SearchState::new(config.search_limit),
            hover: HoverTracker::new(config.tooltip_offset),
            hit_index: WedgeHitIndex::new(),
            hit_dirty: true,
            revision: 0,
            config,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Load a new tree.
    ///
    /// The tree is annotated and flattened here and nowhere else. The active
    /// path is pruned to the prefix that still exists in the new tree.
    pub fn set_data(&mut self, input: &StatsNode) -> Result<()> {
        let tree = SunburstTree::build(input)?;
        self.search_index = SearchIndex::flatten(&tree);

        self.drill.retain_valid(&tree);
        self.hover.retain(|id| tree.get(id).is_some());
        self.search.refresh(&self.search_index);

        info!(
            nodes = tree.len(),
            total = tree.total(),
            revision = self.revision + 1,
            "loaded stats tree"
        );
        self.tree = Some(tree);
        self.revision += 1;
        self.hit_index.clear();
        self.hit_dirty = true;
        Ok(())
    }

    /// Number of times data has been loaded.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The annotated tree, once data has been loaded.
    pub fn tree(&self) -> Option<&SunburstTree> {
        self.tree.as_ref()
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Switch radius preset. Returns whether it changed.
    pub fn set_variant(&mut self, variant: Variant) -> bool {
        if variant == self.variant {
            return false;
        }
        debug!(%variant, "switched chart variant");
        self.variant = variant;
        self.hit_dirty = true;
        true
    }

    // =========================================================================
    // Outputs
    // =========================================================================

    /// Every non-root node in depth-first order.
    pub fn wedges(&self) -> Vec<RenderedWedge> {
        let Some(tree) = self.tree.as_ref() else {
            return Vec::new();
        };
        tree.descendants()
            .map(|index| self.render_wedge(tree, index))
            .collect()
    }

    fn render_wedge(&self, tree: &SunburstTree, index: NodeIndex) -> RenderedWedge {
        let node = tree.node(index);
        let visible = self.drill.visible(tree, index);
        let dimmed = self.drill.dimmed(tree, index);
        let active = self.drill.is_active(&node.id);
        let last_active = self.drill.is_last_active(&node.id);
        let hovered = self.hover.is_hovered(&node.id);
        let highlighted = hovered || last_active;

        let shape = self.geometry.wedge_geometry(
            node.level,
            node.start_angle,
            node.end_angle,
            self.variant,
            highlighted,
            visible,
        );
        let label = match (&shape, visible) {
            (Some(shape), true) => self.labels.place(node, shape, self.geometry.center()),
            _ => None,
        };

        let category = tree
            .top_level_ancestor(index)
            .map_or(CategoryTag::General, |top| {
                CategoryTag::classify(&tree.node(top).name)
            });
        let opacity = if !visible {
            0.0
        } else if dimmed {
            self.config.dimmed_opacity
        } else {
            1.0
        };

        RenderedWedge {
            id: node.id.clone(),
            name: node.name.clone(),
            level: node.level,
            value: node.value,
            display_value: node.display_value(),
            start_angle: node.start_angle,
            end_angle: node.end_angle,
            center_angle: node.center_angle,
            visible,
            dimmed,
            active,
            last_active,
            hovered,
            opacity,
            category,
            color: category.shade(node.level, highlighted),
            shape,
            label,
        }
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.navigation.breadcrumbs(self.tree.as_ref(), &self.drill)
    }

    pub fn center_label(&self) -> CenterLabel {
        self.navigation.center_label(self.tree.as_ref(), &self.drill)
    }

    pub fn active_path(&self) -> &[String] {
        self.drill.active_path()
    }

    // =========================================================================
    // Drill-down
    // =========================================================================

    /// Click on wedge `id`.
    pub fn click_node(&mut self, id: &str) -> DrillTransition {
        let transition = match self.tree.as_ref() {
            Some(tree) => self.drill.click(tree, id),
            None => DrillTransition::Ignored,
        };
        self.mark(transition)
    }

    pub fn click_outside(&mut self) -> DrillTransition {
        let transition = self.drill.click_outside();
        self.mark(transition)
    }

    /// Click on a breadcrumb; `None` is the root sentinel.
    pub fn click_breadcrumb(&mut self, path_index: Option<usize>) -> DrillTransition {
        let transition = self.navigation.click_crumb(&mut self.drill, path_index);
        self.mark(transition)
    }

    pub fn reset_to_root(&mut self) -> DrillTransition {
        let transition = self.drill.reset();
        self.mark(transition)
    }

    fn mark(&mut self, transition: DrillTransition) -> DrillTransition {
        if transition.changed() {
            self.hit_dirty = true;
        }
        transition
    }

    // =========================================================================
    // Hover
    // =========================================================================

    pub fn hover_enter(&mut self, id: &str) -> bool {
        let changed = self.hover.enter(id);
        self.hit_dirty |= changed;
        changed
    }

    pub fn hover_leave(&mut self) -> bool {
        let changed = self.hover.leave();
        self.hit_dirty |= changed;
        changed
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hover.hovered()
    }

    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        container_left: f64,
        container_top: f64,
    ) -> TooltipAnchor {
        self.hover
            .pointer_move(client_x, client_y, container_left, container_top)
    }

    /// Id of the deepest visible wedge under chart point `(x, y)`.
    ///
    /// The R-tree is rebuilt lazily after any change to the wedge list.
    pub fn hit_test(&mut self, x: f64, y: f64) -> Option<String> {
        if self.hit_dirty {
            let center = self.geometry.center();
            let entries: Vec<WedgeEntry> = self
                .wedges()
                .into_iter()
                .filter(|wedge| wedge.visible)
                .filter_map(|wedge| {
                    let shape = wedge.shape?;
                    Some(WedgeEntry::new(wedge.id, wedge.level, center, &shape))
                })
                .collect();
            debug!(wedges = entries.len(), "rebuilt wedge hit index");
            self.hit_index.rebuild(entries);
            self.hit_dirty = false;
        }
        self.hit_index.hit(x, y).map(str::to_string)
    }

    // =========================================================================
    // Search
    // =========================================================================

    pub fn set_search_query(&mut self, query: &str) {
        self.search.set_query(&self.search_index, query);
    }

    /// Handle a DOM key name in the search box.
    pub fn search_key(&mut self, key: &str) -> SearchOutcome {
        let Some(key) = SearchKey::from_dom_key(key) else {
            return SearchOutcome::Unhandled;
        };
        let outcome = self.search.key(key);
        if let SearchOutcome::Selected(position) = outcome {
            self.jump_to_item(position);
        }
        outcome
    }

    pub fn search_results(&self) -> SearchResults {
        self.search.results(&self.search_index)
    }

    /// Select the `displayed_index`-th visible result.
    pub fn select_search_result(&mut self, displayed_index: usize) -> DrillTransition {
        match self.search.select(displayed_index) {
            Some(position) => self.jump_to_item(position),
            None => DrillTransition::Ignored,
        }
    }

    fn jump_to_item(&mut self, position: usize) -> DrillTransition {
        let Some(item) = self.search_index.item(position) else {
            return DrillTransition::Ignored;
        };
        debug!(id = %item.id, "selected search result");
        let transition = self.drill.jump_to(item.path());
        self.mark(transition)
    }
}
