//! Stats Sunburst - WASM Module
//!
//! This module provides the core data structures and algorithms for an
//! interactive sunburst / doughnut chart over a hierarchy of named numeric
//! statistics. It is compiled to WebAssembly and exposes a JavaScript-friendly
//! API via wasm-bindgen; rendering is left to the host.
//!
//! # Architecture
//!
//! - `tree`: Aggregation, angular partitioning and the annotated arena
//! - `geometry`: Radius tables, annular sector paths and label placement
//! - `interaction`: Drill-down, breadcrumbs, search and hover state
//! - `palette`: Category classification and colors
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `chart`: The composition root tying the above together

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod palette;
pub mod spatial;
pub mod tree;

pub use chart::{RenderedWedge, SunburstChart};
pub use config::ChartConfig;
pub use error::SunburstError;
pub use tree::StatsNode;

use geometry::Variant;
use interaction::SearchOutcome;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    let _ = tracing_wasm::try_set_as_global_default();
}

/// Main entry point for the chart engine.
///
/// This struct wraps the internal SunburstChart and provides the public API
/// exposed to JavaScript. Structured values cross the boundary as plain JS
/// objects through serde-wasm-bindgen.
#[wasm_bindgen]
pub struct StatsSunburstWasm {
    chart: Rc<RefCell<SunburstChart>>,
    #[cfg(target_arch = "wasm32")]
    outside: Option<interaction::OutsideClickGuard>,
}

#[wasm_bindgen]
impl StatsSunburstWasm {
    /// Create a chart. `config` may be omitted, or hold any subset of the
    /// `ChartConfig` fields.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<StatsSunburstWasm, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            ChartConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| SunburstError::InvalidConfig(e.to_string()))?
        };
        let chart = SunburstChart::new(config)?;
        Ok(Self {
            chart: Rc::new(RefCell::new(chart)),
            #[cfg(target_arch = "wasm32")]
            outside: None,
        })
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Load a stats tree. The object is copied; it is never modified.
    #[wasm_bindgen(js_name = setData)]
    pub fn set_data(&self, tree: JsValue) -> Result<(), JsValue> {
        let input: StatsNode = serde_wasm_bindgen::from_value(tree)
            .map_err(|e| SunburstError::InvalidTree(e.to_string()))?;
        self.chart.borrow_mut().set_data(&input)?;
        Ok(())
    }

    /// Switch to `"doughnut"` or `"pie"`. Returns whether the variant changed.
    #[wasm_bindgen(js_name = setVariant)]
    pub fn set_variant(&self, name: &str) -> Result<bool, JsValue> {
        let variant: Variant = name.parse()?;
        Ok(self.chart.borrow_mut().set_variant(variant))
    }

    /// Current variant name.
    pub fn variant(&self) -> String {
        self.chart.borrow().variant().to_string()
    }

    // =========================================================================
    // Outputs
    // =========================================================================

    /// All non-root wedges with geometry, visibility, label and color.
    pub fn wedges(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.chart.borrow().wedges())?)
    }

    /// Breadcrumb trail starting with the root sentinel.
    pub fn breadcrumbs(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.chart.borrow().breadcrumbs())?)
    }

    /// Active path as an array of ids.
    #[wasm_bindgen(js_name = activePath)]
    pub fn active_path(&self) -> Vec<String> {
        self.chart.borrow().active_path().to_vec()
    }

    /// Name and value for the center of the chart.
    #[wasm_bindgen(js_name = centerLabel)]
    pub fn center_label(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.chart.borrow().center_label())?)
    }

    // =========================================================================
    // Drill-down
    // =========================================================================

    /// Click on a wedge. Returns whether the active path changed.
    #[wasm_bindgen(js_name = clickNode)]
    pub fn click_node(&self, id: &str) -> bool {
        self.chart.borrow_mut().click_node(id).changed()
    }

    /// Click outside the chart.
    #[wasm_bindgen(js_name = clickOutside)]
    pub fn click_outside(&self) -> bool {
        self.chart.borrow_mut().click_outside().changed()
    }

    /// Click a breadcrumb by its `pathIndex`; omit it for the root crumb.
    #[wasm_bindgen(js_name = clickBreadcrumb)]
    pub fn click_breadcrumb(&self, path_index: Option<u32>) -> bool {
        self.chart
            .borrow_mut()
            .click_breadcrumb(path_index.map(|i| i as usize))
            .changed()
    }

    /// Clear the active path.
    #[wasm_bindgen(js_name = resetToRoot)]
    pub fn reset_to_root(&self) -> bool {
        self.chart.borrow_mut().reset_to_root().changed()
    }

    // =========================================================================
    // Hover
    // =========================================================================

    #[wasm_bindgen(js_name = hoverEnter)]
    pub fn hover_enter(&self, id: &str) -> bool {
        self.chart.borrow_mut().hover_enter(id)
    }

    #[wasm_bindgen(js_name = hoverLeave)]
    pub fn hover_leave(&self) -> bool {
        self.chart.borrow_mut().hover_leave()
    }

    /// Tooltip anchor `{x, y}` relative to the container.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(
        &self,
        client_x: f64,
        client_y: f64,
        container_left: f64,
        container_top: f64,
    ) -> Result<JsValue, JsValue> {
        let anchor = self.chart.borrow_mut().pointer_move(
            client_x,
            client_y,
            container_left,
            container_top,
        );
        Ok(serde_wasm_bindgen::to_value(&anchor)?)
    }

    /// Id of the deepest visible wedge at chart coordinates `(x, y)`.
    #[wasm_bindgen(js_name = hitTest)]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<String> {
        self.chart.borrow_mut().hit_test(x, y)
    }

    // =========================================================================
    // Search
    // =========================================================================

    #[wasm_bindgen(js_name = setSearchQuery)]
    pub fn set_search_query(&self, query: &str) {
        self.chart.borrow_mut().set_search_query(query);
    }

    /// Handle a `KeyboardEvent.key` in the search box.
    ///
    /// Returns `"moved"`, `"selected"`, `"cancelled"` or `"unhandled"`.
    #[wasm_bindgen(js_name = searchKey)]
    pub fn search_key(&self, key: &str) -> String {
        let outcome = self.chart.borrow_mut().search_key(key);
        match outcome {
            SearchOutcome::Moved => "moved",
            SearchOutcome::Selected(_) => "selected",
            SearchOutcome::Cancelled => "cancelled",
            SearchOutcome::Unhandled => "unhandled",
        }
        .to_string()
    }

    #[wasm_bindgen(js_name = searchResults)]
    pub fn search_results(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.chart.borrow().search_results())?)
    }

    /// Select a displayed search result. Returns whether the path changed.
    #[wasm_bindgen(js_name = selectSearchResult)]
    pub fn select_search_result(&self, index: usize) -> bool {
        self.chart.borrow_mut().select_search_result(index).changed()
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl StatsSunburstWasm {
    /// Reset the active path on clicks outside `container`, calling
    /// `on_change` whenever that changes the path. Mounting again replaces
    /// the previous listener.
    pub fn mount(&mut self, container: web_sys::Element, on_change: js_sys::Function) -> Result<(), JsValue> {
        let chart = Rc::downgrade(&self.chart);
        let guard = interaction::OutsideClickGuard::register(container, move || {
            let Some(chart) = chart.upgrade() else {
                return;
            };
            let changed = match chart.try_borrow_mut() {
                Ok(mut chart) => chart.click_outside().changed(),
                Err(_) => false,
            };
            if changed {
                if let Err(err) = on_change.call0(&JsValue::NULL) {
                    tracing::warn!(?err, "onChange callback failed");
                }
            }
        })?;
        self.outside = Some(guard);
        Ok(())
    }

    /// Remove the outside-click listener. Returns whether one was mounted.
    pub fn unmount(&mut self) -> bool {
        self.outside.take().is_some()
    }
}
