//! User interaction state.
//!
//! Drill-down, breadcrumbs, search and hover are plain state machines that
//! read the annotated tree; none of them mutate it. The DOM listener for
//! clicks outside the chart only exists on wasm32.

pub mod drill;
pub mod hover;
pub mod navigation;
#[cfg(target_arch = "wasm32")]
pub mod outside;
pub mod search;

pub use drill::{DrillStateMachine, DrillTransition};
pub use hover::{HoverTracker, TooltipAnchor};
pub use navigation::{Breadcrumb, CenterLabel, DEFAULT_ROOT_LABEL, NavigationController};
#[cfg(target_arch = "wasm32")]
pub use outside::OutsideClickGuard;
pub use search::{SearchIndex, SearchItem, SearchKey, SearchOutcome, SearchResults, SearchState};
