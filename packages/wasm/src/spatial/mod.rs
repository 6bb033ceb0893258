//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree over drawn wedges so that a canvas host can
//! map a pointer position back to the node under it.

mod rtree;

pub use rtree::{WedgeEntry, WedgeHitIndex};
