//! Wedge geometry for the radial chart.
//!
//! This module maps a node's (level, start angle, end angle) to an annular
//! sector in chart coordinates and decides how each wedge is labelled.
//! Angles are radians, measured clockwise on screen from the positive x axis,
//! so `-PI/2` is 12 o'clock.

pub mod arc;
pub mod label;
pub mod radius;

pub use arc::{ArcGeometryEngine, ArcPadding, WedgeShape};
pub use label::{LabelPlacementPolicy, LabelThresholds, WedgeLabel, short_name};
pub use radius::{RadiusTable, RingBand, Variant};

use serde::{Deserialize, Serialize};

/// A point in chart coordinates (y grows downward, as in SVG and canvas).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point at `radius` and `angle` around `self`.
    #[inline]
    pub fn polar(self, radius: f64, angle: f64) -> Self {
        Self {
            x: self.x + radius * angle.cos(),
            y: self.y + radius * angle.sin(),
        }
    }
}
