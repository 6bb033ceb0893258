//! Per-variant radius tables.
//!
//! A table maps tree level to the ring band the level occupies. Level 1 is
//! the first entry; levels deeper than the table reuse its last entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SunburstError;

/// Radius preset for the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Narrow concentric rings around a blank disc for the center label.
    #[default]
    Doughnut,
    /// Level 1 fills a large solid disc; deeper levels are thin outer rings.
    Pie,
}

impl Variant {
    /// Name used on the JS side.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Doughnut => "doughnut",
            Self::Pie => "pie",
        }
    }
}

impl FromStr for Variant {
    type Err = SunburstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doughnut" | "donut" => Ok(Self::Doughnut),
            "pie" => Ok(Self::Pie),
            _ => Err(SunburstError::UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Radial extent of one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingBand {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl RingBand {
    /// Create a band.
    #[inline]
    pub const fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
        }
    }

    /// Radius halfway through the band.
    #[inline]
    pub fn mid_radius(self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Zero or negative thickness draws nothing.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.inner_radius >= self.outer_radius
    }
}

/// Level → band lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadiusTable {
    bands: Vec<RingBand>,
}

impl RadiusTable {
    /// Create a table; `bands[0]` is level 1.
    pub fn new(bands: Vec<RingBand>) -> Self {
        Self { bands }
    }

    /// Default doughnut table: four narrow rings around a 70px disc.
    pub fn doughnut() -> Self {
        Self::new(vec![
            RingBand::new(70.0, 110.0),
            RingBand::new(114.0, 144.0),
            RingBand::new(148.0, 172.0),
            RingBand::new(176.0, 194.0),
        ])
    }

    /// Default pie table: a solid level-1 disc and thin outer rings.
    pub fn pie() -> Self {
        Self::new(vec![
            RingBand::new(0.0, 110.0),
            RingBand::new(114.0, 136.0),
            RingBand::new(140.0, 158.0),
            RingBand::new(162.0, 176.0),
        ])
    }

    /// Band for `level`. The root (level 0) has no band.
    pub fn band(&self, level: u32) -> Option<RingBand> {
        if level == 0 || self.bands.is_empty() {
            return None;
        }
        let slot = (level as usize - 1).min(self.bands.len() - 1);
        self.bands.get(slot).copied()
    }

    /// Number of explicitly configured levels.
    #[inline]
    pub fn depth(&self) -> usize {
        self.bands.len()
    }

    /// All bands, level 1 first.
    pub fn bands(&self) -> &[RingBand] {
        &self.bands
    }
}
