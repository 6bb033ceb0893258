//! Chart configuration.
//!
//! Every field has a default, so a host can pass `{}` or only the fields it
//! wants to override.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SunburstError};
use crate::geometry::{ArcPadding, LabelThresholds, Point, RadiusTable, Variant};
use crate::interaction::{DEFAULT_ROOT_LABEL, TooltipAnchor};

/// Configuration for a sunburst chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Initial radius preset.
    pub variant: Variant,
    /// Chart center in output coordinates.
    pub center: Point,
    /// Radius table for the doughnut preset.
    pub doughnut_radii: RadiusTable,
    /// Radius table for the pie preset.
    pub pie_radii: RadiusTable,
    /// Angular padding per wedge end.
    pub padding: ArcPadding,
    /// Outer radius growth of a hovered or active wedge, pixels.
    pub hover_growth: f64,
    /// Opacity of dimmed wedges.
    pub dimmed_opacity: f64,
    /// Label thresholds.
    pub labels: LabelThresholds,
    /// Tooltip offset from the pointer.
    pub tooltip_offset: TooltipAnchor,
    /// Maximum number of search results shown.
    pub search_limit: usize,
    /// Name of the root breadcrumb and the empty center label.
    pub root_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Doughnut,
            center: Point::new(200.0, 200.0),
            doughnut_radii: RadiusTable::doughnut(),
            pie_radii: RadiusTable::pie(),
            padding: ArcPadding::default(),
            hover_growth: 6.0,
            dimmed_opacity: 0.35,
            labels: LabelThresholds::default(),
            tooltip_offset: TooltipAnchor { x: 12.0, y: 12.0 },
            search_limit: 20,
            root_label: DEFAULT_ROOT_LABEL.to_string(),
        }
    }
}

impl ChartConfig {
    /// Reject values that would produce a broken chart.
    pub fn validate(&self) -> Result<()> {
        if self.doughnut_radii.depth() == 0 || self.pie_radii.depth() == 0 {
            return Err(SunburstError::InvalidConfig(
                "radius tables need at least one level".into(),
            ));
        }
        let radii = self.doughnut_radii.bands().iter().chain(self.pie_radii.bands());
        for band in radii {
            non_negative("innerRadius", band.inner_radius)?;
            non_negative("outerRadius", band.outer_radius)?;
        }
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(SunburstError::InvalidConfig("center must be finite".into()));
        }
        if !(0.0..=1.0).contains(&self.dimmed_opacity) {
            return Err(SunburstError::InvalidConfig(format!(
                "dimmedOpacity must be within [0, 1], got {}",
                self.dimmed_opacity
            )));
        }
        non_negative("padding.solid", self.padding.solid)?;
        non_negative("padding.ring", self.padding.ring)?;
        non_negative("hoverGrowth", self.hover_growth)?;
        non_negative("labels.minLabelAngle", self.labels.min_label_angle)?;
        non_negative("labels.shortLabelAngle", self.labels.short_label_angle)?;
        non_negative("labels.shortLabelArcPx", self.labels.short_label_arc_px)?;
        if self.search_limit == 0 {
            return Err(SunburstError::InvalidConfig("searchLimit must be at least 1".into()));
        }
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SunburstError::InvalidConfig(format!(
            "{field} must be a finite non-negative number, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RingBand;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(ChartConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ChartConfig =
            serde_json::from_str(r#"{"variant": "pie", "searchLimit": 5}"#).unwrap();
        assert_eq!(config.variant, Variant::Pie);
        assert_eq!(config.search_limit, 5);
        assert_eq!(config.hover_growth, 6.0);
        assert_eq!(config.root_label, "All Stats");
        assert_eq!(config.pie_radii, RadiusTable::pie());
    }

    #[test]
    fn test_nested_defaults() {
        let config: ChartConfig =
            serde_json::from_str(r#"{"labels": {"minLabelAngle": 0.1}}"#).unwrap();
        assert_eq!(config.labels.min_label_angle, 0.1);
        assert_eq!(config.labels.max_full_name_chars, 14);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ChartConfig {
            dimmed_opacity: 1.5,
            ..ChartConfig::default()
        };
        assert!(matches!(config.validate(), Err(SunburstError::InvalidConfig(_))));

        let config = ChartConfig {
            pie_radii: RadiusTable::new(Vec::new()),
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ChartConfig {
            search_limit: 0,
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut config = ChartConfig::default();
        config.padding.ring = f64::NAN;
        assert!(matches!(config.validate(), Err(SunburstError::InvalidConfig(_))));

        let mut config = ChartConfig::default();
        config.padding.solid = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = ChartConfig::default();
        config.center.y = f64::NAN;
        assert!(config.validate().is_err());

        let config = ChartConfig {
            doughnut_radii: RadiusTable::new(vec![RingBand::new(70.0, f64::NAN)]),
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ChartConfig {
            pie_radii: RadiusTable::new(vec![RingBand::new(-1.0, 110.0)]),
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());

        let mut config = ChartConfig::default();
        config.labels.short_label_arc_px = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ChartConfig::default();
        config.labels.min_label_angle = -0.1;
        assert!(config.validate().is_err());

        let config = ChartConfig {
            dimmed_opacity: f64::NAN,
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
