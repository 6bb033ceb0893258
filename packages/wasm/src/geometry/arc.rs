//! Annular sector geometry.
//!
//! A wedge is drawn as: outer arc from the padded end angle back to the
//! padded start angle, a straight line in to the inner radius, the inner arc
//! forward to the padded end angle, and a closing line. A wedge whose padded
//! span or radial thickness collapses is degenerate and produces no shape.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::Point;
use super::radius::{RadiusTable, RingBand, Variant};

/// Angular padding trimmed from each end of a wedge, radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArcPadding {
    /// Padding for pie level-1 slices.
    pub solid: f64,
    /// Padding for ring segments.
    pub ring: f64,
}

impl Default for ArcPadding {
    fn default() -> Self {
        Self {
            solid: 0.004,
            ring: 0.012,
        }
    }
}

impl ArcPadding {
    /// Padding applied to one end of a wedge at `level`.
    #[inline]
    pub fn for_level(&self, variant: Variant, level: u32) -> f64 {
        if variant == Variant::Pie && level == 1 {
            self.solid
        } else {
            self.ring
        }
    }
}

/// The drawable boundary of one wedge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WedgeShape {
    /// Padded start angle.
    pub start_angle: f64,
    /// Padded end angle.
    pub end_angle: f64,
    pub inner_radius: f64,
    /// Outer radius, including any hover growth.
    pub outer_radius: f64,
    /// Whether the padded span exceeds a half turn.
    pub large_arc: bool,
    /// SVG path data for the sector.
    pub path: String,
}

impl WedgeShape {
    /// Padded angular width.
    #[inline]
    pub fn angular_width(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Radius halfway between inner and outer edge.
    #[inline]
    pub fn mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }
}

/// Maps (level, angles) to wedge shapes for both variants.
#[derive(Debug, Clone)]
pub struct ArcGeometryEngine {
    doughnut: RadiusTable,
    pie: RadiusTable,
    padding: ArcPadding,
    center: Point,
    hover_growth: f64,
}

impl ArcGeometryEngine {
    /// Create a geometry engine.
    pub fn new(
        doughnut: RadiusTable,
        pie: RadiusTable,
        padding: ArcPadding,
        center: Point,
        hover_growth: f64,
    ) -> Self {
        Self {
            doughnut,
            pie,
            padding,
            center,
            hover_growth,
        }
    }

    /// Chart center in output coordinates.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius table for a variant.
    pub fn table(&self, variant: Variant) -> &RadiusTable {
        match variant {
            Variant::Doughnut => &self.doughnut,
            Variant::Pie => &self.pie,
        }
    }

    /// Base band for `level`, before any hover growth.
    pub fn band(&self, variant: Variant, level: u32) -> Option<RingBand> {
        self.table(variant).band(level)
    }

    /// Shape for a wedge, or `None` when it is degenerate.
    ///
    /// `hovered` grows the outer radius of a visible wedge; it never changes
    /// whether a wedge is degenerate, since that is decided on the base band.
    pub fn wedge_geometry(
        &self,
        level: u32,
        start_angle: f64,
        end_angle: f64,
        variant: Variant,
        hovered: bool,
        visible: bool,
    ) -> Option<WedgeShape> {
        let band = self.band(variant, level)?;
        let pad = self.padding.for_level(variant, level);
        let start = start_angle + pad;
        let end = end_angle - pad;

        if start >= end || band.is_degenerate() {
            return None;
        }

        let outer_radius = if hovered && visible {
            band.outer_radius + self.hover_growth
        } else {
            band.outer_radius
        };
        let large_arc = end - start > PI;
        let path = sector_path(self.center, band.inner_radius, outer_radius, start, end, large_arc);

        Some(WedgeShape {
            start_angle: start,
            end_angle: end,
            inner_radius: band.inner_radius,
            outer_radius,
            large_arc,
            path,
        })
    }
}

/// SVG path data for an annular sector; a zero inner radius closes through
/// the center instead of drawing an inner arc.
fn sector_path(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start: f64,
    end: f64,
    large_arc: bool,
) -> String {
    let large = u8::from(large_arc);
    let outer_end = center.polar(outer_radius, end);
    let outer_start = center.polar(outer_radius, start);

    let mut path = format!(
        "M {:.3} {:.3} A {r:.3} {r:.3} 0 {large} 0 {:.3} {:.3}",
        outer_end.x,
        outer_end.y,
        outer_start.x,
        outer_start.y,
        r = outer_radius,
    );

    if inner_radius > 0.0 {
        let inner_start = center.polar(inner_radius, start);
        let inner_end = center.polar(inner_radius, end);
        path.push_str(&format!(
            " L {:.3} {:.3} A {r:.3} {r:.3} 0 {large} 1 {:.3} {:.3} Z",
            inner_start.x,
            inner_start.y,
            inner_end.x,
            inner_end.y,
            r = inner_radius,
        ));
    } else {
        path.push_str(&format!(" L {:.3} {:.3} Z", center.x, center.y));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn engine() -> ArcGeometryEngine {
        ArcGeometryEngine::new(
            RadiusTable::doughnut(),
            RadiusTable::pie(),
            ArcPadding::default(),
            Point::new(200.0, 200.0),
            6.0,
        )
    }

    #[test]
    fn test_padding_trims_both_ends() {
        let shape = engine()
            .wedge_geometry(1, 0.0, 1.0, Variant::Doughnut, false, true)
            .unwrap();
        assert!((shape.start_angle - 0.012).abs() < 1e-12);
        assert!((shape.end_angle - 0.988).abs() < 1e-12);
        assert_eq!(shape.inner_radius, 70.0);
        assert_eq!(shape.outer_radius, 110.0);
        assert!(!shape.large_arc);
    }

    #[test]
    fn test_pie_level_one_uses_smaller_padding() {
        let shape = engine()
            .wedge_geometry(1, 0.0, 1.0, Variant::Pie, false, true)
            .unwrap();
        assert!((shape.start_angle - 0.004).abs() < 1e-12);

        let ring = engine()
            .wedge_geometry(2, 0.0, 1.0, Variant::Pie, false, true)
            .unwrap();
        assert!((ring.start_angle - 0.012).abs() < 1e-12);
    }

    #[test]
    fn test_zero_span_is_degenerate() {
        let geometry = engine();
        assert!(geometry.wedge_geometry(1, 1.0, 1.0, Variant::Doughnut, false, true).is_none());
        // Narrower than twice the padding.
        assert!(geometry.wedge_geometry(2, 1.0, 1.02, Variant::Doughnut, false, true).is_none());
    }

    #[test]
    fn test_zero_thickness_is_degenerate() {
        let geometry = ArcGeometryEngine::new(
            RadiusTable::new(vec![RingBand::new(50.0, 50.0)]),
            RadiusTable::pie(),
            ArcPadding::default(),
            Point::new(0.0, 0.0),
            6.0,
        );
        assert!(geometry.wedge_geometry(1, 0.0, 2.0, Variant::Doughnut, false, true).is_none());
        // Hover cannot rescue a degenerate wedge.
        assert!(geometry.wedge_geometry(1, 0.0, 2.0, Variant::Doughnut, true, true).is_none());
    }

    #[test]
    fn test_root_level_has_no_shape() {
        assert!(engine().wedge_geometry(0, 0.0, TAU, Variant::Doughnut, false, true).is_none());
    }

    #[test]
    fn test_large_arc_flag() {
        let shape = engine()
            .wedge_geometry(1, -FRAC_PI_2, -FRAC_PI_2 + 4.0, Variant::Doughnut, false, true)
            .unwrap();
        assert!(shape.large_arc);
        assert!(shape.path.contains(" 0 1 0 "), "outer arc should carry large-arc flag: {}", shape.path);
    }

    #[test]
    fn test_hover_grows_visible_wedges_only() {
        let geometry = engine();
        let hovered = geometry.wedge_geometry(2, 0.0, 1.0, Variant::Doughnut, true, true).unwrap();
        assert_eq!(hovered.outer_radius, 150.0);

        let hidden = geometry.wedge_geometry(2, 0.0, 1.0, Variant::Doughnut, true, false).unwrap();
        assert_eq!(hidden.outer_radius, 144.0);
    }

    #[test]
    fn test_ring_path_shape() {
        let shape = engine()
            .wedge_geometry(1, 0.0, 1.0, Variant::Doughnut, false, true)
            .unwrap();
        assert!(shape.path.starts_with("M "));
        assert_eq!(shape.path.matches(" A ").count(), 2);
        assert!(shape.path.ends_with(" Z"));
    }

    #[test]
    fn test_solid_path_closes_through_center() {
        let shape = engine()
            .wedge_geometry(1, 0.0, 1.0, Variant::Pie, false, true)
            .unwrap();
        assert_eq!(shape.path.matches(" A ").count(), 1);
        assert!(shape.path.ends_with("L 200.000 200.000 Z"), "got {}", shape.path);
    }

    #[test]
    fn test_levels_beyond_table_reuse_deepest_band() {
        let geometry = engine();
        let deep = geometry.wedge_geometry(9, 0.0, 1.0, Variant::Doughnut, false, true).unwrap();
        assert_eq!(deep.inner_radius, 176.0);
        assert_eq!(deep.outer_radius, 194.0);
    }
}
