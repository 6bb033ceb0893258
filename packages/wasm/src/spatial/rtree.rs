//! R-tree based wedge index using the rstar crate.
//!
//! Wedges are stored by the bounding box of their annular sector. A point
//! query first collects wedges whose box contains the point, then keeps only
//! those whose exact polar extent does.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::geometry::{Point, WedgeShape};

/// One drawable wedge in the index.
#[derive(Debug, Clone, PartialEq)]
pub struct WedgeEntry {
    /// Node identifier.
    pub id: String,
    /// Tree level; deeper wedges win overlapping hits.
    pub level: u32,
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
    envelope: AABB<[f64; 2]>,
}

impl WedgeEntry {
    /// Create an entry from a wedge shape drawn around `center`.
    pub fn new(id: impl Into<String>, level: u32, center: Point, shape: &WedgeShape) -> Self {
        let envelope = sector_envelope(
            center,
            shape.inner_radius,
            shape.outer_radius,
            shape.start_angle,
            shape.end_angle,
        );
        Self {
            id: id.into(),
            level,
            center,
            inner_radius: shape.inner_radius,
            outer_radius: shape.outer_radius,
            start_angle: shape.start_angle,
            end_angle: shape.end_angle,
            envelope,
        }
    }

    /// Exact polar containment.
    fn covers(&self, x: f64, y: f64) -> bool {
        let dx = x - self.center.x;
        let dy = y - self.center.y;
        let radius = (dx * dx + dy * dy).sqrt();
        if radius < self.inner_radius || radius > self.outer_radius {
            return false;
        }
        let span = self.end_angle - self.start_angle;
        if span >= TAU {
            return true;
        }
        (dy.atan2(dx) - self.start_angle).rem_euclid(TAU) <= span
    }
}

impl RTreeObject for WedgeEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for WedgeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        // Squared distance to the bounding box, zero inside it.
        let lower = self.envelope.lower();
        let upper = self.envelope.upper();
        let dx = point[0] - point[0].clamp(lower[0], upper[0]);
        let dy = point[1] - point[1].clamp(lower[1], upper[1]);
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.covers(point[0], point[1])
    }
}

/// Bounding box of an annular sector: its four corners plus every
/// axis-aligned extreme of the outer arc that falls inside the span.
fn sector_envelope(center: Point, inner: f64, outer: f64, start: f64, end: f64) -> AABB<[f64; 2]> {
    let mut points = vec![
        center.polar(inner, start),
        center.polar(inner, end),
        center.polar(outer, start),
        center.polar(outer, end),
    ];

    let first = (start / FRAC_PI_2).ceil() as i64;
    let last = (end / FRAC_PI_2).floor() as i64;
    // A full turn holds at most five quarter points.
    for k in first..=last.min(first + 4) {
        points.push(center.polar(outer, k as f64 * FRAC_PI_2));
    }

    let corners: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
    AABB::from_points(corners.iter())
}

/// Spatial index for pointer hit testing on drawn wedges.
pub struct WedgeHitIndex {
    tree: RTree<WedgeEntry>,
}

impl WedgeHitIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Replace the contents with `entries`.
    ///
    /// Bulk loading gives a better tree than repeated inserts.
    pub fn rebuild(&mut self, entries: Vec<WedgeEntry>) {
        self.tree = RTree::bulk_load(entries);
    }

    /// Id of the deepest wedge under `(x, y)`.
    pub fn hit(&self, x: f64, y: f64) -> Option<&str> {
        self.tree
            .locate_all_at_point(&[x, y])
            .max_by_key(|entry| entry.level)
            .map(|entry| entry.id.as_str())
    }

    /// Clear all wedges from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Number of wedges in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for WedgeHitIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn shape(start: f64, end: f64, inner: f64, outer: f64) -> WedgeShape {
        WedgeShape {
            start_angle: start,
            end_angle: end,
            inner_radius: inner,
            outer_radius: outer,
            large_arc: end - start > PI,
            path: String::new(),
        }
    }

    #[test]
    fn test_hit_inside_ring() {
        let center = Point::new(0.0, 0.0);
        let mut index = WedgeHitIndex::new();
        index.rebuild(vec![
            WedgeEntry::new("right", 1, center, &shape(-0.5, 0.5, 70.0, 110.0)),
            WedgeEntry::new("left", 1, center, &shape(PI - 0.5, PI + 0.5, 70.0, 110.0)),
        ]);

        assert_eq!(index.hit(90.0, 0.0), Some("right"));
        assert_eq!(index.hit(-90.0, 0.0), Some("left"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_blank_disc_hits_nothing() {
        let center = Point::new(200.0, 200.0);
        let mut index = WedgeHitIndex::new();
        index.rebuild(vec![WedgeEntry::new("a", 1, center, &shape(-FRAC_PI_2, -FRAC_PI_2 + TAU, 70.0, 110.0))]);

        assert_eq!(index.hit(200.0, 200.0), None);
        assert_eq!(index.hit(230.0, 200.0), None);
        assert_eq!(index.hit(290.0, 200.0), Some("a"));
    }

    #[test]
    fn test_box_corner_outside_sector() {
        // Inside the bounding box of a quarter ring but beyond its outer arc.
        let center = Point::new(0.0, 0.0);
        let mut index = WedgeHitIndex::new();
        index.rebuild(vec![WedgeEntry::new("q", 1, center, &shape(0.0, FRAC_PI_2, 50.0, 100.0))]);

        assert_eq!(index.hit(95.0, 95.0), None);
        assert_eq!(index.hit(50.0, 50.0), Some("q"));
    }

    #[test]
    fn test_angle_wraps_across_pi() {
        // Span from 3 to 3.5 crosses the atan2 seam at PI.
        let center = Point::new(0.0, 0.0);
        let mut index = WedgeHitIndex::new();
        index.rebuild(vec![WedgeEntry::new("seam", 1, center, &shape(3.0, 3.5, 10.0, 20.0))]);

        let point = center.polar(15.0, 3.3);
        assert_eq!(index.hit(point.x, point.y), Some("seam"));
    }

    #[test]
    fn test_deepest_wedge_wins() {
        let center = Point::new(0.0, 0.0);
        let entries = vec![
            WedgeEntry::new("outer", 1, center, &shape(0.0, 1.0, 0.0, 120.0)),
            WedgeEntry::new("inner", 2, center, &shape(0.0, 1.0, 100.0, 140.0)),
        ];
        let mut index = WedgeHitIndex::new();
        index.rebuild(entries);

        let point = center.polar(110.0, 0.5);
        assert_eq!(index.hit(point.x, point.y), Some("inner"));
    }

    #[test]
    fn test_envelope_covers_arc_extremes() {
        let center = Point::new(0.0, 0.0);
        let entry = WedgeEntry::new("half", 1, center, &shape(-FRAC_PI_2, FRAC_PI_2, 0.0, 10.0));
        let env = entry.envelope();
        assert!((env.upper()[0] - 10.0).abs() < 1e-9, "arc reaches x = 10 at angle 0");
        assert!((env.lower()[1] + 10.0).abs() < 1e-9);
        assert!(env.lower()[0].abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_zero_inside_box() {
        let center = Point::new(0.0, 0.0);
        let entry = WedgeEntry::new("q", 1, center, &shape(0.0, FRAC_PI_2, 50.0, 100.0));
        assert_eq!(entry.distance_2(&[50.0, 50.0]), 0.0);
        assert!((entry.distance_2(&[103.0, 104.0]) - 25.0).abs() < 1e-9);
        assert!((entry.distance_2(&[-2.0, 10.0]) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_clear() {
        let mut index = WedgeHitIndex::new();
        index.rebuild(vec![WedgeEntry::new("a", 1, Point::new(0.0, 0.0), &shape(0.0, 1.0, 1.0, 2.0))]);
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.hit(1.5, 0.1), None);
    }
}
