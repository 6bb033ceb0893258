//! Label placement policy.
//!
//! A visible wedge gets its full name when there is room for it, its short
//! name when the wedge is narrow or the name is long, and no label at all
//! when the wedge is too thin for any readable text.

use serde::{Deserialize, Serialize};

use super::Point;
use super::arc::WedgeShape;
use crate::tree::SunburstNode;

/// Curated abbreviations for common stat names, matched case-insensitively.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Accurate Passes", "ACC"),
    ("Aerial Duels", "AER"),
    ("Assists", "AST"),
    ("Attacking", "ATT"),
    ("Big Chances", "BC"),
    ("Blocks", "BLK"),
    ("Clean Sheets", "CS"),
    ("Clearances", "CLR"),
    ("Corners", "CRN"),
    ("Crosses", "CRS"),
    ("Defending", "DEF"),
    ("Discipline", "DIS"),
    ("Distance Covered", "DST"),
    ("Dribbles", "DRB"),
    ("Duels Won", "DW"),
    ("Expected Assists", "xA"),
    ("Expected Goals", "xG"),
    ("Fouls", "FLS"),
    ("Goalkeeping", "GK"),
    ("Goals", "GLS"),
    ("Interceptions", "INT"),
    ("Key Passes", "KP"),
    ("Long Balls", "LB"),
    ("Offsides", "OFF"),
    ("Passes", "PAS"),
    ("Passing", "PAS"),
    ("Physical", "PHY"),
    ("Possession", "POS"),
    ("Recoveries", "REC"),
    ("Red Cards", "RC"),
    ("Saves", "SAV"),
    ("Shots", "SHT"),
    ("Shots on Target", "SOT"),
    ("Sprints", "SPR"),
    ("Tackles", "TKL"),
    ("Yellow Cards", "YC"),
];

/// Thresholds driving the label decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelThresholds {
    /// Below this angular width (radians) a wedge gets no label.
    pub min_label_angle: f64,
    /// Below this angular width (radians) the short name is used.
    pub short_label_angle: f64,
    /// Below this estimated arc length (pixels) the short name is used.
    pub short_label_arc_px: f64,
    /// Names longer than this many characters use the short name.
    pub max_full_name_chars: usize,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            min_label_angle: 0.06,
            short_label_angle: 0.3,
            short_label_arc_px: 56.0,
            max_full_name_chars: 14,
        }
    }
}

/// A label to draw on a wedge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WedgeLabel {
    pub text: String,
    /// Whether `text` is the short name.
    pub short: bool,
    /// Anchor at the wedge's mid radius and center angle.
    pub anchor: Point,
}

/// Decides which label, if any, each wedge carries.
#[derive(Debug, Clone, Default)]
pub struct LabelPlacementPolicy {
    thresholds: LabelThresholds,
}

impl LabelPlacementPolicy {
    /// Create a policy with the given thresholds.
    pub fn new(thresholds: LabelThresholds) -> Self {
        Self { thresholds }
    }

    /// Whether a wedge of this size is worth labelling at all.
    #[inline]
    pub fn is_label_worthy(&self, angular_width: f64) -> bool {
        angular_width >= self.thresholds.min_label_angle
    }

    /// Whether the short name should replace the full one.
    pub fn use_short_label(&self, angular_width: f64, mid_radius: f64, name: &str) -> bool {
        angular_width < self.thresholds.short_label_angle
            || angular_width * mid_radius < self.thresholds.short_label_arc_px
            || name.chars().count() > self.thresholds.max_full_name_chars
    }

    /// Label for a visible, non-degenerate wedge.
    pub fn place(&self, node: &SunburstNode, shape: &WedgeShape, center: Point) -> Option<WedgeLabel> {
        let width = shape.angular_width();
        if !self.is_label_worthy(width) {
            return None;
        }

        let mid_radius = shape.mid_radius();
        let short = self.use_short_label(width, mid_radius, &node.name);
        let text = if short {
            short_name(&node.name, node.short_name.as_deref())
        } else {
            node.name.clone()
        };
        let mid_angle = (shape.start_angle + shape.end_angle) / 2.0;

        Some(WedgeLabel {
            text,
            short,
            anchor: center.polar(mid_radius, mid_angle),
        })
    }
}

/// Short form of a name: the explicit abbreviation, else the curated table,
/// else the first two characters upper-cased.
pub fn short_name(name: &str, explicit: Option<&str>) -> String {
    if let Some(explicit) = explicit.filter(|s| !s.trim().is_empty()) {
        return explicit.to_string();
    }
    let trimmed = name.trim();
    if let Some((_, abbreviation)) = ABBREVIATIONS
        .iter()
        .find(|(full, _)| full.eq_ignore_ascii_case(trimmed))
    {
        return (*abbreviation).to_string();
    }
    trimmed.chars().take(2).collect::<String>().to_uppercase()
}
