//! Category palette.
//!
//! Every wedge takes its color from the category of its level-1 ancestor.
//! Categories are a closed set looked up by normalized name; anything not in
//! the table renders in the neutral `General` colors.

use serde::Serialize;

/// Closed set of stat categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryTag {
    Attacking,
    Passing,
    Defending,
    Goalkeeping,
    Discipline,
    Physical,
    General,
}

/// Base, light and dark shades for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorTriple {
    pub base: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
}

impl CategoryTag {
    /// Classify a top-level category name.
    pub fn classify(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "attacking" | "attack" | "shooting" => Self::Attacking,
            "passing" | "distribution" => Self::Passing,
            "defending" | "defence" | "defense" => Self::Defending,
            "goalkeeping" | "goalkeeper" => Self::Goalkeeping,
            "discipline" => Self::Discipline,
            "physical" => Self::Physical,
            _ => Self::General,
        }
    }

    /// Fixed colors for this tag.
    pub const fn colors(self) -> ColorTriple {
        match self {
            Self::Attacking => ColorTriple {
                base: "#e4572e",
                light: "#f19b7f",
                dark: "#a83717",
            },
            Self::Passing => ColorTriple {
                base: "#2e86ab",
                light: "#7fbcd6",
                dark: "#1b5a75",
            },
            Self::Defending => ColorTriple {
                base: "#4caf50",
                light: "#92d095",
                dark: "#2e7d32",
            },
            Self::Goalkeeping => ColorTriple {
                base: "#f3a712",
                light: "#f8cd75",
                dark: "#b57b05",
            },
            Self::Discipline => ColorTriple {
                base: "#d7263d",
                light: "#ea7d8b",
                dark: "#95162a",
            },
            Self::Physical => ColorTriple {
                base: "#8e44ad",
                light: "#c39bd3",
                dark: "#5e2d73",
            },
            Self::General => ColorTriple {
                base: "#7f8c8d",
                light: "#bdc3c7",
                dark: "#4d5656",
            },
        }
    }

    /// Shade for a wedge at `level`.
    ///
    /// Highlighted wedges (active or hovered) use the dark shade, level-1
    /// wedges the base shade, and everything deeper the light shade.
    pub fn shade(self, level: u32, highlighted: bool) -> &'static str {
        let colors = self.colors();
        if highlighted {
            colors.dark
        } else if level <= 1 {
            colors.base
        } else {
            colors.light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_normalizes_name() {
        assert_eq!(CategoryTag::classify("Attacking"), CategoryTag::Attacking);
        assert_eq!(CategoryTag::classify("  GOALKEEPING "), CategoryTag::Goalkeeping);
        assert_eq!(CategoryTag::classify("Defence"), CategoryTag::Defending);
    }

    #[test]
    fn test_unknown_names_are_general() {
        assert_eq!(CategoryTag::classify("Set Pieces"), CategoryTag::General);
        // Substrings do not count.
        assert_eq!(CategoryTag::classify("Attacking Third"), CategoryTag::General);
    }

    #[test]
    fn test_shade_by_level() {
        let passing = CategoryTag::Passing;
        assert_eq!(passing.shade(1, false), passing.colors().base);
        assert_eq!(passing.shade(3, false), passing.colors().light);
        assert_eq!(passing.shade(3, true), passing.colors().dark);
    }

    #[test]
    fn test_tags_have_distinct_bases() {
        let tags = [
            CategoryTag::Attacking,
            CategoryTag::Passing,
            CategoryTag::Defending,
            CategoryTag::Goalkeeping,
            CategoryTag::Discipline,
            CategoryTag::Physical,
            CategoryTag::General,
        ];
        let mut bases: Vec<&str> = tags.iter().map(|t| t.colors().base).collect();
        bases.sort_unstable();
        bases.dedup();
        assert_eq!(bases.len(), tags.len());
    }
}
