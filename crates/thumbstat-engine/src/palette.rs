//! Per-video palette descriptors: family set, signature, contrast, color count.

use serde::{Deserialize, Serialize};
use thumbstat_core::ColorValue;

use crate::color::{
    coarse_group_of, family_of, parse_color, rgb_to_hsl, CoarseGroup, ColorFamily,
};
use crate::types::Grouping;

/// Signature for a palette with no classifiable colors.
pub const UNKNOWN_SIGNATURE: &str = "Unknown";

/// Separator between families in a signature.
pub const SIGNATURE_SEPARATOR: &str = " + ";

/// Hue families kept in a signature after the neutrals.
pub const MAX_SIGNATURE_HUES: usize = 3;

pub const LOW_CONTRAST_MAX: f64 = 0.25;
pub const MID_CONTRAST_MAX: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContrastClass {
    Low,
    Mid,
    High,
}

impl ContrastClass {
    #[must_use]
    pub fn from_contrast(contrast: f64) -> Self {
        if contrast < LOW_CONTRAST_MAX {
            ContrastClass::Low
        } else if contrast < MID_CONTRAST_MAX {
            ContrastClass::Mid
        } else {
            ContrastClass::High
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ContrastClass::Low => "Low",
            ContrastClass::Mid => "Mid",
            ContrastClass::High => "High",
        }
    }
}

/// Everything the analyzers need to know about one video's palette.
///
/// Built from a single HSL pass so both granularities are available without
/// re-deriving colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteDescriptor {
    /// Neutrals in Black/White/Gray order, then up to three hues in wheel order.
    pub families: Vec<ColorFamily>,
    pub signature: String,
    /// Coarse groups present, Neutral/Warm/Cool order.
    pub coarse_groups: Vec<CoarseGroup>,
    pub coarse_signature: String,
    /// Max − min lightness across parseable colors.
    pub contrast: f64,
    pub contrast_class: ContrastClass,
    /// Number of parseable colors.
    pub color_count: usize,
    /// Parseable colors as `#RRGGBB`, in input order.
    pub hex_colors: Vec<String>,
}

impl PaletteDescriptor {
    /// Family labels at the requested granularity.
    #[must_use]
    pub fn labels(&self, grouping: Grouping) -> Vec<&'static str> {
        match grouping {
            Grouping::Fine => self.families.iter().map(|f| f.label()).collect(),
            Grouping::Coarse => self.coarse_groups.iter().map(|g| g.label()).collect(),
        }
    }

    /// Labels with neutral families (or the Neutral group) removed.
    #[must_use]
    pub fn chromatic_labels(&self, grouping: Grouping) -> Vec<&'static str> {
        match grouping {
            Grouping::Fine => self
                .families
                .iter()
                .filter(|f| !f.is_neutral())
                .map(|f| f.label())
                .collect(),
            Grouping::Coarse => self
                .coarse_groups
                .iter()
                .filter(|g| **g != CoarseGroup::Neutral)
                .map(|g| g.label())
                .collect(),
        }
    }

    #[must_use]
    pub fn signature_for(&self, grouping: Grouping) -> &str {
        match grouping {
            Grouping::Fine => &self.signature,
            Grouping::Coarse => &self.coarse_signature,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color_count == 0
    }
}

/// Build a [`PaletteDescriptor`] from a video's color list.
///
/// Unparseable colors are dropped. Families are de-duplicated in first-seen
/// order; when more than three hues appear, the first three seen are kept.
#[must_use]
pub fn describe_palette(colors: &[ColorValue]) -> PaletteDescriptor {
    let mut seen: Vec<ColorFamily> = Vec::new();
    let mut hex_colors = Vec::new();
    let mut min_lightness = f64::INFINITY;
    let mut max_lightness = f64::NEG_INFINITY;

    for value in colors {
        let Some(rgb) = parse_color(value) else {
            tracing::debug!(color = ?value, "dropping unparseable palette color");
            continue;
        };
        let hsl = rgb_to_hsl(rgb);
        min_lightness = min_lightness.min(hsl.lightness);
        max_lightness = max_lightness.max(hsl.lightness);
        hex_colors.push(rgb.to_hex());

        let family = family_of(hsl);
        if !seen.contains(&family) {
            seen.push(family);
        }
    }

    let mut families: Vec<ColorFamily> = ColorFamily::NEUTRALS
        .into_iter()
        .filter(|n| seen.contains(n))
        .collect();
    let mut hues: Vec<ColorFamily> = seen
        .iter()
        .copied()
        .filter(|f| !f.is_neutral())
        .take(MAX_SIGNATURE_HUES)
        .collect();
    hues.sort_by_key(|f| f.order());
    families.extend(hues);

    let mut coarse_groups: Vec<CoarseGroup> = Vec::new();
    for group in families.iter().map(|f| coarse_group_of(*f)) {
        if !coarse_groups.contains(&group) {
            coarse_groups.push(group);
        }
    }
    coarse_groups.sort();

    let contrast = if hex_colors.is_empty() {
        0.0
    } else {
        (max_lightness - min_lightness).clamp(0.0, 1.0)
    };

    PaletteDescriptor {
        signature: join_signature(families.iter().map(|f| f.label())),
        coarse_signature: join_signature(coarse_groups.iter().map(|g| g.label())),
        families,
        coarse_groups,
        contrast,
        contrast_class: ContrastClass::from_contrast(contrast),
        color_count: hex_colors.len(),
        hex_colors,
    }
}

fn join_signature<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    let joined = labels.collect::<Vec<_>>().join(SIGNATURE_SEPARATOR);
    if joined.is_empty() {
        UNKNOWN_SIGNATURE.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(hex: &[&str]) -> Vec<ColorValue> {
        hex.iter().map(|h| ColorValue::from(*h)).collect()
    }

    #[test]
    fn single_red_palette() {
        let palette = describe_palette(&colors(&["#FF0000"]));
        assert_eq!(palette.families, vec![ColorFamily::Red]);
        assert_eq!(palette.signature, "Red");
        assert_eq!(palette.coarse_signature, "Warm");
        assert_eq!(palette.color_count, 1);
        assert_eq!(palette.contrast, 0.0);
        assert_eq!(palette.contrast_class, ContrastClass::Low);
    }

    #[test]
    fn neutrals_lead_in_preference_order_then_hues_in_wheel_order() {
        let palette = describe_palette(&colors(&["#0000FF", "#808080", "#FF0000", "#000000"]));
        assert_eq!(
            palette.families,
            vec![
                ColorFamily::Black,
                ColorFamily::Gray,
                ColorFamily::Red,
                ColorFamily::Blue
            ]
        );
        assert_eq!(palette.signature, "Black + Gray + Red + Blue");
        assert_eq!(palette.coarse_signature, "Neutral + Warm + Cool");
    }

    #[test]
    fn duplicate_families_collapse() {
        let palette = describe_palette(&colors(&["#FF0000", "#EE0000", "#FF0000"]));
        assert_eq!(palette.signature, "Red");
        assert_eq!(palette.color_count, 3);
    }

    #[test]
    fn at_most_three_hues_first_seen_win() {
        // Blue, Red, Yellow (#80FF00 is ~90°), then Green-Cyan (180°) last.
        let palette = describe_palette(&colors(&["#0000FF", "#FF0000", "#80FF00", "#00FFFF"]));
        let hues: Vec<_> = palette.families.iter().filter(|f| !f.is_neutral()).collect();
        assert_eq!(hues.len(), 3);
        assert!(!palette.signature.contains("Green-Cyan"));
        assert_eq!(palette.signature, "Red + Yellow + Blue");
        assert!(palette.signature.starts_with("Red"));
    }

    #[test]
    fn unparseable_colors_are_dropped() {
        let palette = describe_palette(&colors(&["garbage", "#FF0000"]));
        assert_eq!(palette.signature, "Red");
        assert_eq!(palette.color_count, 1);
        assert_eq!(palette.hex_colors, vec!["#FF0000".to_string()]);
    }

    #[test]
    fn empty_palette_is_unknown() {
        let palette = describe_palette(&[]);
        assert_eq!(palette.signature, UNKNOWN_SIGNATURE);
        assert_eq!(palette.coarse_signature, UNKNOWN_SIGNATURE);
        assert!(palette.is_empty());
        assert_eq!(palette.contrast_class, ContrastClass::Low);
    }

    #[test]
    fn contrast_is_lightness_range() {
        let palette = describe_palette(&colors(&["#000000", "#FFFFFF"]));
        assert!((palette.contrast - 1.0).abs() < 1e-9);
        assert_eq!(palette.contrast_class, ContrastClass::High);
    }

    #[test]
    fn contrast_class_breakpoints() {
        assert_eq!(ContrastClass::from_contrast(0.2499), ContrastClass::Low);
        assert_eq!(ContrastClass::from_contrast(0.25), ContrastClass::Mid);
        assert_eq!(ContrastClass::from_contrast(0.4999), ContrastClass::Mid);
        assert_eq!(ContrastClass::from_contrast(0.5), ContrastClass::High);
    }

    #[test]
    fn labels_follow_granularity() {
        let palette = describe_palette(&colors(&["#FFFFFF", "#FF0000", "#0000FF"]));
        assert_eq!(palette.labels(Grouping::Fine), vec!["White", "Red", "Blue"]);
        assert_eq!(
            palette.labels(Grouping::Coarse),
            vec!["Neutral", "Warm", "Cool"]
        );
        assert_eq!(palette.chromatic_labels(Grouping::Fine), vec!["Red", "Blue"]);
        assert_eq!(
            palette.chromatic_labels(Grouping::Coarse),
            vec!["Warm", "Cool"]
        );
        assert_eq!(palette.signature_for(Grouping::Coarse), "Neutral + Warm + Cool");
    }
}
