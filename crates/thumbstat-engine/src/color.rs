//! Color parsing and perceptual family classification.
//!
//! Colors are converted to HSL and assigned one of 15 families: three neutrals
//! (lightness/saturation thresholds) and twelve 30° hue sectors offset by 15°
//! so that pure red sits in the middle of the Red sector.

use serde::{Deserialize, Serialize};
use thumbstat_core::ColorValue;

/// Lightness at or below which a color is Black regardless of hue.
pub const BLACK_MAX_LIGHTNESS: f64 = 0.10;
/// Lightness at or above which a color is White regardless of hue.
pub const WHITE_MIN_LIGHTNESS: f64 = 0.90;
/// Saturation at or below which a non-black, non-white color is Gray.
pub const GRAY_MAX_SATURATION: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// HSL with hue in degrees `[0, 360)` and saturation/lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorFamily {
    Black,
    White,
    Gray,
    Red,
    #[serde(rename = "Red-Orange")]
    RedOrange,
    Orange,
    Yellow,
    #[serde(rename = "Yellow-Green")]
    YellowGreen,
    Green,
    #[serde(rename = "Green-Cyan")]
    GreenCyan,
    Cyan,
    Blue,
    #[serde(rename = "Blue-Violet")]
    BlueViolet,
    Violet,
    Magenta,
}

impl ColorFamily {
    pub const ALL: [ColorFamily; 15] = [
        ColorFamily::Black,
        ColorFamily::White,
        ColorFamily::Gray,
        ColorFamily::Red,
        ColorFamily::RedOrange,
        ColorFamily::Orange,
        ColorFamily::Yellow,
        ColorFamily::YellowGreen,
        ColorFamily::Green,
        ColorFamily::GreenCyan,
        ColorFamily::Cyan,
        ColorFamily::Blue,
        ColorFamily::BlueViolet,
        ColorFamily::Violet,
        ColorFamily::Magenta,
    ];

    /// Hue families in color-wheel order, indexed by sector.
    pub const HUE_WHEEL: [ColorFamily; 12] = [
        ColorFamily::Red,
        ColorFamily::RedOrange,
        ColorFamily::Orange,
        ColorFamily::Yellow,
        ColorFamily::YellowGreen,
        ColorFamily::Green,
        ColorFamily::GreenCyan,
        ColorFamily::Cyan,
        ColorFamily::Blue,
        ColorFamily::BlueViolet,
        ColorFamily::Violet,
        ColorFamily::Magenta,
    ];

    /// Neutrals in signature preference order.
    pub const NEUTRALS: [ColorFamily; 3] =
        [ColorFamily::Black, ColorFamily::White, ColorFamily::Gray];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ColorFamily::Black => "Black",
            ColorFamily::White => "White",
            ColorFamily::Gray => "Gray",
            ColorFamily::Red => "Red",
            ColorFamily::RedOrange => "Red-Orange",
            ColorFamily::Orange => "Orange",
            ColorFamily::Yellow => "Yellow",
            ColorFamily::YellowGreen => "Yellow-Green",
            ColorFamily::Green => "Green",
            ColorFamily::GreenCyan => "Green-Cyan",
            ColorFamily::Cyan => "Cyan",
            ColorFamily::Blue => "Blue",
            ColorFamily::BlueViolet => "Blue-Violet",
            ColorFamily::Violet => "Violet",
            ColorFamily::Magenta => "Magenta",
        }
    }

    #[must_use]
    pub fn is_neutral(self) -> bool {
        matches!(
            self,
            ColorFamily::Black | ColorFamily::White | ColorFamily::Gray
        )
    }

    /// Position used for signature ordering: neutrals first, then the wheel.
    #[must_use]
    pub fn order(self) -> usize {
        // ALL lists neutrals first and hues in wheel order.
        Self::ALL.iter().position(|f| *f == self).unwrap_or(usize::MAX)
    }
}

impl std::fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Warm/Cool/Neutral simplification of [`ColorFamily`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CoarseGroup {
    Neutral,
    Warm,
    Cool,
}

impl CoarseGroup {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CoarseGroup::Neutral => "Neutral",
            CoarseGroup::Warm => "Warm",
            CoarseGroup::Cool => "Cool",
        }
    }
}

impl std::fmt::Display for CoarseGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse a supplied color into 8-bit RGB.
///
/// Channels outside `0..=255` are clamped. Returns `None` for anything that is
/// not a hex string, an `rgb(...)` string, or a finite numeric triple.
#[must_use]
pub fn parse_color(value: &ColorValue) -> Option<Rgb> {
    match value {
        ColorValue::Rgb([r, g, b]) => rgb_from_channels(*r, *g, *b),
        ColorValue::Text(text) => parse_color_text(text),
    }
}

fn parse_color_text(text: &str) -> Option<Rgb> {
    let trimmed = text.trim();
    let lower = trimmed.to_ascii_lowercase();
    if let Some(inner) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        return parse_rgb_function(inner.strip_suffix(')')?);
    }
    parse_hex(trimmed.strip_prefix('#').unwrap_or(trimmed))
}

fn parse_rgb_function(args: &str) -> Option<Rgb> {
    let channels: Vec<f64> = args
        .split(',')
        .take(3)
        .map(|part| part.trim().parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    match channels.as_slice() {
        [r, g, b] => rgb_from_channels(*r, *g, *b),
        _ => None,
    }
}

fn parse_hex(digits: &str) -> Option<Rgb> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match digits.len() {
        3 => {
            let expand = |i: usize| channel(i..i + 1).map(|v| v * 17);
            Some(Rgb {
                r: expand(0)?,
                g: expand(1)?,
                b: expand(2)?,
            })
        }
        // Trailing alpha in 8-digit hex is ignored.
        6 | 8 => Some(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        }),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rgb_from_channels(r: f64, g: f64, b: f64) -> Option<Rgb> {
    if !(r.is_finite() && g.is_finite() && b.is_finite()) {
        return None;
    }
    let clamp = |v: f64| v.clamp(0.0, 255.0).round() as u8;
    Some(Rgb {
        r: clamp(r),
        g: clamp(g),
        b: clamp(b),
    })
}

/// Standard RGB → HSL conversion.
#[must_use]
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let lightness = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsl {
            hue: 0.0,
            saturation: 0.0,
            lightness,
        };
    }

    let saturation = if lightness > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    #[allow(clippy::float_cmp)]
    let sector = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl {
        hue: (sector * 60.0).rem_euclid(360.0),
        saturation,
        lightness,
    }
}

/// Parse and convert in one step. `None` on unparseable input.
#[must_use]
pub fn to_hsl(value: &ColorValue) -> Option<Hsl> {
    parse_color(value).map(rgb_to_hsl)
}

/// Classify an HSL color into its family.
///
/// Neutrals take priority over hue: very dark → Black, very light → White,
/// desaturated → Gray. Otherwise hue sector `floor((hue + 15) / 30) mod 12`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn family_of(hsl: Hsl) -> ColorFamily {
    if hsl.lightness <= BLACK_MAX_LIGHTNESS {
        return ColorFamily::Black;
    }
    if hsl.lightness >= WHITE_MIN_LIGHTNESS {
        return ColorFamily::White;
    }
    if hsl.saturation <= GRAY_MAX_SATURATION {
        return ColorFamily::Gray;
    }
    let hue = if hsl.hue.is_finite() {
        hsl.hue.rem_euclid(360.0)
    } else {
        0.0
    };
    let sector = ((hue + 15.0) / 30.0).floor() as usize % 12;
    ColorFamily::HUE_WHEEL[sector]
}

#[must_use]
pub fn coarse_group_of(family: ColorFamily) -> CoarseGroup {
    match family {
        ColorFamily::Black | ColorFamily::White | ColorFamily::Gray => CoarseGroup::Neutral,
        ColorFamily::Red
        | ColorFamily::RedOrange
        | ColorFamily::Orange
        | ColorFamily::Yellow
        | ColorFamily::YellowGreen => CoarseGroup::Warm,
        ColorFamily::Green
        | ColorFamily::GreenCyan
        | ColorFamily::Cyan
        | ColorFamily::Blue
        | ColorFamily::BlueViolet
        | ColorFamily::Violet
        | ColorFamily::Magenta => CoarseGroup::Cool,
    }
}

#[cfg(test)]
#[path = "color_test.rs"]
mod tests;
