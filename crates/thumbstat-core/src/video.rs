use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel for categorical attributes the dashboard export left blank.
pub const UNKNOWN: &str = "Unknown";

/// Sentinel for a missing view tier.
pub const OTHER: &str = "Other";

/// One thumbnail color as exported by the palette extractor.
///
/// The extractor emits hex strings, but older exports carry `rgb(r, g, b)`
/// strings or bare numeric triples. Parsing happens in the engine; this type
/// only preserves what was supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// Numeric `[r, g, b]` triple. Channels outside `0..=255` are clamped on use.
    Rgb([f64; 3]),
    /// `#RRGGBB`, `#RGB`, or `rgb(r, g, b)`.
    Text(String),
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        ColorValue::Text(value.to_string())
    }
}

impl From<[u8; 3]> for ColorValue {
    fn from([r, g, b]: [u8; 3]) -> Self {
        ColorValue::Rgb([f64::from(r), f64::from(g), f64::from(b)])
    }
}

/// A single video and its thumbnail statistics.
///
/// Missing optional fields fall back to documented defaults:
/// `facePercentage` → 0, `subscribers` → 1, `genre` / `globalTier` /
/// `genreTier` → `"Unknown"`, `tier` → `"Other"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default = "unknown_label", deserialize_with = "string_or_unknown")]
    pub channel_name: String,
    #[serde(default = "unknown_label", deserialize_with = "string_or_unknown")]
    pub genre: String,
    #[serde(default = "other_label", deserialize_with = "string_or_other")]
    pub tier: String,
    #[serde(default = "unknown_label", deserialize_with = "string_or_unknown")]
    pub global_tier: String,
    #[serde(default = "unknown_label", deserialize_with = "string_or_unknown")]
    pub genre_tier: String,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub views: f64,
    /// RQS. `None` when the export had no score for this video.
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub face_percentage: f64,
    #[serde(default, deserialize_with = "colors_or_empty")]
    pub colors: Vec<ColorValue>,
    #[serde(default = "one", deserialize_with = "number_or_one")]
    pub subscribers: f64,
}

impl Default for VideoRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            channel_name: UNKNOWN.to_string(),
            genre: UNKNOWN.to_string(),
            tier: OTHER.to_string(),
            global_tier: UNKNOWN.to_string(),
            genre_tier: UNKNOWN.to_string(),
            views: 0.0,
            quality_score: None,
            face_percentage: 0.0,
            colors: Vec::new(),
            subscribers: 1.0,
        }
    }
}

impl VideoRecord {
    /// Face coverage clamped into `[0, 100]`; non-finite values read as 0.
    #[must_use]
    pub fn face_coverage(&self) -> f64 {
        if self.face_percentage.is_finite() {
            self.face_percentage.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Subscriber count floored at 1 so per-subscriber ratios never divide by zero.
    #[must_use]
    pub fn subscriber_divisor(&self) -> f64 {
        if self.subscribers.is_finite() && self.subscribers >= 1.0 {
            self.subscribers
        } else {
            1.0
        }
    }

    /// Views, or 0 when the stored value is negative or non-finite.
    #[must_use]
    pub fn views_or_zero(&self) -> f64 {
        if self.views.is_finite() && self.views > 0.0 {
            self.views
        } else {
            0.0
        }
    }

    /// Views per subscriber.
    #[must_use]
    pub fn views_per_subscriber(&self) -> f64 {
        self.views_or_zero() / self.subscriber_divisor()
    }

    /// RQS when present and finite.
    #[must_use]
    pub fn rqs(&self) -> Option<f64> {
        self.quality_score.filter(|v| v.is_finite())
    }
}

fn unknown_label() -> String {
    UNKNOWN.to_string()
}

fn other_label() -> String {
    OTHER.to_string()
}

fn one() -> f64 {
    1.0
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn string_or_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(non_blank(Option::<String>::deserialize(d)?).unwrap_or_else(unknown_label))
}

fn string_or_other<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(non_blank(Option::<String>::deserialize(d)?).unwrap_or_else(other_label))
}

fn number_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(0.0))
}

fn number_or_one<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(1.0))
}

fn colors_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ColorValue>, D::Error> {
    Ok(Option::<Vec<ColorValue>>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_take_documented_defaults() {
        let video: VideoRecord = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(video.genre, UNKNOWN);
        assert_eq!(video.tier, OTHER);
        assert_eq!(video.global_tier, UNKNOWN);
        assert_eq!(video.genre_tier, UNKNOWN);
        assert_eq!(video.face_percentage, 0.0);
        assert_eq!(video.subscribers, 1.0);
        assert!(video.colors.is_empty());
        assert!(video.quality_score.is_none());
    }

    #[test]
    fn null_fields_take_documented_defaults() {
        let json = r#"{
            "id": "abc",
            "genre": null,
            "tier": "",
            "facePercentage": null,
            "subscribers": null,
            "colors": null
        }"#;
        let video: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(video.genre, UNKNOWN);
        assert_eq!(video.tier, OTHER);
        assert_eq!(video.face_percentage, 0.0);
        assert_eq!(video.subscribers, 1.0);
        assert!(video.colors.is_empty());
    }

    #[test]
    fn camel_case_fields_deserialize() {
        let json = r##"{
            "id": "v1",
            "title": "How volcanoes work",
            "channelName": "Science Hour",
            "genre": "education",
            "qualityScore": 72.5,
            "facePercentage": 18.0,
            "views": 125000,
            "subscribers": 40000,
            "colors": ["#FF0000", [0, 0, 255], "rgb(10, 20, 30)"]
        }"##;
        let video: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(video.channel_name, "Science Hour");
        assert_eq!(video.rqs(), Some(72.5));
        assert_eq!(video.colors.len(), 3);
        assert_eq!(video.colors[0], ColorValue::Text("#FF0000".to_string()));
        assert_eq!(video.colors[1], ColorValue::Rgb([0.0, 0.0, 255.0]));
    }

    #[test]
    fn face_coverage_is_clamped() {
        let video = VideoRecord {
            face_percentage: 140.0,
            ..VideoRecord::default()
        };
        assert_eq!(video.face_coverage(), 100.0);

        let video = VideoRecord {
            face_percentage: f64::NAN,
            ..VideoRecord::default()
        };
        assert_eq!(video.face_coverage(), 0.0);
    }

    #[test]
    fn zero_subscribers_do_not_divide_by_zero() {
        let video = VideoRecord {
            views: 500.0,
            subscribers: 0.0,
            ..VideoRecord::default()
        };
        assert_eq!(video.views_per_subscriber(), 500.0);
    }

    #[test]
    fn non_finite_rqs_reads_as_missing() {
        let video = VideoRecord {
            quality_score: Some(f64::INFINITY),
            ..VideoRecord::default()
        };
        assert!(video.rqs().is_none());
    }
}
