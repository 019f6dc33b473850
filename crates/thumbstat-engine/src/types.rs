//! Analyzer options, per-call configuration values, and shared result shapes.
//!
//! Every analyzer takes one immutable config value; there is no global state.
//! String-valued options parse through `FromStr` (or serde) and reject unknown
//! values with [`EngineError::UnknownOption`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const DEFAULT_MIN_N: usize = 10;
pub const DEFAULT_CONFIDENCE: f64 = 0.95;
pub const DEFAULT_RESAMPLES: usize = 1000;
pub const DEFAULT_FACE_RESAMPLES: usize = 100;
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Performance metric an analysis ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Per-video quality score.
    #[default]
    Rqs,
    Views,
}

impl Metric {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Rqs => "rqs",
            Metric::Views => "views",
        }
    }
}

impl FromStr for Metric {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rqs" => Ok(Metric::Rqs),
            "views" => Ok(Metric::Views),
            other => Err(unknown("metric", other)),
        }
    }
}

/// How view counts are summarized. Ignored for [`Metric::Rqs`], which is always averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewsMode {
    #[default]
    Avg,
    Median,
}

impl ViewsMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ViewsMode::Avg => "avg",
            ViewsMode::Median => "median",
        }
    }
}

impl FromStr for ViewsMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avg" => Ok(ViewsMode::Avg),
            "median" => Ok(ViewsMode::Median),
            other => Err(unknown("viewsMode", other)),
        }
    }
}

/// Color granularity: the 15 families or the Warm/Cool/Neutral groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    Fine,
    Coarse,
}

impl Grouping {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Grouping::Fine => "fine",
            Grouping::Coarse => "coarse",
        }
    }
}

impl FromStr for Grouping {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fine" => Ok(Grouping::Fine),
            "coarse" => Ok(Grouping::Coarse),
            other => Err(unknown("grouping", other)),
        }
    }
}

/// Column dimension shared by both heatmap tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColumnDimension {
    #[default]
    #[serde(rename = "colorCount")]
    ColorCount,
    #[serde(rename = "contrastClass")]
    ContrastClass,
}

impl ColumnDimension {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnDimension::ColorCount => "colorCount",
            ColumnDimension::ContrastClass => "contrastClass",
        }
    }
}

impl FromStr for ColumnDimension {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "colorCount" => Ok(ColumnDimension::ColorCount),
            "contrastClass" => Ok(ColumnDimension::ContrastClass),
            other => Err(unknown("column", other)),
        }
    }
}

/// What a leaderboard groups videos by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardEntity {
    /// Whole palette signature; each video lands in exactly one group.
    #[default]
    Signatures,
    /// Individual color family; a video lands in every family it contains.
    SingleColors,
}

impl LeaderboardEntity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LeaderboardEntity::Signatures => "signatures",
            LeaderboardEntity::SingleColors => "single_colors",
        }
    }
}

impl FromStr for LeaderboardEntity {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signatures" => Ok(LeaderboardEntity::Signatures),
            "single_colors" => Ok(LeaderboardEntity::SingleColors),
            other => Err(unknown("entity", other)),
        }
    }
}

/// Face-coverage binning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceBinScheme {
    /// Eight bins with breakpoints at 0, 5, 10, 20, 35, 50, 75, 100.
    #[default]
    Standard,
    /// Twelve equal-width bins over `[0, 100]`.
    Fine,
}

impl FaceBinScheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FaceBinScheme::Standard => "standard",
            FaceBinScheme::Fine => "fine",
        }
    }
}

impl FromStr for FaceBinScheme {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(FaceBinScheme::Standard),
            "fine" => Ok(FaceBinScheme::Fine),
            other => Err(unknown("scheme", other)),
        }
    }
}

fn unknown(option: &'static str, value: &str) -> EngineError {
    EngineError::UnknownOption {
        option,
        value: value.to_string(),
    }
}

fn validate_min_n(min_n: usize) -> Result<(), EngineError> {
    if min_n == 0 {
        return Err(EngineError::InvalidMinN);
    }
    Ok(())
}

fn validate_bootstrap(confidence: f64, resamples: usize) -> Result<(), EngineError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(EngineError::InvalidConfidence(confidence));
    }
    if resamples == 0 {
        return Err(EngineError::InvalidResamples);
    }
    Ok(())
}

/// Configuration for [`crate::frequency::analyze_frequency_lift`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrequencyConfig {
    pub metric: Metric,
    pub views_mode: ViewsMode,
    pub grouping: Grouping,
    pub min_n: usize,
    pub include_neutrals: bool,
    pub confidence: f64,
    pub resamples: usize,
    pub seed: Option<u64>,
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Rqs,
            views_mode: ViewsMode::Avg,
            grouping: Grouping::Fine,
            min_n: DEFAULT_MIN_N,
            include_neutrals: true,
            confidence: DEFAULT_CONFIDENCE,
            resamples: DEFAULT_RESAMPLES,
            seed: None,
        }
    }
}

impl FrequencyConfig {
    /// # Errors
    ///
    /// Returns [`EngineError`] when `min_n`, `confidence`, or `resamples` is out of range.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_min_n(self.min_n)?;
        validate_bootstrap(self.confidence, self.resamples)
    }
}

/// Configuration for [`crate::heatmap::build_heatmap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeatmapConfig {
    pub metric: Metric,
    pub views_mode: ViewsMode,
    pub grouping: Grouping,
    pub column: ColumnDimension,
    pub min_n: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Rqs,
            views_mode: ViewsMode::Avg,
            grouping: Grouping::Fine,
            column: ColumnDimension::ColorCount,
            min_n: DEFAULT_MIN_N,
        }
    }
}

impl HeatmapConfig {
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMinN`] when `min_n` is 0.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_min_n(self.min_n)
    }
}

/// Configuration for [`crate::leaderboard::rank_leaderboard`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaderboardConfig {
    pub metric: Metric,
    pub views_mode: ViewsMode,
    pub entity: LeaderboardEntity,
    pub grouping: Grouping,
    pub min_n: usize,
    pub limit: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Rqs,
            views_mode: ViewsMode::Avg,
            entity: LeaderboardEntity::Signatures,
            grouping: Grouping::Fine,
            min_n: DEFAULT_MIN_N,
            limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}

impl LeaderboardConfig {
    /// # Errors
    ///
    /// Returns [`EngineError`] when `min_n` or `limit` is 0.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_min_n(self.min_n)?;
        if self.limit == 0 {
            return Err(EngineError::InvalidLimit);
        }
        Ok(())
    }
}

/// Configuration for [`crate::face::bin_face_coverage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaceConfig {
    pub metric: Metric,
    pub views_mode: ViewsMode,
    pub scheme: FaceBinScheme,
    pub min_n: usize,
    pub confidence: f64,
    pub resamples: usize,
    pub seed: Option<u64>,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Rqs,
            views_mode: ViewsMode::Avg,
            scheme: FaceBinScheme::Standard,
            min_n: DEFAULT_MIN_N,
            confidence: DEFAULT_CONFIDENCE,
            resamples: DEFAULT_FACE_RESAMPLES,
            seed: None,
        }
    }
}

impl FaceConfig {
    /// # Errors
    ///
    /// Returns [`EngineError`] when `min_n`, `confidence`, or `resamples` is out of range.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_min_n(self.min_n)?;
        validate_bootstrap(self.confidence, self.resamples)
    }
}

/// Empirical percentile bounds from a bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// A member video surfaced alongside an aggregate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleVideo {
    pub id: String,
    pub title: String,
    pub channel_name: String,
    pub metric_value: f64,
    /// Parseable palette colors as `#RRGGBB`.
    pub palette: Vec<String>,
    pub face_percentage: f64,
}
