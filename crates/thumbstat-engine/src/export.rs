//! Export report bundling every analyzer output for one filtered record set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thumbstat_core::VideoRecord;

use crate::error::EngineError;
use crate::face::{bin_face_coverage, FaceCoverageReport};
use crate::frequency::{analyze_frequency_lift, FrequencyLiftReport};
use crate::heatmap::{build_heatmap, HeatmapReport};
use crate::leaderboard::{rank_leaderboard, LeaderboardEntry};
use crate::pipeline::{
    apply_filters, rollup_by_genre, rollup_by_tier, summarize_channels, ChannelSort,
    ChannelSummary, Filters, Rollup,
};
use crate::types::{FaceConfig, FrequencyConfig, HeatmapConfig, LeaderboardConfig};

/// Everything [`build_report`] needs besides the records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    pub filters: Filters,
    pub frequency: FrequencyConfig,
    pub heatmap: HeatmapConfig,
    pub leaderboard: LeaderboardConfig,
    pub face: FaceConfig,
    pub channel_sort: ChannelSort,
}

impl ReportConfig {
    /// # Errors
    ///
    /// Returns the first analyzer config that fails validation.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.frequency.validate()?;
        self.heatmap.validate()?;
        self.leaderboard.validate()?;
        self.face.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub generated_at: DateTime<Utc>,
    /// Hex SHA-256 of the input record ids and the report config.
    pub fingerprint: String,
    /// Records left after filtering.
    pub record_count: usize,
    pub config: ReportConfig,
    pub frequency: FrequencyLiftReport,
    pub heatmap: HeatmapReport,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub face_coverage: FaceCoverageReport,
    pub genre_rollups: Vec<Rollup>,
    pub tier_rollups: Vec<Rollup>,
    pub channels: Vec<ChannelSummary>,
}

/// Stable key for one (records, config) pair.
///
/// Hashes record ids in input order followed by the JSON form of `config`, so
/// hosts can memoize reports without comparing whole record sets.
///
/// # Errors
///
/// Returns [`EngineError::Serialize`] if `config` cannot be encoded.
pub fn fingerprint(records: &[VideoRecord], config: &ReportConfig) -> Result<String, EngineError> {
    let mut hasher = Sha256::new();
    for record in records {
        hasher.update(record.id.as_bytes());
        hasher.update(b"\n");
    }
    hasher.update(serde_json::to_vec(config)?);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Run the full analysis for one record set.
///
/// 1. Validate every analyzer config up front.
/// 2. Apply `config.filters`.
/// 3. Run frequency/lift, heatmap, leaderboard and face-coverage analyses.
/// 4. Compute genre and tier rollups and channel summaries.
///
/// Empty input (before or after filtering) yields a report of empty sections.
///
/// # Errors
///
/// Returns [`EngineError`] when any analyzer config is invalid.
pub fn build_report(
    records: &[VideoRecord],
    config: &ReportConfig,
    generated_at: DateTime<Utc>,
) -> Result<ExportReport, EngineError> {
    config.validate()?;

    let filtered = apply_filters(records, &config.filters);
    if filtered.is_empty() {
        tracing::info!(
            input = records.len(),
            "no records left after filtering; report sections will be empty"
        );
    }

    let report = ExportReport {
        generated_at,
        fingerprint: fingerprint(records, config)?,
        record_count: filtered.len(),
        config: config.clone(),
        frequency: analyze_frequency_lift(&filtered, &config.frequency)?,
        heatmap: build_heatmap(&filtered, &config.heatmap)?,
        leaderboard: rank_leaderboard(&filtered, &config.leaderboard)?,
        face_coverage: bin_face_coverage(&filtered, &config.face)?,
        genre_rollups: rollup_by_genre(&filtered),
        tier_rollups: rollup_by_tier(&filtered),
        channels: summarize_channels(&filtered, config.channel_sort),
    };

    tracing::debug!(
        records = report.record_count,
        fingerprint = %report.fingerprint,
        "report built"
    );
    Ok(report)
}

/// Pretty-printed JSON for a report.
///
/// # Errors
///
/// Returns [`EngineError::Serialize`] if encoding fails.
pub fn to_json(report: &ExportReport) -> Result<String, EngineError> {
    Ok(serde_json::to_string_pretty(report)?)
}
