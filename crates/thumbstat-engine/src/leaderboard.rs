//! Palette leaderboard: top-N signatures or single colors by metric.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thumbstat_core::VideoRecord;

use crate::error::EngineError;
use crate::grouping::{group_by, top_examples, AggregationGroup};
use crate::metric::{score_videos, values_of, Statistic};
use crate::types::{ExampleVideo, LeaderboardConfig, LeaderboardEntity};

pub const TOP_GENRES: usize = 2;
pub const ENTRY_EXAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based, assigned after sorting.
    pub rank: usize,
    pub signature: String,
    pub metric_value: f64,
    pub n: usize,
    /// Percent of all filtered videos in this group, scored or not.
    pub usage_rate: f64,
    pub top_genres: Vec<String>,
    pub examples: Vec<ExampleVideo>,
}

/// Rank palette groups by the configured metric.
///
/// With [`LeaderboardEntity::SingleColors`] a video joins every family it
/// contains. Groups below `min_n` are excluded outright.
///
/// # Errors
///
/// Returns [`EngineError`] when `config` fails validation.
pub fn rank_leaderboard(
    records: &[VideoRecord],
    config: &LeaderboardConfig,
) -> Result<Vec<LeaderboardEntry>, EngineError> {
    config.validate()?;

    let statistic = Statistic::for_metric(config.metric, config.views_mode);
    let scored = score_videos(records, config.metric);
    #[allow(clippy::cast_precision_loss)]
    let total = records.len().max(1) as f64;

    let groups = group_by(&scored, |s| -> Vec<String> {
        match config.entity {
            LeaderboardEntity::Signatures => {
                vec![s.palette.signature_for(config.grouping).to_string()]
            }
            LeaderboardEntity::SingleColors => s
                .palette
                .labels(config.grouping)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    });
    let group_count = groups.len();

    let mut entries: Vec<LeaderboardEntry> = groups
        .into_iter()
        .filter(|g| g.members.len() >= config.min_n)
        .filter_map(|g| {
            let metric_value = statistic.apply(&values_of(&g.members))?;
            let n = g.members.len();
            #[allow(clippy::cast_precision_loss)]
            let usage_rate = n as f64 / total * 100.0;
            Some(LeaderboardEntry {
                rank: 0,
                metric_value,
                n,
                usage_rate,
                top_genres: top_genres(&g),
                examples: top_examples(&g.members, ENTRY_EXAMPLES),
                signature: g.key,
            })
        })
        .collect();

    rank_entries(&mut entries);
    entries.truncate(config.limit);

    tracing::debug!(
        entity = config.entity.as_str(),
        groups = group_count,
        ranked = entries.len(),
        "leaderboard ranked"
    );

    Ok(entries)
}

/// Sort by metric desc, `n` desc, usage desc, signature asc, then number ranks from 1.
pub fn rank_entries(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(compare_entries);
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
}

fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.metric_value
        .total_cmp(&a.metric_value)
        .then_with(|| b.n.cmp(&a.n))
        .then_with(|| b.usage_rate.total_cmp(&a.usage_rate))
        .then_with(|| a.signature.cmp(&b.signature))
}

/// The most frequent member genres; ties keep first-seen order.
fn top_genres(group: &AggregationGroup<'_, '_>) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for member in &group.members {
        let genre = member.video.genre.as_str();
        match counts.iter_mut().find(|(g, _)| *g == genre) {
            Some((_, count)) => *count += 1,
            None => counts.push((genre, 1)),
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOP_GENRES)
        .map(|(g, _)| g.to_string())
        .collect()
}
