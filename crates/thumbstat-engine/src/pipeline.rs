//! Record filtering, genre assignment, and the simple rollups charts read directly.
//!
//! Every function here returns new values; the caller's records are never mutated.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thumbstat_core::{
    GenreClassifier, RqsBand, SubscriberTier, VideoRecord, ViewTier, OTHER, UNKNOWN,
};

use crate::error::EngineError;

/// Filter value that disables a filter.
pub const ALL: &str = "all";

/// Exact-match record filters. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    pub genre: Option<String>,
    pub tier: Option<String>,
    pub global_tier: Option<String>,
    pub genre_tier: Option<String>,
}

impl Filters {
    /// Build filters from raw dashboard values, treating `"all"` as unset.
    #[must_use]
    pub fn from_values(genre: &str, tier: &str, global_tier: &str, genre_tier: &str) -> Self {
        Self {
            genre: active(genre),
            tier: active(tier),
            global_tier: active(global_tier),
            genre_tier: active(genre_tier),
        }
    }

    /// True when no filter narrows the records, counting `"all"` and blank as unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.genre, &self.tier, &self.global_tier, &self.genre_tier]
            .into_iter()
            .all(|value| wanted(value.as_deref()).is_none())
    }
}

fn active(value: &str) -> Option<String> {
    wanted(Some(value)).map(str::to_string)
}

/// The value a filter matches against, or `None` when it is unset, blank or `"all"`.
fn wanted(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != ALL)
}

/// Apply filters in order: genre, tier, global tier, genre tier.
///
/// A filter set to `"all"` or left blank is skipped, whether the [`Filters`]
/// came from [`Filters::from_values`], deserialized config, or a struct literal.
#[must_use]
pub fn apply_filters(records: &[VideoRecord], filters: &Filters) -> Vec<VideoRecord> {
    let mut kept: Vec<&VideoRecord> = records.iter().collect();
    retain_matching(&mut kept, "genre", filters.genre.as_deref(), |v| &v.genre);
    retain_matching(&mut kept, "tier", filters.tier.as_deref(), |v| &v.tier);
    retain_matching(&mut kept, "globalTier", filters.global_tier.as_deref(), |v| {
        &v.global_tier
    });
    retain_matching(&mut kept, "genreTier", filters.genre_tier.as_deref(), |v| {
        &v.genre_tier
    });
    kept.into_iter().cloned().collect()
}

fn retain_matching<F>(
    kept: &mut Vec<&VideoRecord>,
    filter: &str,
    value: Option<&str>,
    field: F,
) where
    F: Fn(&VideoRecord) -> &String,
{
    let Some(wanted) = wanted(value) else {
        return;
    };
    kept.retain(|v| field(v).as_str() == wanted);
    tracing::debug!(filter, value = wanted, remaining = kept.len(), "filter applied");
}

/// Fill unknown genres through `classifier`, unknown global tiers from
/// subscriber counts, and missing view tiers from view counts.
#[must_use]
pub fn assign_genres(
    records: &[VideoRecord],
    classifier: &dyn GenreClassifier,
) -> Vec<VideoRecord> {
    let mut classified = 0usize;
    let out: Vec<VideoRecord> = records
        .iter()
        .map(|video| {
            let mut video = video.clone();
            if video.genre.is_empty() || video.genre == UNKNOWN {
                video.genre = classifier.classify(&video.channel_name);
                if video.genre != UNKNOWN {
                    classified += 1;
                }
            }
            if video.global_tier.is_empty() || video.global_tier == UNKNOWN {
                video.global_tier = SubscriberTier::from_subscribers(video.subscribers)
                    .as_str()
                    .to_string();
            }
            if video.tier.is_empty() || video.tier == OTHER {
                video.tier = ViewTier::from_views(video.views_or_zero())
                    .as_str()
                    .to_string();
            }
            video
        })
        .collect();

    tracing::debug!(records = out.len(), classified, "genres assigned");
    out
}

/// Totals and averages for one genre or tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rollup {
    pub key: String,
    pub video_count: usize,
    pub channel_count: usize,
    pub total_views: f64,
    pub average_views: f64,
    /// Over videos with a usable score.
    pub average_rqs: f64,
    /// Band of `average_rqs`; `None` when no member has a usable score.
    pub rqs_band: Option<RqsBand>,
    pub average_face_percentage: f64,
    pub average_views_per_subscriber: f64,
}

fn rollup(key: String, members: &[&VideoRecord]) -> Rollup {
    #[allow(clippy::cast_precision_loss)]
    let divisor = members.len().max(1) as f64;
    let scores: Vec<f64> = members.iter().filter_map(|v| v.rqs()).collect();
    #[allow(clippy::cast_precision_loss)]
    let rated = scores.len().max(1) as f64;
    let channels: HashSet<&str> = members.iter().map(|v| v.channel_name.as_str()).collect();
    let total_views: f64 = members.iter().map(|v| v.views_or_zero()).sum();
    let average_rqs = scores.iter().sum::<f64>() / rated;

    Rollup {
        key,
        video_count: members.len(),
        channel_count: channels.len(),
        total_views,
        average_views: total_views / divisor,
        average_rqs,
        rqs_band: (!scores.is_empty()).then(|| RqsBand::from_score(average_rqs)),
        average_face_percentage: members.iter().map(|v| v.face_coverage()).sum::<f64>() / divisor,
        average_views_per_subscriber: members.iter().map(|v| v.views_per_subscriber()).sum::<f64>()
            / divisor,
    }
}

/// One rollup per genre, video count descending then genre ascending.
#[must_use]
pub fn rollup_by_genre(records: &[VideoRecord]) -> Vec<Rollup> {
    let mut keys: Vec<&str> = Vec::new();
    for video in records {
        if !keys.contains(&video.genre.as_str()) {
            keys.push(video.genre.as_str());
        }
    }

    let mut rollups: Vec<Rollup> = keys
        .into_iter()
        .map(|key| {
            let members: Vec<&VideoRecord> = records.iter().filter(|v| v.genre == key).collect();
            rollup(key.to_string(), &members)
        })
        .collect();
    rollups.sort_by(|a, b| b.video_count.cmp(&a.video_count).then_with(|| a.key.cmp(&b.key)));
    rollups
}

/// One rollup per subscriber tier present, largest tier first.
#[must_use]
pub fn rollup_by_tier(records: &[VideoRecord]) -> Vec<Rollup> {
    SubscriberTier::ALL
        .into_iter()
        .filter_map(|tier| {
            let members: Vec<&VideoRecord> = records
                .iter()
                .filter(|v| SubscriberTier::from_subscribers(v.subscribers) == tier)
                .collect();
            (!members.is_empty()).then(|| rollup(tier.as_str().to_string(), &members))
        })
        .collect()
}

/// Sort order for [`summarize_channels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelSort {
    Name,
    Videos,
    #[default]
    Views,
    Engagement,
}

impl ChannelSort {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelSort::Name => "name",
            ChannelSort::Videos => "videos",
            ChannelSort::Views => "views",
            ChannelSort::Engagement => "engagement",
        }
    }
}

impl FromStr for ChannelSort {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ChannelSort::Name),
            "videos" => Ok(ChannelSort::Videos),
            "views" => Ok(ChannelSort::Views),
            "engagement" => Ok(ChannelSort::Engagement),
            other => Err(EngineError::UnknownOption {
                option: "sort",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub channel_name: String,
    pub genre: String,
    pub video_count: usize,
    pub total_views: f64,
    pub average_views: f64,
    /// Largest subscriber count seen on the channel's videos.
    pub subscribers: f64,
    /// Average views per subscriber.
    pub engagement: f64,
}

/// Per-channel totals, sorted by `sort`. Ties fall back to channel name.
#[must_use]
pub fn summarize_channels(records: &[VideoRecord], sort: ChannelSort) -> Vec<ChannelSummary> {
    let mut names: Vec<&str> = Vec::new();
    for video in records {
        if !names.contains(&video.channel_name.as_str()) {
            names.push(video.channel_name.as_str());
        }
    }

    let mut summaries: Vec<ChannelSummary> = names
        .into_iter()
        .map(|name| {
            let members: Vec<&VideoRecord> =
                records.iter().filter(|v| v.channel_name == name).collect();
            #[allow(clippy::cast_precision_loss)]
            let divisor = members.len().max(1) as f64;
            let total_views: f64 = members.iter().map(|v| v.views_or_zero()).sum();
            ChannelSummary {
                channel_name: name.to_string(),
                genre: members
                    .first()
                    .map_or_else(|| UNKNOWN.to_string(), |v| v.genre.clone()),
                video_count: members.len(),
                total_views,
                average_views: total_views / divisor,
                subscribers: members
                    .iter()
                    .map(|v| v.subscriber_divisor())
                    .fold(1.0, f64::max),
                engagement: members.iter().map(|v| v.views_per_subscriber()).sum::<f64>()
                    / divisor,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        let primary = match sort {
            ChannelSort::Name => std::cmp::Ordering::Equal,
            ChannelSort::Videos => b.video_count.cmp(&a.video_count),
            ChannelSort::Views => b.total_views.total_cmp(&a.total_views),
            ChannelSort::Engagement => b.engagement.total_cmp(&a.engagement),
        };
        primary.then_with(|| a.channel_name.cmp(&b.channel_name))
    });
    summaries
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
