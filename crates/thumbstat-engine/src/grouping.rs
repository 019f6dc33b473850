//! Ephemeral key → members grouping used by the heatmap and leaderboard.

use std::collections::HashMap;

use crate::metric::ScoredVideo;
use crate::types::ExampleVideo;

/// Members sharing one key, in input order.
#[derive(Debug)]
pub(crate) struct AggregationGroup<'s, 'a> {
    pub key: String,
    pub members: Vec<&'s ScoredVideo<'a>>,
}

/// Single pass building key → members. Keys keep first-seen order; a video
/// yielding several keys joins every one of those groups.
pub(crate) fn group_by<'s, 'a, F, I>(
    items: &'s [ScoredVideo<'a>],
    keys_of: F,
) -> Vec<AggregationGroup<'s, 'a>>
where
    F: Fn(&ScoredVideo<'a>) -> I,
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<AggregationGroup<'s, 'a>> = Vec::new();

    for item in items {
        for key in keys_of(item) {
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                groups.push(AggregationGroup {
                    key,
                    members: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].members.push(item);
        }
    }

    groups
}

pub(crate) fn example_of(scored: &ScoredVideo<'_>) -> ExampleVideo {
    ExampleVideo {
        id: scored.video.id.clone(),
        title: scored.video.title.clone(),
        channel_name: scored.video.channel_name.clone(),
        metric_value: scored.value,
        palette: scored.palette.hex_colors.clone(),
        face_percentage: scored.video.face_coverage(),
    }
}

/// The `limit` highest-value members; ties keep input order.
pub(crate) fn top_examples(members: &[&ScoredVideo<'_>], limit: usize) -> Vec<ExampleVideo> {
    let mut ranked: Vec<&ScoredVideo<'_>> = members.to_vec();
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked.into_iter().take(limit).map(example_of).collect()
}

/// The first `limit` members in input order.
pub(crate) fn first_examples(members: &[&ScoredVideo<'_>], limit: usize) -> Vec<ExampleVideo> {
    members.iter().take(limit).map(|m| example_of(m)).collect()
}
