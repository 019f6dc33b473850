//! Metric extraction and summary-statistic selection shared by the analyzers.

use thumbstat_core::VideoRecord;

use crate::palette::{describe_palette, PaletteDescriptor};
use crate::stats::{mean, median};
use crate::types::{Metric, ViewsMode};

/// Summary statistic applied to a group's metric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Mean,
    Median,
}

impl Statistic {
    /// RQS is always averaged; views follow the caller's views mode.
    #[must_use]
    pub fn for_metric(metric: Metric, views_mode: ViewsMode) -> Self {
        match (metric, views_mode) {
            (Metric::Views, ViewsMode::Median) => Statistic::Median,
            _ => Statistic::Mean,
        }
    }

    #[must_use]
    pub fn apply(self, values: &[f64]) -> Option<f64> {
        match self {
            Statistic::Mean => mean(values),
            Statistic::Median => median(values),
        }
    }
}

/// The metric value of one video, or `None` when it is missing or non-numeric.
#[must_use]
pub fn metric_value(video: &VideoRecord, metric: Metric) -> Option<f64> {
    match metric {
        Metric::Rqs => video.rqs(),
        Metric::Views => Some(video.views).filter(|v| v.is_finite() && *v >= 0.0),
    }
}

/// A video paired with its palette descriptor and metric value.
#[derive(Debug, Clone)]
pub(crate) struct ScoredVideo<'a> {
    pub video: &'a VideoRecord,
    pub palette: PaletteDescriptor,
    pub value: f64,
}

/// Describe every video once and drop those without a usable metric value.
pub(crate) fn score_videos(records: &[VideoRecord], metric: Metric) -> Vec<ScoredVideo<'_>> {
    let scored: Vec<ScoredVideo<'_>> = records
        .iter()
        .filter_map(|video| {
            let value = metric_value(video, metric)?;
            Some(ScoredVideo {
                video,
                palette: describe_palette(&video.colors),
                value,
            })
        })
        .collect();

    let dropped = records.len() - scored.len();
    if dropped > 0 {
        tracing::debug!(
            metric = metric.as_str(),
            dropped,
            "excluding videos without a usable metric value"
        );
    }
    scored
}

pub(crate) fn values_of(members: &[&ScoredVideo<'_>]) -> Vec<f64> {
    members.iter().map(|m| m.value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rqs_uses_mean_regardless_of_views_mode() {
        assert_eq!(
            Statistic::for_metric(Metric::Rqs, ViewsMode::Median),
            Statistic::Mean
        );
        assert_eq!(
            Statistic::for_metric(Metric::Views, ViewsMode::Median),
            Statistic::Median
        );
        assert_eq!(
            Statistic::for_metric(Metric::Views, ViewsMode::Avg),
            Statistic::Mean
        );
    }

    #[test]
    fn metric_value_skips_missing_rqs_and_negative_views() {
        let video = VideoRecord {
            views: -5.0,
            quality_score: None,
            ..VideoRecord::default()
        };
        assert_eq!(metric_value(&video, Metric::Rqs), None);
        assert_eq!(metric_value(&video, Metric::Views), None);
    }

    #[test]
    fn score_videos_drops_unusable_records() {
        let records = vec![
            VideoRecord {
                id: "a".into(),
                quality_score: Some(50.0),
                ..VideoRecord::default()
            },
            VideoRecord {
                id: "b".into(),
                quality_score: Some(f64::NAN),
                ..VideoRecord::default()
            },
        ];
        let scored = score_videos(&records, Metric::Rqs);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].video.id, "a");
    }
}
