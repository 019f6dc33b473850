//! Color-family usage frequency and contains-vs-not performance lift.

use serde::{Deserialize, Serialize};
use thumbstat_core::VideoRecord;

use crate::error::EngineError;
use crate::metric::{score_videos, ScoredVideo, Statistic};
use crate::stats::{bootstrap_ci, resampling_rng};
use crate::types::{ConfidenceInterval, FrequencyConfig};

/// One color family's frequency and lift.
///
/// Rows flagged `insufficient_data` carry counts and frequency only; they are
/// never ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyLiftRow {
    pub family: String,
    /// Videos containing the family.
    pub n: usize,
    /// Videos in the population that do not contain the family.
    pub n_without: usize,
    /// `n / population`, in `[0, 1]`.
    pub frequency: f64,
    pub metric_with: Option<f64>,
    pub metric_without: Option<f64>,
    pub delta: Option<f64>,
    /// Bootstrap interval on the containing partition.
    pub ci: Option<ConfidenceInterval>,
    pub insufficient_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyLiftReport {
    /// Videos the frequencies are relative to.
    pub population: usize,
    /// Every family present, frequency descending.
    pub rows: Vec<FrequencyLiftRow>,
    /// Families with a computed delta, delta descending.
    pub ranked_impact: Vec<FrequencyLiftRow>,
}

/// Compute usage frequency and lift for every color family in `records`.
///
/// The population is every video with a usable metric and at least one family
/// label. With `include_neutrals = false`, neutral labels are removed first and
/// videos left without any label leave the population.
///
/// # Errors
///
/// Returns [`EngineError`] when `config` fails validation.
pub fn analyze_frequency_lift(
    records: &[VideoRecord],
    config: &FrequencyConfig,
) -> Result<FrequencyLiftReport, EngineError> {
    config.validate()?;

    let statistic = Statistic::for_metric(config.metric, config.views_mode);
    let scored = score_videos(records, config.metric);

    let population: Vec<(&ScoredVideo<'_>, Vec<&'static str>)> = scored
        .iter()
        .filter_map(|s| {
            let labels = if config.include_neutrals {
                s.palette.labels(config.grouping)
            } else {
                s.palette.chromatic_labels(config.grouping)
            };
            (!labels.is_empty()).then_some((s, labels))
        })
        .collect();

    let mut families: Vec<&'static str> = Vec::new();
    for (_, labels) in &population {
        for &label in labels {
            if !families.contains(&label) {
                families.push(label);
            }
        }
    }

    let mut rng = resampling_rng(config.seed);
    #[allow(clippy::cast_precision_loss)]
    let total = population.len().max(1) as f64;

    let mut rows: Vec<FrequencyLiftRow> = families
        .into_iter()
        .map(|family| {
            let (with, without): (Vec<f64>, Vec<f64>) = {
                let mut with = Vec::new();
                let mut without = Vec::new();
                for (s, labels) in &population {
                    if labels.contains(&family) {
                        with.push(s.value);
                    } else {
                        without.push(s.value);
                    }
                }
                (with, without)
            };

            let sufficient = with.len() >= config.min_n && without.len() >= config.min_n;
            let metric_with = statistic.apply(&with);
            let metric_without = statistic.apply(&without);
            let (delta, ci) = if sufficient {
                (
                    metric_with.zip(metric_without).map(|(w, wo)| w - wo),
                    bootstrap_ci(&with, config.confidence, config.resamples, &mut rng),
                )
            } else {
                (None, None)
            };

            #[allow(clippy::cast_precision_loss)]
            let frequency = with.len() as f64 / total;

            FrequencyLiftRow {
                family: family.to_string(),
                n: with.len(),
                n_without: without.len(),
                frequency,
                metric_with,
                metric_without,
                delta,
                ci,
                insufficient_data: !sufficient,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.frequency
            .total_cmp(&a.frequency)
            .then_with(|| a.family.cmp(&b.family))
    });

    let mut ranked_impact: Vec<FrequencyLiftRow> = rows
        .iter()
        .filter(|r| !r.insufficient_data && r.delta.is_some())
        .cloned()
        .collect();
    ranked_impact.sort_by(|a, b| {
        let (da, db) = (a.delta.unwrap_or(0.0), b.delta.unwrap_or(0.0));
        db.total_cmp(&da).then_with(|| a.family.cmp(&b.family))
    });

    tracing::debug!(
        population = population.len(),
        families = rows.len(),
        ranked = ranked_impact.len(),
        "frequency/lift analysis complete"
    );

    Ok(FrequencyLiftReport {
        population: population.len(),
        rows,
        ranked_impact,
    })
}

#[cfg(test)]
#[path = "frequency_test.rs"]
mod tests;
