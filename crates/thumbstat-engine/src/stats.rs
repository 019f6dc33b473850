//! Sample statistics and bootstrap confidence intervals.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::ConfidenceInterval;

/// Smallest sample for which [`bootstrap_ci`] returns an interval.
pub const MIN_BOOTSTRAP_SAMPLE: usize = 10;

/// Arithmetic mean. `None` for an empty sample.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    Some(values.iter().sum::<f64>() / n)
}

/// Median; even-length samples average the two middle values. `None` for an empty sample.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Percentile bootstrap interval for the sample mean.
///
/// Draws `resamples` resamples with replacement, takes each mean, sorts them,
/// and reads the bounds at `(1 − confidence) / 2` and `(1 + confidence) / 2`.
/// Returns `None` when the sample has fewer than [`MIN_BOOTSTRAP_SAMPLE`]
/// values or `resamples` is 0.
pub fn bootstrap_ci<R>(
    values: &[f64],
    confidence: f64,
    resamples: usize,
    rng: &mut R,
) -> Option<ConfidenceInterval>
where
    R: Rng,
{
    let n = values.len();
    if n < MIN_BOOTSTRAP_SAMPLE || resamples == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let denom = n as f64;
    let mut means = Vec::with_capacity(resamples);
    for _ in 0..resamples {
        let mut sum = 0.0;
        for _ in 0..n {
            sum += values[rng.random_range(0..n)];
        }
        means.push(sum / denom);
    }
    means.sort_by(f64::total_cmp);

    let lower = means[percentile_index((1.0 - confidence) / 2.0, resamples)];
    let upper = means[percentile_index((1.0 + confidence) / 2.0, resamples)];
    Some(ConfidenceInterval { lower, upper })
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn percentile_index(quantile: f64, len: usize) -> usize {
    let idx = (quantile.clamp(0.0, 1.0) * len as f64).floor() as usize;
    idx.min(len - 1)
}

/// Random source for one analyzer call: seeded when a seed is configured,
/// OS entropy otherwise.
#[must_use]
pub fn resampling_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
