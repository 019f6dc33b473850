//! Face-coverage binning with per-bin statistics and lift against the global baseline.

use serde::{Deserialize, Serialize};
use thumbstat_core::VideoRecord;

use crate::error::EngineError;
use crate::grouping::top_examples;
use crate::metric::{score_videos, values_of, ScoredVideo, Statistic};
use crate::stats::{bootstrap_ci, mean, median, resampling_rng};
use crate::types::{ConfidenceInterval, ExampleVideo, FaceBinScheme, FaceConfig};

pub const BIN_EXAMPLES: usize = 3;

/// Breakpoints of the standard scheme; exact zero gets its own bin ahead of these.
const STANDARD_EDGES: [f64; 8] = [0.0, 5.0, 10.0, 20.0, 35.0, 50.0, 75.0, 100.0];

const FINE_BINS: usize = 12;

/// A coverage range, half-open on the right except for the last bin.
/// `lower == upper == 0` is the exact-zero bin.
#[derive(Debug, Clone, PartialEq)]
struct BinRange {
    label: String,
    lower: f64,
    upper: f64,
    /// Excludes `lower` itself; set on the range that follows the zero bin.
    open_lower: bool,
}

impl BinRange {
    fn contains(&self, coverage: f64, is_last: bool) -> bool {
        if self.upper == 0.0 {
            return coverage == 0.0;
        }
        let above = if self.open_lower {
            coverage > self.lower
        } else {
            coverage >= self.lower
        };
        above && (coverage < self.upper || (is_last && coverage <= self.upper))
    }
}

fn ranges(scheme: FaceBinScheme) -> Vec<BinRange> {
    match scheme {
        FaceBinScheme::Standard => {
            let mut out = vec![BinRange {
                label: "0%".to_string(),
                lower: 0.0,
                upper: 0.0,
                open_lower: false,
            }];
            out.extend(STANDARD_EDGES.windows(2).map(|w| BinRange {
                label: format!("{}-{}%", w[0], w[1]),
                lower: w[0],
                upper: w[1],
                open_lower: w[0] == 0.0,
            }));
            out
        }
        FaceBinScheme::Fine => {
            #[allow(clippy::cast_precision_loss)]
            let width = 100.0 / FINE_BINS as f64;
            (0..FINE_BINS)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let lower = i as f64 * width;
                    let upper = if i + 1 == FINE_BINS {
                        100.0
                    } else {
                        lower + width
                    };
                    BinRange {
                        label: format!("{lower:.1}-{upper:.1}%"),
                        lower,
                        upper,
                        open_lower: false,
                    }
                })
                .collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceBin {
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    pub n: usize,
    /// Percent of all filtered videos in this bin; reported for every bin.
    pub usage_rate: f64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Mean or median, per the configured metric and views mode.
    pub statistic: Option<f64>,
    pub ci: Option<ConfidenceInterval>,
    pub lift: Option<f64>,
    /// `None` when the baseline is zero.
    pub lift_percent: Option<f64>,
    pub examples: Vec<ExampleVideo>,
    pub insufficient_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceCoverageReport {
    pub scheme: FaceBinScheme,
    /// Statistic over every scored video, before binning.
    pub baseline: Option<f64>,
    /// All bins in coverage order.
    pub bins: Vec<FaceBin>,
    /// Sufficient bins, statistic descending.
    pub best_ranges: Vec<FaceBin>,
}

/// Bucket videos by face coverage and compare each bucket to the baseline.
///
/// # Errors
///
/// Returns [`EngineError`] when `config` fails validation.
pub fn bin_face_coverage(
    records: &[VideoRecord],
    config: &FaceConfig,
) -> Result<FaceCoverageReport, EngineError> {
    config.validate()?;

    let statistic = Statistic::for_metric(config.metric, config.views_mode);
    let scored = score_videos(records, config.metric);
    let baseline = statistic.apply(&scored.iter().map(|s| s.value).collect::<Vec<_>>());

    let ranges = ranges(config.scheme);
    let mut members: Vec<Vec<&ScoredVideo<'_>>> = vec![Vec::new(); ranges.len()];
    let last = ranges.len() - 1;
    for s in &scored {
        let coverage = s.video.face_coverage();
        if let Some(idx) = (0..ranges.len()).find(|&i| ranges[i].contains(coverage, i == last)) {
            members[idx].push(s);
        }
    }

    let mut rng = resampling_rng(config.seed);
    #[allow(clippy::cast_precision_loss)]
    let total = records.len().max(1) as f64;

    let bins: Vec<FaceBin> = ranges
        .into_iter()
        .zip(members)
        .map(|(range, members)| {
            let n = members.len();
            #[allow(clippy::cast_precision_loss)]
            let usage_rate = n as f64 / total * 100.0;
            let mut bin = FaceBin {
                label: range.label,
                lower: range.lower,
                upper: range.upper,
                n,
                usage_rate,
                mean: None,
                median: None,
                statistic: None,
                ci: None,
                lift: None,
                lift_percent: None,
                examples: Vec::new(),
                insufficient_data: n < config.min_n,
            };
            if bin.insufficient_data {
                return bin;
            }

            let values = values_of(&members);
            bin.mean = mean(&values);
            bin.median = median(&values);
            bin.statistic = statistic.apply(&values);
            bin.ci = bootstrap_ci(&values, config.confidence, config.resamples, &mut rng);
            bin.lift = bin.statistic.zip(baseline).map(|(s, b)| s - b);
            bin.lift_percent = bin
                .lift
                .zip(baseline)
                .filter(|(_, b)| *b != 0.0)
                .map(|(l, b)| l / b * 100.0);
            bin.examples = top_examples(&members, BIN_EXAMPLES);
            bin
        })
        .collect();

    let mut best_ranges: Vec<FaceBin> = bins
        .iter()
        .filter(|b| !b.insufficient_data && b.statistic.is_some())
        .cloned()
        .collect();
    best_ranges.sort_by(|a, b| {
        let (sa, sb) = (a.statistic.unwrap_or(0.0), b.statistic.unwrap_or(0.0));
        sb.total_cmp(&sa).then_with(|| a.lower.total_cmp(&b.lower))
    });

    tracing::debug!(
        scheme = config.scheme.as_str(),
        videos = scored.len(),
        sufficient = best_ranges.len(),
        "face coverage binned"
    );

    Ok(FaceCoverageReport {
        scheme: config.scheme,
        baseline,
        bins,
        best_ranges,
    })
}
