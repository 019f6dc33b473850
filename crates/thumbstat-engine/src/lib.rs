//! Thumbnail performance analytics for thumbstat.
//!
//! Turns a flat list of [`VideoRecord`](thumbstat_core::VideoRecord)s into
//! ranked, sample-size-gated insights: color-family frequency and lift, palette
//! heatmaps, palette leaderboards, and face-coverage bins. Every analysis is a
//! pure function of (records, config); bootstrap resampling takes an optional
//! seed so results can be reproduced exactly.

pub mod color;
pub mod error;
pub mod export;
pub mod face;
pub mod frequency;
pub mod heatmap;
pub mod leaderboard;
pub mod palette;
pub mod pipeline;
pub mod stats;
pub mod types;

mod grouping;
mod metric;

#[cfg(test)]
mod test_support;

pub use color::{
    coarse_group_of, family_of, parse_color, to_hsl, CoarseGroup, ColorFamily, Hsl, Rgb,
};
pub use error::EngineError;
pub use export::{build_report, fingerprint, to_json, ExportReport, ReportConfig};
pub use face::{bin_face_coverage, FaceBin, FaceCoverageReport};
pub use frequency::{analyze_frequency_lift, FrequencyLiftReport, FrequencyLiftRow};
pub use heatmap::{build_heatmap, CombinationCell, HeatmapReport, SingleColorCell};
pub use leaderboard::{rank_entries, rank_leaderboard, LeaderboardEntry};
pub use metric::{metric_value, Statistic};
pub use palette::{describe_palette, ContrastClass, PaletteDescriptor};
pub use pipeline::{
    apply_filters, assign_genres, rollup_by_genre, rollup_by_tier, summarize_channels,
    ChannelSort, ChannelSummary, Filters, Rollup,
};
pub use stats::{bootstrap_ci, mean, median, resampling_rng};
pub use types::{
    ColumnDimension, ConfidenceInterval, ExampleVideo, FaceBinScheme, FaceConfig,
    FrequencyConfig, Grouping, HeatmapConfig, LeaderboardConfig, LeaderboardEntity, Metric,
    ViewsMode,
};
