//! `report` command: load records, classify genres, run every analyzer, write JSON.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use thumbstat_core::{AppConfig, VideoRecord, UNKNOWN};
use thumbstat_engine::{
    assign_genres, build_report, to_json, ChannelSort, ColumnDimension, FaceBinScheme,
    FaceConfig, Filters, FrequencyConfig, Grouping, HeatmapConfig, LeaderboardConfig,
    LeaderboardEntity, Metric, ReportConfig, ViewsMode,
};

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// JSON file holding an array of video records
    #[arg(long)]
    pub input: PathBuf,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Genre filter ("all" disables)
    #[arg(long, default_value = "all")]
    pub genre: String,

    /// View tier filter ("all" disables)
    #[arg(long, default_value = "all")]
    pub tier: String,

    /// Global subscriber tier filter ("all" disables)
    #[arg(long, default_value = "all")]
    pub global_tier: String,

    /// Genre subscriber tier filter ("all" disables)
    #[arg(long, default_value = "all")]
    pub genre_tier: String,

    /// rqs or views
    #[arg(long, default_value = "rqs")]
    pub metric: Metric,

    /// avg or median; only applies to views
    #[arg(long, default_value = "avg")]
    pub views_mode: ViewsMode,

    /// fine (15 families) or coarse (Warm/Cool/Neutral)
    #[arg(long, default_value = "fine")]
    pub grouping: Grouping,

    /// Heatmap column: colorCount or contrastClass
    #[arg(long, default_value = "colorCount")]
    pub column: ColumnDimension,

    /// Leaderboard entity: signatures or single_colors
    #[arg(long, default_value = "signatures")]
    pub entity: LeaderboardEntity,

    /// Face binning scheme: standard or fine
    #[arg(long, default_value = "standard")]
    pub scheme: FaceBinScheme,

    /// Channel list order: name, videos, views, or engagement
    #[arg(long, default_value = "views")]
    pub channel_sort: ChannelSort,

    /// Leaderboard length
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Override THUMBSTAT_MIN_N
    #[arg(long)]
    pub min_n: Option<usize>,
}

pub(crate) fn run_report(config: &AppConfig, args: &ReportArgs) -> anyhow::Result<()> {
    let records = read_records(&args.input)?;
    tracing::info!(
        path = %args.input.display(),
        records = records.len(),
        "loaded video records"
    );

    let records = match &config.genres_path {
        Some(path) => {
            let table = thumbstat_core::load_genres(path)
                .with_context(|| format!("loading genre table {}", path.display()))?;
            tracing::info!(channels = table.len(), "genre table loaded");
            assign_genres(&records, &table)
        }
        None => assign_genres(&records, &|_: &str| UNKNOWN.to_string()),
    };

    let report_config = build_report_config(config, args);
    let report = build_report(&records, &report_config, chrono::Utc::now())?;
    let json = to_json(&report)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing report to {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                fingerprint = %report.fingerprint,
                "report written"
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn read_records(path: &Path) -> anyhow::Result<Vec<VideoRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading records from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing records from {}", path.display()))
}

/// Merge process settings with command-line options into one report config.
fn build_report_config(config: &AppConfig, args: &ReportArgs) -> ReportConfig {
    let min_n = args.min_n.unwrap_or(config.min_n);
    ReportConfig {
        filters: Filters::from_values(&args.genre, &args.tier, &args.global_tier, &args.genre_tier),
        frequency: FrequencyConfig {
            metric: args.metric,
            views_mode: args.views_mode,
            grouping: args.grouping,
            min_n,
            include_neutrals: true,
            confidence: config.confidence,
            resamples: config.bootstrap_resamples,
            seed: config.seed,
        },
        heatmap: HeatmapConfig {
            metric: args.metric,
            views_mode: args.views_mode,
            grouping: args.grouping,
            column: args.column,
            min_n,
        },
        leaderboard: LeaderboardConfig {
            metric: args.metric,
            views_mode: args.views_mode,
            entity: args.entity,
            grouping: args.grouping,
            min_n,
            limit: args.limit,
        },
        face: FaceConfig {
            metric: args.metric,
            views_mode: args.views_mode,
            scheme: args.scheme,
            min_n,
            confidence: config.confidence,
            resamples: config.face_resamples,
            seed: config.seed,
        },
        channel_sort: args.channel_sort,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use thumbstat_core::Environment;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: ReportArgs,
    }

    fn app_config() -> AppConfig {
        AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            genres_path: None,
            min_n: 7,
            confidence: 0.9,
            bootstrap_resamples: 200,
            face_resamples: 50,
            seed: Some(11),
        }
    }

    fn parse(argv: &[&str]) -> ReportArgs {
        let mut full = vec!["thumbstat-cli", "--input", "records.json"];
        full.extend_from_slice(argv);
        Harness::try_parse_from(full).unwrap().args
    }

    #[test]
    fn defaults_come_from_app_config() {
        let cfg = build_report_config(&app_config(), &parse(&[]));
        assert!(cfg.filters.is_empty());
        assert_eq!(cfg.frequency.min_n, 7);
        assert_eq!(cfg.frequency.resamples, 200);
        assert_eq!(cfg.face.resamples, 50);
        assert_eq!(cfg.face.seed, Some(11));
        assert_eq!(cfg.leaderboard.limit, 10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn flags_override_options() {
        let args = parse(&[
            "--metric",
            "views",
            "--views-mode",
            "median",
            "--entity",
            "single_colors",
            "--column",
            "contrastClass",
            "--genre",
            "Gaming",
            "--min-n",
            "3",
        ]);
        let cfg = build_report_config(&app_config(), &args);
        assert_eq!(cfg.heatmap.metric, Metric::Views);
        assert_eq!(cfg.leaderboard.views_mode, ViewsMode::Median);
        assert_eq!(cfg.leaderboard.entity, LeaderboardEntity::SingleColors);
        assert_eq!(cfg.heatmap.column, ColumnDimension::ContrastClass);
        assert_eq!(cfg.filters.genre.as_deref(), Some("Gaming"));
        assert_eq!(cfg.face.min_n, 3);
    }

    #[test]
    fn unknown_option_values_are_rejected() {
        let result =
            Harness::try_parse_from(["thumbstat-cli", "--input", "x.json", "--metric", "likes"]);
        assert!(result.is_err());
    }
}
