//! Palette × column cross-tabulation.
//!
//! Two tables share one column dimension (color count or contrast class):
//! the combination table aggregates each exact signature, the single-color
//! table reports the with/without delta for each family inside a column.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thumbstat_core::VideoRecord;

use crate::error::EngineError;
use crate::grouping::{first_examples, group_by};
use crate::metric::{score_videos, values_of, ScoredVideo, Statistic};
use crate::palette::PaletteDescriptor;
use crate::types::{ColumnDimension, ExampleVideo, HeatmapConfig};

/// Examples kept per combination cell.
pub const CELL_EXAMPLES: usize = 3;

/// Intensity used when every sufficient combination cell has the same value.
pub const FLAT_INTENSITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationCell {
    pub signature: String,
    pub column: String,
    pub n: usize,
    pub value: Option<f64>,
    /// Earliest-seen members.
    pub examples: Vec<ExampleVideo>,
    pub insufficient_data: bool,
    /// Sequential scale in `[0, 1]`; `None` for insufficient cells.
    pub intensity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleColorCell {
    pub family: String,
    pub column: String,
    pub n_with: usize,
    pub n_without: usize,
    pub value_with: Option<f64>,
    pub value_without: Option<f64>,
    /// `value_with − value_without`, only when both sides reach `min_n`.
    pub delta: Option<f64>,
    pub insufficient_data: bool,
    /// Diverging scale in `[−1, 1]` centered at zero; `None` for insufficient cells.
    pub intensity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapReport {
    pub column_dimension: ColumnDimension,
    /// Column labels present in the data, in natural order.
    pub columns: Vec<String>,
    pub combinations: Vec<CombinationCell>,
    pub single_colors: Vec<SingleColorCell>,
}

struct Column<'s, 'a> {
    label: String,
    members: Vec<&'s ScoredVideo<'a>>,
}

fn column_of(palette: &PaletteDescriptor, dimension: ColumnDimension) -> (usize, String) {
    match dimension {
        ColumnDimension::ColorCount => (palette.color_count, palette.color_count.to_string()),
        ColumnDimension::ContrastClass => (
            palette.contrast_class as usize,
            palette.contrast_class.label().to_string(),
        ),
    }
}

fn split_columns<'s, 'a>(
    members: &[&'s ScoredVideo<'a>],
    dimension: ColumnDimension,
) -> BTreeMap<usize, Column<'s, 'a>> {
    let mut columns: BTreeMap<usize, Column<'s, 'a>> = BTreeMap::new();
    for &member in members {
        let (rank, label) = column_of(&member.palette, dimension);
        columns
            .entry(rank)
            .or_insert_with(|| Column {
                label,
                members: Vec::new(),
            })
            .members
            .push(member);
    }
    columns
}

/// Build both heatmap tables for `records`.
///
/// Videos without a usable metric or without any parseable color are skipped.
///
/// # Errors
///
/// Returns [`EngineError`] when `config` fails validation.
pub fn build_heatmap(
    records: &[VideoRecord],
    config: &HeatmapConfig,
) -> Result<HeatmapReport, EngineError> {
    config.validate()?;

    let statistic = Statistic::for_metric(config.metric, config.views_mode);
    let scored: Vec<ScoredVideo<'_>> = score_videos(records, config.metric)
        .into_iter()
        .filter(|s| !s.palette.is_empty())
        .collect();
    let everyone: Vec<&ScoredVideo<'_>> = scored.iter().collect();
    let by_column = split_columns(&everyone, config.column);

    let mut combinations = combination_table(&scored, config, statistic);
    scale_sequential(&mut combinations);

    let mut single_colors = single_color_table(&scored, &by_column, config, statistic);
    scale_diverging(&mut single_colors);

    tracing::debug!(
        column = config.column.as_str(),
        videos = scored.len(),
        combinations = combinations.len(),
        single_colors = single_colors.len(),
        "heatmap built"
    );

    Ok(HeatmapReport {
        column_dimension: config.column,
        columns: by_column.into_values().map(|c| c.label).collect(),
        combinations,
        single_colors,
    })
}

fn combination_table(
    scored: &[ScoredVideo<'_>],
    config: &HeatmapConfig,
    statistic: Statistic,
) -> Vec<CombinationCell> {
    let groups = group_by(scored, |s| {
        [s.palette.signature_for(config.grouping).to_string()]
    });

    let mut cells = Vec::new();
    for group in groups {
        for column in split_columns(&group.members, config.column).into_values() {
            let n = column.members.len();
            cells.push(CombinationCell {
                signature: group.key.clone(),
                column: column.label,
                n,
                value: statistic.apply(&values_of(&column.members)),
                examples: first_examples(&column.members, CELL_EXAMPLES),
                insufficient_data: n < config.min_n,
                intensity: None,
            });
        }
    }
    cells
}

fn single_color_table(
    scored: &[ScoredVideo<'_>],
    by_column: &BTreeMap<usize, Column<'_, '_>>,
    config: &HeatmapConfig,
    statistic: Statistic,
) -> Vec<SingleColorCell> {
    let mut families: Vec<&'static str> = Vec::new();
    for s in scored {
        for label in s.palette.labels(config.grouping) {
            if !families.contains(&label) {
                families.push(label);
            }
        }
    }

    let mut cells = Vec::new();
    for family in families {
        for column in by_column.values() {
            let (with, without): (Vec<&ScoredVideo<'_>>, Vec<&ScoredVideo<'_>>) = column
                .members
                .iter()
                .copied()
                .partition(|m| m.palette.labels(config.grouping).contains(&family));
            if with.is_empty() {
                continue;
            }

            let value_with = statistic.apply(&values_of(&with));
            let value_without = statistic.apply(&values_of(&without));
            let sufficient = with.len() >= config.min_n && without.len() >= config.min_n;
            cells.push(SingleColorCell {
                family: family.to_string(),
                column: column.label.clone(),
                n_with: with.len(),
                n_without: without.len(),
                value_with,
                value_without,
                delta: if sufficient {
                    value_with.zip(value_without).map(|(w, wo)| w - wo)
                } else {
                    None
                },
                insufficient_data: !sufficient,
                intensity: None,
            });
        }
    }
    cells
}

/// `(v − min) / (max − min)` over sufficient cells.
fn scale_sequential(cells: &mut [CombinationCell]) {
    let values: Vec<f64> = cells
        .iter()
        .filter(|c| !c.insufficient_data)
        .filter_map(|c| c.value)
        .collect();
    let Some(min) = values.iter().copied().reduce(f64::min) else {
        return;
    };
    let max = values.iter().copied().fold(min, f64::max);
    let span = max - min;

    for cell in cells.iter_mut().filter(|c| !c.insufficient_data) {
        cell.intensity = cell.value.map(|v| {
            if span > 0.0 {
                (v - min) / span
            } else {
                FLAT_INTENSITY
            }
        });
    }
}

/// `delta / max|delta|` over sufficient cells.
fn scale_diverging(cells: &mut [SingleColorCell]) {
    let max_abs = cells
        .iter()
        .filter_map(|c| c.delta)
        .map(f64::abs)
        .fold(0.0, f64::max);

    for cell in cells.iter_mut() {
        cell.intensity = cell
            .delta
            .map(|d| if max_abs > 0.0 { d / max_abs } else { 0.0 });
    }
}

#[cfg(test)]
#[path = "heatmap_test.rs"]
mod tests;
