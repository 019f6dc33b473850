use super::*;
use crate::test_support::{batch, video};
use crate::types::Grouping;

const RED: &str = "#FF0000";
const BLUE: &str = "#0000FF";

fn config(min_n: usize) -> HeatmapConfig {
    HeatmapConfig {
        min_n,
        ..HeatmapConfig::default()
    }
}

/// 10 Red at 80, 10 Blue at 60, 3 two-color Red + Blue at 70.
fn mixed_records() -> Vec<VideoRecord> {
    let mut records = batch("red", 10, 80.0, &[RED]);
    records.extend(batch("blue", 10, 60.0, &[BLUE]));
    records.extend(batch("both", 3, 70.0, &[RED, BLUE]));
    records
}

fn combination<'r>(
    report: &'r HeatmapReport,
    signature: &str,
    column: &str,
) -> &'r CombinationCell {
    report
        .combinations
        .iter()
        .find(|c| c.signature == signature && c.column == column)
        .unwrap_or_else(|| panic!("no cell {signature} × {column}"))
}

fn single<'r>(report: &'r HeatmapReport, family: &str, column: &str) -> &'r SingleColorCell {
    report
        .single_colors
        .iter()
        .find(|c| c.family == family && c.column == column)
        .unwrap_or_else(|| panic!("no cell {family} × {column}"))
}

#[test]
fn color_count_columns_are_numeric_order() {
    let report = build_heatmap(&mixed_records(), &config(10)).unwrap();
    assert_eq!(report.columns, vec!["1", "2"]);
    assert_eq!(report.column_dimension, ColumnDimension::ColorCount);
}

#[test]
fn combination_cells_aggregate_exact_signatures() {
    let report = build_heatmap(&mixed_records(), &config(10)).unwrap();

    let red = combination(&report, "Red", "1");
    assert_eq!(red.n, 10);
    assert_eq!(red.value, Some(80.0));
    assert!(!red.insufficient_data);

    let both = combination(&report, "Red + Blue", "2");
    assert_eq!(both.n, 3);
    assert_eq!(both.value, Some(70.0));
    assert!(both.insufficient_data);
    assert_eq!(both.intensity, None);
}

#[test]
fn combination_examples_are_first_three_seen() {
    let report = build_heatmap(&mixed_records(), &config(10)).unwrap();
    let ids: Vec<&str> = combination(&report, "Red", "1")
        .examples
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ids, vec!["red-0", "red-1", "red-2"]);
}

#[test]
fn sequential_intensity_spans_sufficient_cells_only() {
    let report = build_heatmap(&mixed_records(), &config(10)).unwrap();
    assert_eq!(combination(&report, "Red", "1").intensity, Some(1.0));
    assert_eq!(combination(&report, "Blue", "1").intensity, Some(0.0));
}

#[test]
fn equal_values_get_flat_intensity() {
    let mut records = batch("red", 10, 50.0, &[RED]);
    records.extend(batch("blue", 10, 50.0, &[BLUE]));
    let report = build_heatmap(&records, &config(10)).unwrap();
    assert!(report
        .combinations
        .iter()
        .all(|c| c.intensity == Some(FLAT_INTENSITY)));
}

#[test]
fn single_color_delta_within_column() {
    let report = build_heatmap(&mixed_records(), &config(10)).unwrap();

    let red = single(&report, "Red", "1");
    assert_eq!((red.n_with, red.n_without), (10, 10));
    assert_eq!(red.delta, Some(20.0));
    assert_eq!(red.intensity, Some(1.0));

    let blue = single(&report, "Blue", "1");
    assert_eq!(blue.delta, Some(-20.0));
    assert_eq!(blue.intensity, Some(-1.0));
}

#[test]
fn single_color_cells_below_min_n_keep_counts() {
    let report = build_heatmap(&mixed_records(), &config(10)).unwrap();
    let red_pairs = single(&report, "Red", "2");
    assert_eq!((red_pairs.n_with, red_pairs.n_without), (3, 0));
    assert_eq!(red_pairs.value_with, Some(70.0));
    assert!(red_pairs.insufficient_data);
    assert_eq!(red_pairs.delta, None);
    assert_eq!(red_pairs.intensity, None);
}

#[test]
fn diverging_intensity_stays_in_unit_range() {
    let mut records = mixed_records();
    records.extend(batch("more-red", 5, 95.0, &[RED]));
    let report = build_heatmap(&records, &config(5)).unwrap();
    for cell in &report.single_colors {
        if let Some(i) = cell.intensity {
            assert!((-1.0..=1.0).contains(&i), "{cell:?}");
        }
    }
}

#[test]
fn contrast_columns_use_class_labels() {
    let mut records = batch("flat", 2, 50.0, &[RED]);
    records.extend(batch("sharp", 2, 70.0, &["#000000", "#FFFFFF"]));
    let cfg = HeatmapConfig {
        column: ColumnDimension::ContrastClass,
        ..config(1)
    };
    let report = build_heatmap(&records, &cfg).unwrap();
    assert_eq!(report.columns, vec!["Low", "High"]);
    assert_eq!(combination(&report, "Black + White", "High").n, 2);
}

#[test]
fn coarse_grouping_uses_coarse_signatures() {
    let cfg = HeatmapConfig {
        grouping: Grouping::Coarse,
        ..config(1)
    };
    let report = build_heatmap(&mixed_records(), &cfg).unwrap();
    assert_eq!(combination(&report, "Warm + Cool", "2").n, 3);
    assert_eq!(single(&report, "Warm", "1").n_with, 10);
}

#[test]
fn videos_without_colors_are_skipped() {
    let mut records = batch("red", 2, 80.0, &[RED]);
    records.push(video("blank", 10.0, &[]));
    let report = build_heatmap(&records, &config(1)).unwrap();
    assert!(report.combinations.iter().all(|c| c.signature != "Unknown"));
    assert_eq!(report.columns, vec!["1"]);
}

#[test]
fn empty_input_yields_empty_tables() {
    let report = build_heatmap(&[], &config(10)).unwrap();
    assert!(report.columns.is_empty());
    assert!(report.combinations.is_empty());
    assert!(report.single_colors.is_empty());
}
