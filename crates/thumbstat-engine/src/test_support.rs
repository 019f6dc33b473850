//! Record builders shared by unit tests.

use thumbstat_core::{ColorValue, VideoRecord};

pub(crate) fn video(id: &str, rqs: f64, colors: &[&str]) -> VideoRecord {
    VideoRecord {
        id: id.to_string(),
        title: format!("Video {id}"),
        channel_name: "Test Channel".to_string(),
        quality_score: Some(rqs),
        colors: colors.iter().map(|c| ColorValue::from(*c)).collect(),
        ..VideoRecord::default()
    }
}

/// `count` videos sharing one palette and score, ids prefixed with `prefix`.
pub(crate) fn batch(prefix: &str, count: usize, rqs: f64, colors: &[&str]) -> Vec<VideoRecord> {
    (0..count)
        .map(|i| video(&format!("{prefix}-{i}"), rqs, colors))
        .collect()
}
