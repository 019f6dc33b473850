use thiserror::Error;

/// Errors raised at the engine's call boundary.
///
/// Data-quality problems never surface here: malformed colors and metrics are
/// dropped from the computation and small samples are flagged in results.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unrecognized value \"{value}\" for option {option}")]
    UnknownOption { option: &'static str, value: String },

    #[error("minN must be at least 1")]
    InvalidMinN,

    #[error("confidence {0} is outside (0, 1)")]
    InvalidConfidence(f64),

    #[error("resample count must be at least 1")]
    InvalidResamples,

    #[error("leaderboard limit must be at least 1")]
    InvalidLimit,

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
