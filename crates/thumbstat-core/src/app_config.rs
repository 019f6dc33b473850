use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings for hosts that embed the analytics engine.
///
/// The engine itself never reads these; hosts turn them into explicit
/// per-analyzer configuration values.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Optional YAML channel → genre table.
    pub genres_path: Option<PathBuf>,
    /// Default minimum sample size for min-n gating.
    pub min_n: usize,
    /// Bootstrap confidence level in `(0, 1)`.
    pub confidence: f64,
    /// Resample count for frequency/lift confidence intervals.
    pub bootstrap_resamples: usize,
    /// Resample count for face-bin confidence intervals.
    pub face_resamples: usize,
    /// Seed for bootstrap resampling. `None` draws from OS entropy.
    pub seed: Option<u64>,
}
