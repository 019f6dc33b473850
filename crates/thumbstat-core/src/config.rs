use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read genres file {path}: {source}")]
    GenresFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse genres file: {0}")]
    GenresFileParse(#[source] serde_yaml::Error),

    #[error("genre table validation failed: {0}")]
    Validation(String),
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("THUMBSTAT_ENV", "development"))?;
    let log_level = or_default("THUMBSTAT_LOG_LEVEL", "info");
    let genres_path = lookup("THUMBSTAT_GENRES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let min_n = parse_usize("THUMBSTAT_MIN_N", "10")?;
    if min_n == 0 {
        return Err(invalid("THUMBSTAT_MIN_N", "must be at least 1".to_string()));
    }

    let confidence = or_default("THUMBSTAT_CONFIDENCE", "0.95")
        .parse::<f64>()
        .map_err(|e| invalid("THUMBSTAT_CONFIDENCE", e.to_string()))?;
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(invalid(
            "THUMBSTAT_CONFIDENCE",
            format!("{confidence} is outside (0, 1)"),
        ));
    }

    let bootstrap_resamples = parse_usize("THUMBSTAT_BOOTSTRAP_RESAMPLES", "1000")?;
    let face_resamples = parse_usize("THUMBSTAT_FACE_RESAMPLES", "100")?;
    for (var, value) in [
        ("THUMBSTAT_BOOTSTRAP_RESAMPLES", bootstrap_resamples),
        ("THUMBSTAT_FACE_RESAMPLES", face_resamples),
    ] {
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
    }

    let seed = match lookup("THUMBSTAT_SEED") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("THUMBSTAT_SEED", e.to_string()))?,
        ),
        Err(_) => None,
    };

    Ok(AppConfig {
        env,
        log_level,
        genres_path,
        min_n,
        confidence,
        bootstrap_resamples,
        face_resamples,
        seed,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "THUMBSTAT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
