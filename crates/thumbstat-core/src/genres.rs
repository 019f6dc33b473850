use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::video::UNKNOWN;
use crate::ConfigError;

/// Maps a channel name to its canonical genre label.
///
/// Implementations must return [`UNKNOWN`] for channels they do not recognize
/// rather than guessing a real genre.
pub trait GenreClassifier {
    fn classify(&self, channel_name: &str) -> String;
}

impl<F> GenreClassifier for F
where
    F: Fn(&str) -> String,
{
    fn classify(&self, channel_name: &str) -> String {
        self(channel_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelGenre {
    pub channel: String,
    pub genre: String,
}

#[derive(Debug, Deserialize)]
pub struct GenresFile {
    pub channels: Vec<ChannelGenre>,
}

/// Channel → genre lookup backed by a static table.
///
/// Channel names match case-insensitively after trimming.
#[derive(Debug, Clone, Default)]
pub struct GenreTable {
    by_channel: HashMap<String, String>,
}

impl GenreTable {
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = ChannelGenre>) -> Self {
        let by_channel = entries
            .into_iter()
            .map(|entry| (channel_key(&entry.channel), entry.genre.trim().to_string()))
            .collect();
        Self { by_channel }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_channel.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_channel.is_empty()
    }
}

impl GenreClassifier for GenreTable {
    fn classify(&self, channel_name: &str) -> String {
        self.by_channel
            .get(&channel_key(channel_name))
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

fn channel_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Load and validate a channel → genre table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_genres(path: &Path) -> Result<GenreTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::GenresFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_genres(&content)
}

/// Parse and validate a channel → genre table from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_genres(yaml: &str) -> Result<GenreTable, ConfigError> {
    let file: GenresFile = serde_yaml::from_str(yaml).map_err(ConfigError::GenresFileParse)?;
    validate_genres(&file)?;
    Ok(GenreTable::from_entries(file.channels))
}

fn validate_genres(file: &GenresFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in &file.channels {
        if entry.channel.trim().is_empty() {
            return Err(ConfigError::Validation(
                "channel name must be non-empty".to_string(),
            ));
        }

        if entry.genre.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "channel '{}' has an empty genre",
                entry.channel
            )));
        }

        if !seen.insert(channel_key(&entry.channel)) {
            return Err(ConfigError::Validation(format!(
                "duplicate channel: '{}'",
                entry.channel
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "genres_test.rs"]
mod tests;
