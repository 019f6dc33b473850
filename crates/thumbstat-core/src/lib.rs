//! Shared domain types and configuration for thumbstat.
//!
//! Holds the [`VideoRecord`] input shape consumed by the analytics engine,
//! subscriber/view/RQS tier classification, the channel → genre lookup, and
//! environment-driven application settings.

pub mod app_config;
pub mod config;
pub mod genres;
pub mod tiers;
pub mod video;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use genres::{load_genres, parse_genres, ChannelGenre, GenreClassifier, GenreTable};
pub use tiers::{RqsBand, SubscriberTier, ViewTier};
pub use video::{ColorValue, VideoRecord, OTHER, UNKNOWN};
