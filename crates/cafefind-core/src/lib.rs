pub mod app_config;
pub mod config;
pub mod hours;
pub mod settings;
pub mod status;
pub mod venue;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use hours::{annotate, filter_open_now, is_open_at, AnnotatedVenue, OpenState};
pub use settings::{
    LocationMode, OpeningFilter, SearchSettings, DEFAULT_MAX_RESULTS, DEFAULT_MIN_RESULTS,
    DEFAULT_RADIUS_M, MAX_RADIUS_M, MAX_RESULTS_CAP, MIN_RADIUS_M,
};
pub use status::{Severity, StatusEvent};
pub use venue::{Location, NewVenue, SourceType, Venue, UNNAMED_VENUE};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid source type: {0}")]
    InvalidSourceType(String),

    #[error("invalid location ({lat}, {lon}): {reason}")]
    InvalidLocation { lat: f64, lon: f64, reason: String },

    #[error("invalid search settings: {0}")]
    InvalidSettings(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
