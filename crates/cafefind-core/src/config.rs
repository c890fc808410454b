use crate::app_config::{AppConfig, Environment};
use crate::settings::{OpeningFilter, SearchSettings};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("CAFEFIND_ENV", "development"));
    let bind_addr = parse("CAFEFIND_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("CAFEFIND_LOG_LEVEL", "info");

    let db_max_connections = parse_num(&or_default, "CAFEFIND_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_num(&or_default, "CAFEFIND_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs =
        parse_num(&or_default, "CAFEFIND_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let overpass_url = or_default(
        "CAFEFIND_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let overpass_timeout_secs = parse_num(&or_default, "CAFEFIND_OVERPASS_TIMEOUT_SECS", "30")?;
    let overpass_user_agent = or_default(
        "CAFEFIND_OVERPASS_USER_AGENT",
        "cafefind/0.1 (coffee-finder)",
    );

    let staleness_days = parse_num(&or_default, "CAFEFIND_STALENESS_DAYS", "14")?;

    let default_settings = SearchSettings {
        radius_m: parse_num(&or_default, "CAFEFIND_DEFAULT_RADIUS_M", "5000")?,
        min_results: parse_num(&or_default, "CAFEFIND_DEFAULT_MIN_RESULTS", "5")?,
        max_results: parse_num(&or_default, "CAFEFIND_DEFAULT_MAX_RESULTS", "20")?,
        opening_filter: OpeningFilter::Anytime,
    };
    default_settings
        .validate()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "CAFEFIND_DEFAULT_*".to_string(),
            reason: e.to_string(),
        })?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        overpass_url,
        overpass_timeout_secs,
        overpass_user_agent,
        staleness_days,
        default_settings,
    })
}

/// Read `var` through `or_default` and parse it as a number.
fn parse_num<T, L>(or_default: &L, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    L: Fn(&str, &str) -> String,
{
    or_default(var, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
