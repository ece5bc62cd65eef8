//! Configuration loader
//!
//! Loads [`PerxConfig`] from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Read `.env` (if present) into the process environment
//! 2. Attempt to load from `PERX_*` environment variables
//! 3. If incomplete, fall back to loading from file
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PERX_BASE_URL`: Provider API root (required)
//! - `PERX_CLIENT_ID`: OAuth client id (required)
//! - `PERX_CLIENT_SECRET`: OAuth client secret (required)
//! - `PERX_TOKEN_DURATION_SECONDS`: Lifetime requested for user tokens
//! - `PERX_LANG`: Default `Accept-Language`
//! - `PERX_MICROSITE_BASE_URL`: Base of the hosted campaign microsite
//! - `PERX_REQUEST_TIMEOUT_SECONDS`: Per-request timeout
//! - `PERX_TOLERATED_STATUS_CEILING`: Statuses at or above this are bodiless
//!
//! ## File Locations
//! `perx.toml`, `perx.json`, `config.toml` and `config.json` are probed in
//! the working directory, then in up to two parent directories.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use perx_domain::{PerxConfig, PerxError, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["perx.toml", "perx.json", "config.toml", "config.json"];
const PARENT_LEVELS: usize = 2;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `PerxError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The loaded config fails validation
pub fn load() -> Result<PerxConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `PERX_*` environment variables
///
/// # Errors
/// Returns `PerxError::Config` if required variables are missing, optional
/// ones cannot be parsed, or the result fails validation.
pub fn load_from_env() -> Result<PerxConfig> {
    let mut config = PerxConfig::new(
        env_var("PERX_BASE_URL")?,
        env_var("PERX_CLIENT_ID")?,
        env_var("PERX_CLIENT_SECRET")?,
    );

    if let Some(duration) = env_parse("PERX_TOKEN_DURATION_SECONDS")? {
        config.token_duration_seconds = duration;
    }
    if let Some(lang) = env_opt("PERX_LANG") {
        config.lang = lang;
    }
    config.microsite_base_url = env_opt("PERX_MICROSITE_BASE_URL");
    if let Some(timeout) = env_parse("PERX_REQUEST_TIMEOUT_SECONDS")? {
        config.request_timeout_seconds = timeout;
    }
    if let Some(ceiling) = env_parse("PERX_TOLERATED_STATUS_CEILING")? {
        config.tolerated_status_ceiling = ceiling;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations with
/// [`probe_config_paths`]. The format is chosen by file extension.
///
/// # Errors
/// Returns `PerxError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The loaded config fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<PerxConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PerxError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PerxError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PerxError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<PerxConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PerxError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PerxError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PerxError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// Returns the first existing file, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_from(&cwd)
}

fn probe_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(PARENT_LEVELS + 1)
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key)
        .ok_or_else(|| PerxError::Config(format!("Missing required environment variable: {key}")))
}

/// Non-empty environment variable, if set.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| PerxError::Config(format!("Invalid {key}: {e}")))
        })
        .transpose()
}
