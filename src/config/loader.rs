//! Configuration file loading with precedence handling.

use crate::backend::DEFAULT_FACET_FIELDS;
use crate::pager::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value for {var}: {value}")]
    InvalidEnvValue {
        /// Environment variable name.
        var: &'static str,
        /// Rejected value.
        value: String,
    },

    /// Page size resolved to zero.
    #[error("page_size must be at least 1")]
    InvalidPageSize,

    /// A facet field the backend cannot aggregate over.
    #[error("Unknown facet field '{0}' (expected one of: type, platform)")]
    UnknownFacetField(String),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/rpager/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Results per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Show the filter panel on startup.
    #[serde(default)]
    pub show_filters: Option<bool>,

    /// Simulated backend latency in milliseconds.
    #[serde(default)]
    pub latency_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Facet fields computed for each response.
    #[serde(default)]
    pub facet_fields: Option<Vec<String>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Results per page. Must be positive.
    pub page_size: usize,
    /// Whether the filter panel starts visible.
    pub show_filters: bool,
    /// Simulated backend latency in milliseconds.
    pub latency_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Entity fields to compute facets for.
    pub facet_fields: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            show_filters: true,
            latency_ms: 0,
            log_file_path: default_log_path(),
            facet_fields: DEFAULT_FACET_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/rpager/rpager.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("rpager").join("rpager.log")
    } else {
        PathBuf::from("rpager.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/rpager/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rpager").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `RPAGER_CONFIG` environment variable
/// 3. Default path `~/.config/rpager/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("RPAGER_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        show_filters: config.show_filters.unwrap_or(defaults.show_filters),
        latency_ms: config.latency_ms.unwrap_or(defaults.latency_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        facet_fields: config.facet_fields.unwrap_or(defaults.facet_fields),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `RPAGER_PAGE_SIZE`: Override page size
/// - `RPAGER_SHOW_FILTERS`: Override filter panel visibility (`true`/`false`)
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvValue` if a set variable cannot be parsed.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var("RPAGER_PAGE_SIZE") {
        config.page_size = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnvValue {
                var: "RPAGER_PAGE_SIZE",
                value: raw.clone(),
            })?;
    }

    if let Ok(raw) = std::env::var("RPAGER_SHOW_FILTERS") {
        config.show_filters = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnvValue {
                var: "RPAGER_SHOW_FILTERS",
                value: raw.clone(),
            })?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    page_size_override: Option<usize>,
    show_filters_override: Option<bool>,
    latency_override: Option<u64>,
) -> ResolvedConfig {
    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    if let Some(show_filters) = show_filters_override {
        config.show_filters = show_filters;
    }

    if let Some(latency_ms) = latency_override {
        config.latency_ms = latency_ms;
    }

    config
}

/// Check invariants that no single source can enforce on its own.
///
/// # Errors
///
/// Returns `ConfigError::InvalidPageSize` for a zero page size and
/// `ConfigError::UnknownFacetField` for facet fields the backend cannot compute.
pub fn validate(config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if config.page_size == 0 {
        return Err(ConfigError::InvalidPageSize);
    }

    if let Some(unknown) = config
        .facet_fields
        .iter()
        .find(|f| !DEFAULT_FACET_FIELDS.contains(&f.as_str()))
    {
        return Err(ConfigError::UnknownFacetField(unknown.clone()));
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
