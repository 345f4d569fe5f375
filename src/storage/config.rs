//! Configuration file loading and resolution.
//!
//! Loads configuration from `<config dir>/figjson/config.toml`
//! (`~/.config/figjson/config.toml` on Linux).
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `FIGJSON_CONFIG`: Override config file path
//! - `FIGJSON_API_BASE`: API base URL
//! - `FIGJSON_TIMEOUT`: Request timeout in seconds
//! - `FIGJSON_STORAGE`: Token backend (file, keyring, memory)
//! - `FIGJSON_STORE_FILE`: Path of the file-backed token store
//! - `FIGJSON_FORMAT`: Output format (human, json)
//! - `FIGJSON_NO_COLOR` or `NO_COLOR`: Disable colors

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::cli::args::{Cli, GetArgs, OutputFormat};
use crate::core::retrieval::DEFAULT_API_BASE;
use crate::error::{FigjsonError, Result};

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable to override config file path.
pub const ENV_CONFIG: &str = "FIGJSON_CONFIG";
/// Environment variable for the API base URL.
pub const ENV_API_BASE: &str = "FIGJSON_API_BASE";
/// Environment variable for timeout in seconds.
pub const ENV_TIMEOUT: &str = "FIGJSON_TIMEOUT";
/// Environment variable for the token backend.
pub const ENV_STORAGE: &str = "FIGJSON_STORAGE";
/// Environment variable for the token store file.
pub const ENV_STORE_FILE: &str = "FIGJSON_STORE_FILE";
/// Environment variable for output format.
pub const ENV_FORMAT: &str = "FIGJSON_FORMAT";
/// Environment variable to disable colors.
pub const ENV_NO_COLOR: &str = "FIGJSON_NO_COLOR";
/// Standard environment variable to disable colors.
pub const ENV_NO_COLOR_STD: &str = "NO_COLOR";

/// Upper bound for `timeout_seconds`.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Where the access token is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file in the data directory
    #[default]
    File,
    /// OS credential store
    Keyring,
    /// Process memory only
    Memory,
}

impl StorageBackend {
    /// Parse a backend name.
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Some(Self::File),
            "keyring" => Some(Self::Keyring),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }

    /// Backend name as used in config and flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Keyring => "keyring",
            Self::Memory => "memory",
        }
    }
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved configuration after merging CLI, env vars, and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// API base URL, no trailing slash.
    pub api_base: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Token backend.
    pub storage: StorageBackend,
    /// File used by the file backend.
    pub store_path: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Whether to disable colored output.
    pub no_color: bool,
    /// Source of each setting for debugging.
    pub sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub api_base: ConfigSource,
    pub timeout: ConfigSource,
    pub storage: ConfigSource,
    pub store_path: ConfigSource,
    pub format: ConfigSource,
    pub no_color: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from CLI flag.
    Cli,
    /// Value from environment variable.
    Env,
    /// Value from config file.
    ConfigFile,
    /// Built-in default.
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl ResolvedConfig {
    /// Resolve final configuration from CLI args, environment variables, and config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is invalid, or if any
    /// resolved value is invalid.
    pub fn resolve(cli: &Cli, get_args: Option<&GetArgs>) -> Result<Self> {
        let config = Self::load_config(cli)?;
        config.validate()?;

        let mut sources = ConfigSources::default();

        let api_base = Self::resolve_api_base(get_args, &config, &mut sources.api_base)?;
        let timeout = Self::resolve_timeout(get_args, &config, &mut sources.timeout)?;
        let storage = Self::resolve_storage(cli, &config, &mut sources.storage)?;
        let store_path = Self::resolve_store_path(&config, &mut sources.store_path);
        let format = Self::resolve_format(cli, &config, &mut sources.format)?;
        let no_color = Self::resolve_no_color(cli, &config, &mut sources.no_color);

        tracing::debug!(
            %api_base,
            timeout_secs = timeout.as_secs(),
            ?storage,
            store_path = ?store_path,
            "Resolved configuration"
        );

        Ok(Self {
            api_base,
            timeout,
            storage,
            store_path,
            format,
            no_color,
            sources,
        })
    }

    /// Load config file: `--config`, then `FIGJSON_CONFIG`, then the default path.
    fn load_config(cli: &Cli) -> Result<Config> {
        if let Some(path) = &cli.config {
            Config::load_from(path)
        } else if let Ok(path) = std::env::var(ENV_CONFIG) {
            Config::load_from(Path::new(&path))
        } else {
            Config::load()
        }
    }

    fn resolve_api_base(
        get_args: Option<&GetArgs>,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<String> {
        let (value, origin) = if let Some(base) = get_args.and_then(|a| a.api_base.clone()) {
            (base, ConfigSource::Cli)
        } else if let Ok(base) = std::env::var(ENV_API_BASE) {
            (base, ConfigSource::Env)
        } else if config.api.base_url != DEFAULT_API_BASE {
            (config.api.base_url.clone(), ConfigSource::ConfigFile)
        } else {
            (DEFAULT_API_BASE.to_string(), ConfigSource::Default)
        };

        validate_base_url(&value)?;
        *source = origin;
        Ok(value.trim_end_matches('/').to_string())
    }

    fn resolve_timeout(
        get_args: Option<&GetArgs>,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<Duration> {
        // 1. CLI --timeout flag
        if let Some(secs) = get_args.and_then(|a| a.timeout) {
            validate_timeout(secs)?;
            *source = ConfigSource::Cli;
            return Ok(Duration::from_secs(secs));
        }

        // 2. Environment variable
        if let Ok(raw) = std::env::var(ENV_TIMEOUT) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                FigjsonError::Config(format!("{ENV_TIMEOUT} must be a whole number of seconds, got '{raw}'"))
            })?;
            validate_timeout(secs)?;
            *source = ConfigSource::Env;
            return Ok(Duration::from_secs(secs));
        }

        // 3. Config file (already validated)
        *source = if config.api.timeout_seconds == ApiConfig::default().timeout_seconds {
            ConfigSource::Default
        } else {
            ConfigSource::ConfigFile
        };
        Ok(Duration::from_secs(config.api.timeout_seconds))
    }

    fn resolve_storage(
        cli: &Cli,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<StorageBackend> {
        if let Some(backend) = cli.storage {
            *source = ConfigSource::Cli;
            return Ok(backend);
        }

        if let Ok(name) = std::env::var(ENV_STORAGE) {
            *source = ConfigSource::Env;
            return StorageBackend::from_name(&name).ok_or_else(|| {
                FigjsonError::Config(format!(
                    "Invalid storage backend '{name}'. Valid backends: file, keyring, memory"
                ))
            });
        }

        *source = if config.storage.backend == StorageBackend::default() {
            ConfigSource::Default
        } else {
            ConfigSource::ConfigFile
        };
        Ok(config.storage.backend)
    }

    fn resolve_store_path(config: &Config, source: &mut ConfigSource) -> PathBuf {
        if let Ok(path) = std::env::var(ENV_STORE_FILE) {
            *source = ConfigSource::Env;
            return PathBuf::from(path);
        }

        if let Some(path) = &config.storage.path {
            *source = ConfigSource::ConfigFile;
            return path.clone();
        }

        *source = ConfigSource::Default;
        AppPaths::new().token_store_file()
    }

    fn resolve_format(
        cli: &Cli,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<OutputFormat> {
        // 1. CLI --json / --format
        if cli.json {
            *source = ConfigSource::Cli;
            return Ok(OutputFormat::Json);
        }
        if let Some(format) = cli.format {
            *source = ConfigSource::Cli;
            return Ok(format);
        }

        // 2. Environment variable
        if let Ok(name) = std::env::var(ENV_FORMAT) {
            *source = ConfigSource::Env;
            return parse_format(&name);
        }

        // 3. Config file
        if let Some(name) = &config.output.format {
            *source = ConfigSource::ConfigFile;
            return parse_format(name);
        }

        // 4. Default
        *source = ConfigSource::Default;
        Ok(OutputFormat::Human)
    }

    fn resolve_no_color(cli: &Cli, config: &Config, source: &mut ConfigSource) -> bool {
        if cli.no_color {
            *source = ConfigSource::Cli;
            return true;
        }

        if is_env_truthy(ENV_NO_COLOR) || std::env::var(ENV_NO_COLOR_STD).is_ok() {
            *source = ConfigSource::Env;
            return true;
        }

        // Inverted: output.color = false means no_color = true
        if !config.output.color {
            *source = ConfigSource::ConfigFile;
            return true;
        }

        *source = ConfigSource::Default;
        false
    }
}

fn parse_format(name: &str) -> Result<OutputFormat> {
    OutputFormat::from_name(name).ok_or_else(|| {
        FigjsonError::Config(format!("Invalid format '{name}'. Valid formats: human, json"))
    })
}

fn validate_timeout(secs: u64) -> Result<()> {
    if secs == 0 || secs > MAX_TIMEOUT_SECS {
        return Err(FigjsonError::Config(format!(
            "Timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds"
        )));
    }
    Ok(())
}

fn validate_base_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(FigjsonError::Config(format!(
            "Invalid API base URL '{url}': must start with http:// or https://"
        )))
    }
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var: &str) -> bool {
    std::env::var(var)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

// =============================================================================
// Config File
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API settings.
    pub api: ApiConfig,
    /// Token storage settings.
    pub storage: StorageConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Figma API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Token storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend holding the token.
    pub backend: StorageBackend,
    /// Custom path for the file backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Whether to use colors in output.
    pub color: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// # Errors
    /// Returns error only if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().config_file())
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    ///
    /// # Errors
    /// Returns error only if the file exists but is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| FigjsonError::Config(format!("Invalid config file {}: {e}", path.display())))
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns a config error for an out-of-range timeout, a non-HTTP base
    /// URL or an unknown output format.
    pub fn validate(&self) -> Result<()> {
        validate_timeout(self.api.timeout_seconds)?;
        validate_base_url(&self.api.base_url)?;
        if let Some(format) = &self.output.format {
            parse_format(format)?;
        }
        Ok(())
    }
}
