//! Logging setup.
//!
//! Logs go to stderr (or `FIGJSON_LOG_FILE`) so stdout stays reserved for the
//! JSON document. `--json-output` switches to one JSON event per line.
//!
//! Access tokens must never appear in log fields.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const LOG_LEVEL_ENV: &str = "FIGJSON_LOG";
const LOG_FORMAT_ENV: &str = "FIGJSON_LOG_FORMAT";
const LOG_FILE_ENV: &str = "FIGJSON_LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable logs.
    #[default]
    Human,
    /// JSON logs (one event per line).
    Json,
    /// Compact logs (single line, terse).
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" | "pretty" => Some(Self::Human),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Log level from CLI argument or environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    #[default]
    Error,
}

impl LogLevel {
    /// Parse from CLI argument.
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "verbose" | "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Convert to tracing filter string.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Convert to tracing level.
    #[must_use]
    pub const fn as_tracing_level(self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }
}

/// Everything `init` needs, resolved from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    pub level: LogLevel,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    /// Resolve settings: CLI flags first, then `FIGJSON_LOG*` variables.
    ///
    /// `verbose` bumps the default `error` level to `debug`; an explicit level
    /// always wins.
    #[must_use]
    pub fn resolve(cli_level: Option<&str>, json_output: bool, verbose: bool) -> Self {
        let explicit = cli_level
            .and_then(LogLevel::from_arg)
            .or_else(|| env_value(LOG_LEVEL_ENV).as_deref().and_then(LogLevel::from_arg));

        let level = match explicit {
            Some(level) => level,
            None if verbose => LogLevel::Debug,
            None => LogLevel::default(),
        };

        let format = if json_output {
            LogFormat::Json
        } else {
            env_value(LOG_FORMAT_ENV)
                .as_deref()
                .and_then(LogFormat::from_arg)
                .unwrap_or_default()
        };

        Self {
            level,
            format,
            file: env_value(LOG_FILE_ENV).map(PathBuf::from),
        }
    }
}

/// Read a non-empty, trimmed environment variable.
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Initialize the global subscriber. Later calls are no-ops.
///
/// `RUST_LOG` overrides the resolved level when set.
pub fn init(settings: &LogSettings) {
    let file = settings.file.as_ref().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    let writer = file.map_or_else(
        || BoxMakeWriter::new(std::io::stderr),
        |file| BoxMakeWriter::new(Mutex::new(file)),
    );

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("figjson={}", settings.level.as_filter())));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    match settings.format {
        LogFormat::Json => {
            builder.json().try_init().ok();
        }
        LogFormat::Compact => {
            builder.compact().with_target(true).try_init().ok();
        }
        LogFormat::Human => {
            builder.with_target(false).without_time().try_init().ok();
        }
    }
}
