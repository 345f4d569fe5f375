//! Test logging infrastructure for structured test output and debugging.
#![allow(dead_code)]
//!
//! Provides a `TestLogger` with per-test duration and phase tracking.
//!
//! # Usage
//!
//! ```rust,ignore
//! use common::logger::TestLogger;
//!
//! #[test]
//! fn test_example() {
//!     let log = TestLogger::new("test_example");
//!     log.phase("setup");
//!     // ...
//!     log.phase("verify");
//!     log.finish_ok();
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `TEST_LOG_LEVEL` - Set log level: trace, debug, info, warn, error (default: info)
//! - `TEST_LOG_JSON` - Set to "1" or "true" for JSON output format
//! - `NO_COLOR` - Disable colored output when set

use std::env;
use std::fmt::Display;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

// =============================================================================
// Log Levels
// =============================================================================

/// Log severity levels matching standard conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse from string, case-insensitive.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "err" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    const fn color_code(self) -> &'static str {
        match self {
            Self::Trace => "\x1b[90m",
            Self::Debug => "\x1b[36m",
            Self::Info => "\x1b[32m",
            Self::Warn => "\x1b[33m",
            Self::Error => "\x1b[31m",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// Structured log entry for JSON output mode.
#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    timestamp: DateTime<Utc>,
    level: LogLevel,
    test: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
}

struct Settings {
    min_level: LogLevel,
    json: bool,
    color: bool,
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| Settings {
        min_level: env::var("TEST_LOG_LEVEL")
            .ok()
            .and_then(|s| LogLevel::from_str(&s))
            .unwrap_or(LogLevel::Info),
        json: env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
        color: env::var("NO_COLOR").is_err(),
    })
}

// =============================================================================
// TestLogger
// =============================================================================

/// Per-test logger with structured output and duration tracking.
pub struct TestLogger {
    test_name: String,
    start_time: Instant,
    current_phase: Mutex<String>,
}

impl TestLogger {
    #[must_use]
    pub fn new(test_name: &str) -> Self {
        let logger = Self {
            test_name: test_name.to_string(),
            start_time: Instant::now(),
            current_phase: Mutex::new("init".to_string()),
        };
        logger.log(LogLevel::Info, "Test starting", None);
        logger
    }

    /// Set the current test phase.
    pub fn phase(&self, phase: &str) {
        if let Ok(mut current) = self.current_phase.lock() {
            *current = phase.to_string();
        }
        self.log(LogLevel::Debug, &format!("Phase: {phase}"), None);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    /// Log an HTTP request (for HTTP tests).
    pub fn http_request(&self, method: &str, url: &str) {
        self.debug(&format!("HTTP {method} {url}"));
    }

    /// Mark test as passed with duration.
    #[allow(clippy::cast_possible_truncation)]
    pub fn finish_ok(&self) {
        let duration_ms = self.start_time.elapsed().as_millis() as u64;
        self.log(
            LogLevel::Info,
            &format!("Test passed (duration: {duration_ms}ms)"),
            Some(duration_ms),
        );
    }

    fn log(&self, level: LogLevel, message: &str, duration_ms: Option<u64>) {
        let settings = settings();
        if level < settings.min_level {
            return;
        }
        let timestamp = Utc::now();
        let phase = self.current_phase.lock().ok().map(|p| p.clone());

        if settings.json {
            let entry = LogEntry {
                timestamp,
                level,
                test: &self.test_name,
                message,
                phase,
                duration_ms,
            };
            if let Ok(json) = serde_json::to_string(&entry) {
                eprintln!("{json}");
            }
            return;
        }

        let ts = timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ");
        if settings.color {
            let color = level.color_code();
            eprintln!("[{ts}] [{color}{level}\x1b[0m] [{}] {message}", self.test_name);
        } else {
            eprintln!("[{ts}] [{level}] [{}] {message}", self.test_name);
        }
    }
}
