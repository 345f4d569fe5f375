//! Error types for figjson.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Every error belongs to one [`ErrorKind`]:
//! - **Format**: the selection URL is not a recognized Figma link
//! - **Storage**: the token backend is unavailable or corrupt
//! - **Network**: the request never reached the API (connect, DNS, TLS, timeout)
//! - **RemoteApplication**: the API answered with an error status
//! - **Configuration**: bad config values or missing user input
//! - **Internal**: I/O, serialization, clipboard and unclassified failures
//!
//! Each error has a stable error code (e.g., `FIGJSON-N001`) for programmatic
//! handling, and a short notification message for the user.

use thiserror::Error;

/// Message shown when a retrieval fails without a usable remote message.
pub const GENERIC_FETCH_MESSAGE: &str = "Error fetching JSON";

/// Message shown when a selection URL is not recognized.
pub const INVALID_URL_MESSAGE: &str = "Invalid Figma URL format";

// =============================================================================
// Error Kinds
// =============================================================================

/// High-level error kinds for classification and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Selection URL matched neither accepted shape.
    Format,
    /// Persistent token storage failed.
    Storage,
    /// The request could not reach the remote service.
    Network,
    /// The remote service responded with an error.
    RemoteApplication,
    /// Configuration or input problems.
    Configuration,
    /// Everything else.
    Internal,
}

impl ErrorKind {
    /// Returns a human-readable description of the kind.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Format => "Format error",
            Self::Storage => "Storage error",
            Self::Network => "Network error",
            Self::RemoteApplication => "Remote application error",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this kind.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Format => "F",
            Self::Storage => "S",
            Self::Network => "N",
            Self::RemoteApplication => "R",
            Self::Configuration => "C",
            Self::Internal => "X",
        }
    }

    /// Machine-readable name used in JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Storage => "storage",
            Self::Network => "network",
            Self::RemoteApplication => "remote_application",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unexpected failure
    GeneralError = 1,
    /// Unrecognized URL, bad config or missing input
    InvalidInput = 3,
    /// Network failure or timeout
    Network = 4,
    /// The API answered with an error status
    Remote = 5,
    /// Token storage failure
    Storage = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Main error type for figjson operations.
#[derive(Error, Debug)]
pub enum FigjsonError {
    // ==========================================================================
    // Format errors
    // ==========================================================================
    /// The URL matched neither the `design/` nor the `file/` shape.
    #[error("invalid Figma URL format: {url}")]
    InvalidSelectionUrl { url: String },

    // ==========================================================================
    // Storage errors
    // ==========================================================================
    /// The token backend could not be read or written.
    #[error("token storage unavailable ({backend}): {message}")]
    Storage { backend: String, message: String },

    // ==========================================================================
    // Network errors
    // ==========================================================================
    /// Request timed out.
    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    /// Connection, DNS or TLS failure.
    #[error("network error: {0}")]
    Network(String),

    // ==========================================================================
    // Remote application errors
    // ==========================================================================
    /// The API returned a non-success status.
    #[error("Figma API error (HTTP {status}): {message}")]
    RemoteApplication { status: u16, message: String },

    /// The API returned success with a body that is not JSON.
    #[error("failed to parse response: {0}")]
    InvalidResponse(String),

    // ==========================================================================
    // Configuration errors
    // ==========================================================================
    /// Invalid configuration file or value.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required input is empty, so the action is disabled.
    #[error("missing input: {0}")]
    MissingInput(String),

    // ==========================================================================
    // Internal errors
    // ==========================================================================
    /// Clipboard access failed.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FigjsonError {
    /// Returns the error kind for classification and rendering.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSelectionUrl { .. } => ErrorKind::Format,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::Timeout(_) | Self::Network(_) => ErrorKind::Network,
            Self::RemoteApplication { .. } | Self::InvalidResponse(_) => {
                ErrorKind::RemoteApplication
            }
            Self::Config(_) | Self::MissingInput(_) => ErrorKind::Configuration,
            Self::Clipboard(_) | Self::Io(_) | Self::Json(_) | Self::Other(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Map error to process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind() {
            ErrorKind::Format | ErrorKind::Configuration => ExitCode::InvalidInput,
            ErrorKind::Storage => ExitCode::Storage,
            ErrorKind::Network => ExitCode::Network,
            ErrorKind::RemoteApplication => ExitCode::Remote,
            ErrorKind::Internal => ExitCode::GeneralError,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `FIGJSON-{kind}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSelectionUrl { .. } => "FIGJSON-F001",
            Self::Storage { .. } => "FIGJSON-S001",
            Self::Timeout(_) => "FIGJSON-N001",
            Self::Network(_) => "FIGJSON-N099",
            Self::RemoteApplication { .. } => "FIGJSON-R001",
            Self::InvalidResponse(_) => "FIGJSON-R002",
            Self::Config(_) => "FIGJSON-C001",
            Self::MissingInput(_) => "FIGJSON-C002",
            Self::Clipboard(_) => "FIGJSON-X010",
            Self::Io(_) => "FIGJSON-X001",
            Self::Json(_) => "FIGJSON-X002",
            Self::Other(_) => "FIGJSON-X099",
        }
    }

    /// The short message shown to the user in a notification.
    ///
    /// Network failures collapse into one generic message; remote errors
    /// surface the API's own message.
    #[must_use]
    pub fn notification_message(&self) -> String {
        match self {
            Self::InvalidSelectionUrl { .. } => INVALID_URL_MESSAGE.to_string(),
            Self::Timeout(_) | Self::Network(_) | Self::InvalidResponse(_) => {
                GENERIC_FETCH_MESSAGE.to_string()
            }
            Self::RemoteApplication { message, .. } => message.clone(),
            _ => {
                let text = self.to_string();
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }

    /// Shorthand for a storage error.
    pub fn storage(backend: &str, message: impl std::fmt::Display) -> Self {
        Self::Storage {
            backend: backend.to_string(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for figjson operations.
pub type Result<T> = std::result::Result<T, FigjsonError>;
