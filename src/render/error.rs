//! Error rendering for figjson.

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::error::FigjsonError;

/// Render an error for stderr.
///
/// Human mode prints the notification text with the stable code; robot mode
/// prints one JSON object keyed by `error`.
#[must_use]
pub fn render_error(error: &FigjsonError, format: OutputFormat, color: bool) -> String {
    match format {
        OutputFormat::Json => render_error_json(error),
        OutputFormat::Human => {
            let line = render_simple(error);
            if color { line.red().to_string() } else { line }
        }
    }
}

/// Render error as structured JSON for machine consumption.
#[must_use]
pub fn render_error_json(error: &FigjsonError) -> String {
    let mut body = serde_json::json!({
        "code": error.error_code(),
        "kind": error.kind().as_str(),
        "message": error.notification_message(),
        "detail": error.to_string(),
    });
    if let FigjsonError::RemoteApplication { status, .. } = error {
        body["status"] = serde_json::json!(status);
    }
    serde_json::json!({ "error": body }).to_string()
}

fn render_simple(error: &FigjsonError) -> String {
    let message = error.notification_message();
    let detail = error.to_string();
    if message == detail || matches!(error, FigjsonError::RemoteApplication { .. }) {
        format!("Error [{}]: {message}", error.error_code())
    } else {
        format!("Error [{}]: {message} ({detail})", error.error_code())
    }
}
