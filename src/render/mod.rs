//! Output rendering for human and robot modes.
//!
//! Documents always go to stdout untouched. Notifications and errors go to
//! stderr, colored in human mode and as single-line JSON in robot mode.

pub mod error;

use colored::Colorize;
use serde::Serialize;

use crate::app::{Notification, Severity};
use crate::cli::args::OutputFormat;
use crate::core::selection::SelectionReference;
use crate::error::Result;

pub use error::render_error;

/// Render a notification.
#[must_use]
pub fn render_notification(note: &Notification, format: OutputFormat, color: bool) -> String {
    match format {
        OutputFormat::Json => {
            let level = match note.severity {
                Severity::Success => "success",
                Severity::Error => "error",
            };
            serde_json::json!({ "notification": { "severity": level, "message": note.message } })
                .to_string()
        }
        OutputFormat::Human => {
            let mark = match note.severity {
                Severity::Success => "✓",
                Severity::Error => "✗",
            };
            let line = format!("{mark} {}", note.message);
            if !color {
                return line;
            }
            match note.severity {
                Severity::Success => line.green().to_string(),
                Severity::Error => line.red().bold().to_string(),
            }
        }
    }
}

/// Render resolved identifiers.
///
/// # Errors
/// Returns a JSON error if serialization fails.
pub fn render_reference(reference: &SelectionReference, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reference)?),
        OutputFormat::Human => Ok(format!(
            "file: {}\nnode: {}",
            reference.file_id, reference.node_id
        )),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenStatus<'a> {
    saved: bool,
    backend: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
}

/// Render the saved token (already masked or revealed by the caller).
///
/// # Errors
/// Returns a JSON error if serialization fails.
pub fn render_token(display: &str, backend: &str, format: OutputFormat) -> Result<String> {
    let saved = !display.is_empty();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&TokenStatus {
            saved,
            backend,
            token: saved.then_some(display),
        })?),
        OutputFormat::Human if saved => Ok(format!("{display} ({backend})")),
        OutputFormat::Human => Ok(format!("No token saved ({backend})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(severity: Severity) -> Notification {
        Notification {
            message: "Invalid token".to_string(),
            severity,
        }
    }

    #[test]
    fn human_notification_without_color() {
        assert_eq!(
            render_notification(&note(Severity::Error), OutputFormat::Human, false),
            "✗ Invalid token"
        );
        assert_eq!(
            render_notification(&note(Severity::Success), OutputFormat::Human, false),
            "✓ Invalid token"
        );
    }

    #[test]
    fn json_notification() {
        let out = render_notification(&note(Severity::Error), OutputFormat::Json, true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["notification"]["severity"], "error");
        assert_eq!(value["notification"]["message"], "Invalid token");
    }

    #[test]
    fn reference_rendering() {
        let reference = SelectionReference::new("FILEID", "12%3A34");
        assert_eq!(
            render_reference(&reference, OutputFormat::Human).unwrap(),
            "file: FILEID\nnode: 12%3A34"
        );
        let json = render_reference(&reference, OutputFormat::Json).unwrap();
        assert!(json.contains("\"fileId\": \"FILEID\""));
        assert!(json.contains("\"nodeId\": \"12%3A34\""));
    }

    #[test]
    fn token_rendering() {
        assert_eq!(
            render_token("", "file", OutputFormat::Human).unwrap(),
            "No token saved (file)"
        );
        let json = render_token("figd…cdef", "keyring", OutputFormat::Json).unwrap();
        assert!(json.contains("\"saved\": true"));
        assert!(json.contains("\"token\": \"figd…cdef\""));
        let empty = render_token("", "file", OutputFormat::Json).unwrap();
        assert!(!empty.contains("\"token\""));
    }
}
