//! Selection URL resolution.
//!
//! A Figma "copy link" URL names a file and a node inside it. Two shapes are
//! recognized and tried in order; the first match wins:
//!
//! 1. `.../design/{fileId}/{name}?node-id={nodeId}[&...]`
//! 2. `.../file/{fileId}/?node-id={nodeId}[&...]`
//!
//! Identifiers are returned exactly as they appear in the URL. The node id is
//! frequently percent-encoded (`12%3A34`) and is never decoded here.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{FigjsonError, Result};

/// Any character except a line terminator (`\n`, `\r`, U+2028, U+2029).
const ANY: &str = r"[^\n\r\x{2028}\x{2029}]";

static DESIGN_URL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(&format!(r"design/({ANY}*?)/({ANY}*?)\?node-id=({ANY}*?)(?:&|$)")).unwrap()
});

static FILE_URL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(&format!(r"file/({ANY}*?)/\?node-id=({ANY}*?)(?:&|$)")).unwrap()
});

/// A file and node pair extracted from a selection URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionReference {
    /// Figma file key.
    pub file_id: String,
    /// Node id, verbatim.
    pub node_id: String,
}

impl SelectionReference {
    #[must_use]
    pub fn new(file_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            node_id: node_id.into(),
        }
    }
}

impl fmt::Display for SelectionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.file_id, self.node_id)
    }
}

/// Which URL shape produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlShape {
    /// `design/{fileId}/{name}?node-id=...`
    Design,
    /// `file/{fileId}/?node-id=...`
    File,
}

/// Resolve a selection URL into its file and node identifiers.
///
/// # Errors
///
/// Returns [`FigjsonError::InvalidSelectionUrl`] when neither shape matches.
pub fn resolve(url: &str) -> Result<SelectionReference> {
    resolve_with_shape(url).map(|(reference, _)| reference)
}

/// Like [`resolve`], also reporting which shape matched.
///
/// # Errors
///
/// Returns [`FigjsonError::InvalidSelectionUrl`] when neither shape matches.
pub fn resolve_with_shape(url: &str) -> Result<(SelectionReference, UrlShape)> {
    if let Some(caps) = DESIGN_URL.captures(url) {
        let reference = SelectionReference::new(&caps[1], &caps[3]);
        tracing::debug!(file_id = %reference.file_id, node_id = %reference.node_id, "Matched design URL");
        return Ok((reference, UrlShape::Design));
    }

    if let Some(caps) = FILE_URL.captures(url) {
        let reference = SelectionReference::new(&caps[1], &caps[2]);
        tracing::debug!(file_id = %reference.file_id, node_id = %reference.node_id, "Matched file URL");
        return Ok((reference, UrlShape::File));
    }

    tracing::debug!(url, "Selection URL not recognized");
    Err(FigjsonError::InvalidSelectionUrl {
        url: url.to_string(),
    })
}
