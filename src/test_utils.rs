//! Test utilities for figjson.
//!
//! Shared fixtures for unit and integration tests: sample URLs and API
//! payloads, an isolated temp directory, and ready-made configurations.
//!
//! # Usage
//!
//! ```rust,ignore
//! use figjson::test_utils::*;
//!
//! let dir = TestDir::new();
//! let config = make_test_resolved_config("http://127.0.0.1:9999", &dir.store_file());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::OutputFormat;
use crate::storage::{ConfigSources, ResolvedConfig, StorageBackend};

// =============================================================================
// Sample Data
// =============================================================================

/// A `design/` link with a percent-encoded node id.
pub const DESIGN_URL: &str = "https://www.figma.com/design/FILEID/SomeName?node-id=12%3A34";

/// A legacy `file/` link with a dashed node id.
pub const FILE_URL: &str = "https://www.figma.com/file/FILEID/?node-id=5-6";

/// A URL that is not a Figma selection link.
pub const NOT_FIGMA_URL: &str = "https://example.com/not-figma";

/// A token that is long enough to be partially masked.
pub const TEST_TOKEN: &str = "figd_test_0123456789abcdef";

/// A realistic nodes response with deliberately unsorted keys.
#[must_use]
pub fn make_test_nodes_response() -> String {
    r#"{"name":"Landing","lastModified":"2026-01-19T00:00:00Z","version":"123","nodes":{"12:34":{"document":{"id":"12:34","name":"Button","type":"FRAME","absoluteBoundingBox":{"x":10.5,"y":-4.0,"width":120,"height":40}},"components":{},"schemaVersion":0}}}"#
        .to_string()
}

/// A Figma-style error payload.
#[must_use]
pub fn make_test_error_response(message: &str) -> String {
    serde_json::json!({ "status": 403, "message": message }).to_string()
}

/// Config TOML pointing at a custom API base and token file.
#[must_use]
pub fn make_test_config_toml(api_base: &str, store_file: &Path) -> String {
    format!(
        "[api]\nbase_url = \"{api_base}\"\ntimeout_seconds = 5\n\n[storage]\nbackend = \"file\"\npath = \"{}\"\n",
        store_file.display()
    )
}

/// A resolved config for tests: file backend, human output, no color.
#[must_use]
pub fn make_test_resolved_config(api_base: &str, store_file: &Path) -> ResolvedConfig {
    ResolvedConfig {
        api_base: api_base.trim_end_matches('/').to_string(),
        timeout: Duration::from_secs(5),
        storage: StorageBackend::File,
        store_path: store_file.to_path_buf(),
        format: OutputFormat::Human,
        no_color: true,
        sources: ConfigSources::default(),
    }
}

// =============================================================================
// Temporary Directory
// =============================================================================

/// An isolated temporary directory, removed on drop.
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Where tests keep the file-backed token store.
    #[must_use]
    pub fn store_file(&self) -> PathBuf {
        self.inner.path().join("data/token-store.json")
    }

    /// Where tests keep the config file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.inner.path().join("config.toml")
    }

    /// Create a file in the temporary directory with the given content.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.inner.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Read a file from the temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_file(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.inner.path().join(name))
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
