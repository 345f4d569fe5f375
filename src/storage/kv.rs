//! Key-value storage backends.
//!
//! The token lives under one key in whichever backend is configured:
//! - [`FileStore`]: a JSON object on disk (default)
//! - [`KeyringStore`]: the OS credential store
//! - [`MemoryStore`]: process memory, for tests and throwaway sessions

use std::collections::{BTreeMap, HashMap};
use std::fs::OpenOptions;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{FigjsonError, Result};

/// Minimal string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Short backend name for messages.
    fn backend_name(&self) -> &'static str;

    /// Read a value. Absence is `Ok(None)`.
    ///
    /// # Errors
    /// Returns a storage error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    /// Returns a storage error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key succeeds.
    ///
    /// # Errors
    /// Returns a storage error if the backend cannot be written.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

// =============================================================================
// File
// =============================================================================

/// JSON object file, one entry per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file. A missing or blank file is empty.
    ///
    /// The inner error is the parse failure of a file that exists but is not
    /// a JSON object of strings.
    fn read_entries(&self) -> Result<std::result::Result<Entries, serde_json::Error>> {
        if !self.path.exists() {
            return Ok(Ok(Entries::new()));
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| FigjsonError::storage("file", format!("{}: {e}", self.path.display())))?;
        if content.trim().is_empty() {
            return Ok(Ok(Entries::new()));
        }
        Ok(serde_json::from_str(&content))
    }

    fn read_all(&self) -> Result<Entries> {
        self.read_entries()?.map_err(|e| {
            FigjsonError::storage("file", format!("{} is corrupt: {e}", self.path.display()))
        })
    }

    /// Entries to start a write from. An unreadable store is replaced, so a
    /// torn file never locks the user out.
    fn read_for_update(&self) -> Result<(Entries, bool)> {
        match self.read_entries()? {
            Ok(entries) => Ok((entries, false)),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Replacing corrupt token store");
                Ok((Entries::new(), true))
            }
        }
    }

    fn write_all(&self, entries: &Entries) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;
        write_private(&self.path, content.as_bytes())
            .map_err(|e| FigjsonError::storage("file", format!("{}: {e}", self.path.display())))?;
        tracing::debug!(path = ?self.path, "Token store written");
        Ok(())
    }
}

type Entries = BTreeMap<String, String>;

/// Write `content` to `path` via a temp file and rename, readable by the
/// owner only.
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;
    let temp_path = parent.join(format!(
        ".{}.tmp.{}",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("store"),
        std::process::id()
    ));

    let written = (|| {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        std::fs::rename(&temp_path, path)
    })();

    if written.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    written
}

impl KeyValueStore for FileStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let (mut entries, _) = self.read_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn delete(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let (mut entries, replaced) = self.read_for_update()?;
        if entries.remove(key).is_some() || replaced {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

// =============================================================================
// Keyring
// =============================================================================

/// OS credential store, one entry per key under a fixed service name.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key)
            .map_err(|e| FigjsonError::storage("keyring", format!("Keyring error: {e}")))
    }
}

impl KeyValueStore for KeyringStore {
    fn backend_name(&self) -> &'static str {
        "keyring"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(FigjsonError::storage("keyring", format!("Failed to read token: {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| FigjsonError::storage("keyring", format!("Failed to store token: {e}")))
    }

    fn delete(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(FigjsonError::storage("keyring", format!("Failed to delete token: {e}"))),
        }
    }
}

// =============================================================================
// Memory
// =============================================================================

/// In-process map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| FigjsonError::storage("memory", "store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
