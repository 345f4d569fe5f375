//! Storage for configuration and the access token.

pub mod config;
pub mod kv;
pub mod paths;
pub mod token;

use std::path::Path;

pub use config::{
    Config, ConfigSource, ConfigSources, ENV_API_BASE, ENV_CONFIG, ENV_FORMAT, ENV_NO_COLOR,
    ENV_NO_COLOR_STD, ENV_STORAGE, ENV_STORE_FILE, ENV_TIMEOUT, ResolvedConfig, StorageBackend,
};
pub use kv::{FileStore, KeyValueStore, KeyringStore, MemoryStore};
pub use paths::AppPaths;
pub use token::{TOKEN_KEY, TokenStore};

/// Keyring service name for the token entry.
pub const KEYRING_SERVICE: &str = "figjson";

/// Open the configured backend.
#[must_use]
pub fn open_store(backend: StorageBackend, file_path: &Path) -> Box<dyn KeyValueStore> {
    match backend {
        StorageBackend::File => Box::new(FileStore::new(file_path)),
        StorageBackend::Keyring => Box::new(KeyringStore::new(KEYRING_SERVICE)),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    }
}
