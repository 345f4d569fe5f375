//! CLI argument parsing and command dispatch.

pub mod args;
pub mod get;
pub mod resolve;
pub mod token;

pub use args::{Cli, Commands, OutputFormat};

use crate::app::{App, AppState, Clipboard};
use crate::core::retrieval::RetrievalClient;
use crate::error::Result;
use crate::render;
use crate::storage::{KeyValueStore, ResolvedConfig, TokenStore, open_store};

/// Where and how messages are written.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub format: OutputFormat,
    pub color: bool,
}

impl Output {
    #[must_use]
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            format: config.format,
            color: crate::util::env::should_color_stderr(config.no_color),
        }
    }

    /// Write the pending notification, if any, to stderr.
    pub fn notify(&self, state: &AppState) {
        if let Some(note) = &state.notification {
            eprintln!("{}", render::render_notification(note, self.format, self.color));
        }
    }
}

/// Build an app over the configured token backend.
///
/// # Errors
/// Returns error if the HTTP client cannot be built.
pub fn open_app(
    config: &ResolvedConfig,
    clipboard: Box<dyn Clipboard>,
) -> Result<App<Box<dyn KeyValueStore>>> {
    let store = open_store(config.storage, &config.store_path);
    open_app_with_store(config, store, clipboard)
}

/// Build an app over an explicit store.
///
/// # Errors
/// Returns error if the HTTP client cannot be built.
pub fn open_app_with_store<S: KeyValueStore>(
    config: &ResolvedConfig,
    store: S,
    clipboard: Box<dyn Clipboard>,
) -> Result<App<S>> {
    let client = RetrievalClient::new(&config.api_base, config.timeout)?;
    Ok(App::load(TokenStore::new(store), client, clipboard))
}
