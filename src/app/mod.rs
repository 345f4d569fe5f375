//! Application state and the action cycle.
//!
//! The user works through discrete actions (edit the token, save it, paste a
//! URL, fetch, copy). [`App::dispatch`] applies one action to [`AppState`] and
//! leaves a [`Notification`] describing the outcome. Errors are returned as
//! well, but never leave the app unusable: the next action starts clean.

pub mod clipboard;

use crate::core::retrieval::RetrievalClient;
use crate::core::selection;
use crate::error::{FigjsonError, Result};
use crate::storage::{KeyValueStore, TokenStore};
use crate::util::mask_token;

pub use clipboard::{Clipboard, ClipboardCommand, MemoryClipboard, SystemClipboard};

pub const TOKEN_SAVED: &str = "Token saved successfully!";
pub const TOKEN_DELETED: &str = "Token deleted successfully!";
pub const JSON_FETCHED: &str = "JSON fetched successfully!";
pub const JSON_COPIED: &str = "JSON copied to clipboard!";

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Outcome message of the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Everything the user sees.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Token field contents.
    pub token: String,
    /// Whether the token is shown in clear.
    pub show_token: bool,
    /// Selection URL field contents.
    pub selection_url: String,
    /// Last fetched document, pretty-printed. Empty until the first success.
    pub json_result: String,
    /// Pending notification, if any.
    pub notification: Option<Notification>,
}

impl AppState {
    #[must_use]
    pub fn can_save_token(&self) -> bool {
        !self.token.is_empty()
    }

    #[must_use]
    pub fn can_delete_token(&self) -> bool {
        !self.token.is_empty()
    }

    #[must_use]
    pub fn can_get_json(&self) -> bool {
        !self.token.is_empty() && !self.selection_url.is_empty()
    }

    #[must_use]
    pub fn can_copy_json(&self) -> bool {
        !self.json_result.is_empty()
    }

    /// Token as it should be displayed, honoring the visibility toggle.
    #[must_use]
    pub fn token_display(&self) -> String {
        if self.show_token {
            self.token.clone()
        } else {
            mask_token(&self.token)
        }
    }
}

/// A single user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    EditToken(String),
    ToggleTokenVisibility,
    SaveToken,
    DeleteToken,
    EditUrl(String),
    GetJson,
    CopyJson,
    DismissNotification,
}

/// The application: state plus the services actions need.
pub struct App<S> {
    state: AppState,
    tokens: TokenStore<S>,
    client: RetrievalClient,
    clipboard: Box<dyn Clipboard>,
}

impl<S: KeyValueStore> App<S> {
    /// Start the app, loading any previously saved token.
    ///
    /// An unreadable token store leaves the token field empty with an error
    /// notification; saving a token replaces the store.
    pub fn load(
        tokens: TokenStore<S>,
        client: RetrievalClient,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let mut state = AppState::default();
        match tokens.load() {
            Ok(token) => state.token = token,
            Err(err) => {
                tracing::warn!(error = %err, "Saved token could not be read");
                state.notification = Some(Notification {
                    message: err.notification_message(),
                    severity: Severity::Error,
                });
            }
        }
        Self {
            state,
            tokens,
            client,
            clipboard,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply one action.
    ///
    /// Field edits and toggles never fail. Every other action sets a
    /// notification: success text, or the error's notification message.
    ///
    /// # Errors
    /// Returns the error that was also turned into the notification.
    pub async fn dispatch(&mut self, action: Action) -> Result<()> {
        tracing::debug!(action = action_name(&action), "Dispatch");

        let outcome = match action {
            Action::EditToken(token) => {
                self.state.token = token;
                return Ok(());
            }
            Action::ToggleTokenVisibility => {
                self.state.show_token = !self.state.show_token;
                return Ok(());
            }
            Action::EditUrl(url) => {
                self.state.selection_url = url;
                return Ok(());
            }
            Action::DismissNotification => {
                self.state.notification = None;
                return Ok(());
            }
            Action::SaveToken => self.save_token().map(|()| TOKEN_SAVED),
            Action::DeleteToken => self.delete_token().map(|()| TOKEN_DELETED),
            Action::GetJson => self.get_json().await.map(|()| JSON_FETCHED),
            Action::CopyJson => self.copy_json().map(|()| JSON_COPIED),
        };

        match outcome {
            Ok(message) => {
                self.notify(Severity::Success, message.to_string());
                Ok(())
            }
            Err(err) => {
                self.notify(Severity::Error, err.notification_message());
                Err(err)
            }
        }
    }

    fn notify(&mut self, severity: Severity, message: String) {
        self.state.notification = Some(Notification { message, severity });
    }

    fn save_token(&self) -> Result<()> {
        if !self.state.can_save_token() {
            return Err(FigjsonError::MissingInput("no access token entered".to_string()));
        }
        self.tokens.save(&self.state.token)
    }

    fn delete_token(&mut self) -> Result<()> {
        if !self.state.can_delete_token() {
            return Err(FigjsonError::MissingInput("no access token to delete".to_string()));
        }
        self.tokens.delete()?;
        self.state.token.clear();
        Ok(())
    }

    async fn get_json(&mut self) -> Result<()> {
        if self.state.token.is_empty() {
            return Err(FigjsonError::MissingInput("no access token provided".to_string()));
        }
        if !self.state.can_get_json() {
            return Err(FigjsonError::MissingInput("no selection URL provided".to_string()));
        }

        let reference = selection::resolve(&self.state.selection_url)?;
        let document = self
            .client
            .fetch_selection_json(&self.state.token, &reference)
            .await?;
        self.state.json_result = document.text;
        Ok(())
    }

    fn copy_json(&mut self) -> Result<()> {
        if !self.state.can_copy_json() {
            return Err(FigjsonError::MissingInput("nothing to copy yet".to_string()));
        }
        self.clipboard.set_text(&self.state.json_result)
    }
}

const fn action_name(action: &Action) -> &'static str {
    match action {
        Action::EditToken(_) => "edit_token",
        Action::ToggleTokenVisibility => "toggle_token_visibility",
        Action::SaveToken => "save_token",
        Action::DeleteToken => "delete_token",
        Action::EditUrl(_) => "edit_url",
        Action::GetJson => "get_json",
        Action::CopyJson => "copy_json",
        Action::DismissNotification => "dismiss_notification",
    }
}
