//! Clipboard access.
//!
//! figjson exits right after copying, so the copy has to outlive the process.
//! On macOS and Windows the OS owns the pasteboard and `arboard` is enough. On
//! X11 and Wayland the selection dies with its owner, so the text is handed to
//! a clipboard tool (`wl-copy`, `xclip`, `xsel`) that keeps serving it.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use crate::error::{FigjsonError, Result};

/// Something that can receive copied text.
pub trait Clipboard: Send {
    /// Replace the clipboard contents.
    ///
    /// # Errors
    /// Returns [`FigjsonError::Clipboard`] if the text could not be placed
    /// where it survives this process.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// An external program that reads the text to copy from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    #[must_use]
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| (*arg).to_string()).collect(),
        }
    }

    fn run(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            // xclip and wl-copy fork a server that would otherwise hold our pipes open
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| FigjsonError::Clipboard(format!("failed to start {}: {e}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| FigjsonError::Clipboard(format!("{}: {e}", self.program)))?;
        }

        let status = child
            .wait()
            .map_err(|e| FigjsonError::Clipboard(format!("{}: {e}", self.program)))?;
        if status.success() {
            Ok(())
        } else {
            Err(FigjsonError::Clipboard(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}

/// The desktop clipboard.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    native: bool,
    commands: Vec<ClipboardCommand>,
}

impl SystemClipboard {
    /// Clipboard for the current platform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            native: cfg!(any(target_os = "macos", windows)),
            commands: platform_commands(),
        }
    }

    /// Only the given commands, tried in order.
    #[must_use]
    pub const fn with_commands(commands: Vec<ClipboardCommand>) -> Self {
        Self {
            native: false,
            commands,
        }
    }

    #[cfg(any(target_os = "macos", windows))]
    fn set_native(text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| FigjsonError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| FigjsonError::Clipboard(e.to_string()))
    }

    #[cfg(not(any(target_os = "macos", windows)))]
    fn set_native(_text: &str) -> Result<()> {
        Err(FigjsonError::Clipboard(
            "no native clipboard that outlives the process".to_string(),
        ))
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.native {
            match Self::set_native(text) {
                Ok(()) => {
                    tracing::debug!(bytes = text.len(), "Copied to clipboard");
                    return Ok(());
                }
                Err(e) => tracing::debug!(error = %e, "Native clipboard failed"),
            }
        }

        let mut failures = Vec::new();
        for command in &self.commands {
            if which::which(&command.program).is_err() {
                tracing::debug!(program = %command.program, "Clipboard tool not installed");
                continue;
            }
            match command.run(text) {
                Ok(()) => {
                    tracing::debug!(program = %command.program, bytes = text.len(), "Copied to clipboard");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Clipboard tool failed");
                    failures.push(e.to_string());
                }
            }
        }

        let tried: Vec<&str> = self.commands.iter().map(|c| c.program.as_str()).collect();
        Err(FigjsonError::Clipboard(if failures.is_empty() {
            format!("no clipboard tool found (tried: {})", tried.join(", "))
        } else {
            failures.join("; ")
        }))
    }
}

#[cfg(target_os = "macos")]
fn platform_commands() -> Vec<ClipboardCommand> {
    vec![ClipboardCommand::new("pbcopy", &[])]
}

#[cfg(windows)]
fn platform_commands() -> Vec<ClipboardCommand> {
    vec![ClipboardCommand::new(
        "powershell.exe",
        &["-NoProfile", "-Command", "$input | Set-Clipboard"],
    )]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn platform_commands() -> Vec<ClipboardCommand> {
    let mut commands = Vec::new();
    if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        commands.push(ClipboardCommand::new("wl-copy", &[]));
    }
    commands.push(ClipboardCommand::new("xclip", &["-selection", "clipboard"]));
    commands.push(ClipboardCommand::new("xsel", &["--clipboard", "--input"]));
    commands
}

#[cfg(not(any(unix, windows)))]
fn platform_commands() -> Vec<ClipboardCommand> {
    Vec::new()
}

/// In-memory clipboard; clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| FigjsonError::Clipboard("clipboard lock poisoned".to_string()))?;
        *guard = Some(text.to_string());
        Ok(())
    }
}
