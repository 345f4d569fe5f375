//! Environment detection utilities.

use std::io::IsTerminal;

/// Check if stderr is a TTY.
#[must_use]
pub fn stderr_is_tty() -> bool {
    std::io::stderr().is_terminal()
}

/// Check if notifications on stderr should be colored.
#[must_use]
pub fn should_color_stderr(no_color: bool) -> bool {
    if no_color {
        return false;
    }

    if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
        return false;
    }

    stderr_is_tty()
}
