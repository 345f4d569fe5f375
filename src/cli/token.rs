//! `token` command: save, delete, show.

use std::io::BufRead;

use super::Output;
use super::args::TokenCommand;
use crate::app::{Action, SystemClipboard};
use crate::error::{FigjsonError, Result};
use crate::render;
use crate::storage::ResolvedConfig;

/// Execute a token subcommand.
///
/// # Errors
/// Returns error if the token cannot be read, written or removed, or if the
/// action is not available (nothing to save or delete).
pub async fn execute(cmd: &TokenCommand, config: &ResolvedConfig, output: Output) -> Result<()> {
    let mut app = super::open_app(config, Box::new(SystemClipboard::new()))?;

    match cmd {
        TokenCommand::Save { token } => {
            let token = match token {
                Some(token) => token.clone(),
                None => read_token(std::io::stdin().lock())?,
            };
            app.dispatch(Action::EditToken(token)).await?;
            app.dispatch(Action::SaveToken).await?;
            output.notify(app.state());
        }
        TokenCommand::Delete => {
            app.dispatch(Action::DeleteToken).await?;
            output.notify(app.state());
        }
        TokenCommand::Show { reveal } => {
            // Surfaces an unreadable store before reporting "no token"
            output.notify(app.state());
            if *reveal {
                app.dispatch(Action::ToggleTokenVisibility).await?;
            }
            println!(
                "{}",
                render::render_token(
                    &app.state().token_display(),
                    config.storage.as_str(),
                    output.format
                )?
            );
        }
    }

    Ok(())
}

/// Read a token from the first line of `reader`, without the line ending.
///
/// # Errors
/// Returns [`FigjsonError::MissingInput`] if the line is empty.
pub fn read_token(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let token = line.trim_end_matches(['\r', '\n']).to_string();
    if token.is_empty() {
        return Err(FigjsonError::MissingInput(
            "no access token given on stdin".to_string(),
        ));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_token_strips_line_ending() {
        assert_eq!(read_token(&b"figd_abc\r\n"[..]).unwrap(), "figd_abc");
        assert_eq!(read_token(&b"abc123"[..]).unwrap(), "abc123");
    }

    #[test]
    fn read_token_keeps_inner_spaces() {
        assert_eq!(read_token(&b" a b \n"[..]).unwrap(), " a b ");
    }

    #[test]
    fn read_token_empty_is_missing_input() {
        assert!(matches!(
            read_token(&b"\n"[..]).unwrap_err(),
            FigjsonError::MissingInput(_)
        ));
        assert!(read_token(&b""[..]).is_err());
    }
}
