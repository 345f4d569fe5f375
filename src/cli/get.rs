//! `get` command: fetch the JSON of a selection.

use super::Output;
use super::args::GetArgs;
use crate::app::{Action, App, Clipboard, SystemClipboard};
use crate::error::Result;
use crate::storage::{KeyValueStore, MemoryStore, ResolvedConfig};

/// Execute the get command.
///
/// The document goes to stdout (or `--output`); notifications go to stderr.
/// A `--token` (or `FIGJSON_TOKEN`) is used for this call only and never
/// touches the token store.
///
/// # Errors
/// Returns the first failing step: token load, URL resolution, the request,
/// writing the output file, or the clipboard.
pub async fn execute(args: &GetArgs, config: &ResolvedConfig, output: Output) -> Result<()> {
    let clipboard: Box<dyn Clipboard> = Box::new(SystemClipboard::new());
    if let Some(token) = &args.token {
        tracing::debug!("Using token from flag/environment");
        let mut app = super::open_app_with_store(config, MemoryStore::new(), clipboard)?;
        app.dispatch(Action::EditToken(token.clone())).await?;
        run(&mut app, args, output).await
    } else {
        let mut app = super::open_app(config, clipboard)?;
        run(&mut app, args, output).await
    }
}

async fn run<S: KeyValueStore>(app: &mut App<S>, args: &GetArgs, output: Output) -> Result<()> {
    app.dispatch(Action::EditUrl(args.url.clone())).await?;
    app.dispatch(Action::GetJson).await?;

    let json = &app.state().json_result;
    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))?;
            tracing::info!(path = ?path, "Wrote selection JSON");
        }
        None => println!("{json}"),
    }
    output.notify(app.state());

    if args.copy {
        app.dispatch(Action::CopyJson).await?;
        output.notify(app.state());
    }

    Ok(())
}
