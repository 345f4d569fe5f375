//! `resolve` command: show what a selection URL points at.

use super::Output;
use super::args::ResolveArgs;
use crate::core::selection;
use crate::error::Result;
use crate::render;

/// Execute the resolve command. No network access.
///
/// # Errors
/// Returns a format error if the URL is not a recognized selection link.
pub fn execute(args: &ResolveArgs, output: Output) -> Result<()> {
    let reference = selection::resolve(&args.url)?;
    println!("{}", render::render_reference(&reference, output.format)?);
    Ok(())
}
