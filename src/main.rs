//! figjson - Figma selection JSON fetcher
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use std::process::ExitCode;

use figjson::cli::{Cli, Commands, Output, OutputFormat};
use figjson::core::logging::{self, LogSettings};
use figjson::storage::ResolvedConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let settings = LogSettings::resolve(cli.log_level.as_deref(), cli.json_output, cli.verbose);
    logging::init(&settings);

    // Errors raised before the config resolves still honor --json/--format
    let mut output = Output {
        format: fallback_format(&cli),
        color: figjson::util::env::should_color_stderr(cli.no_color),
    };

    let result = match ResolvedConfig::resolve(&cli, get_args(&cli)) {
        Ok(config) => {
            tracing::trace!(
                api_base = %config.sources.api_base,
                storage = %config.sources.storage,
                "Configuration sources"
            );
            output = Output::from_config(&config);
            run(cli, &config, output).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.error_code(), "{}", e);
            eprintln!(
                "{}",
                figjson::render::render_error(&e, output.format, output.color)
            );
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli, config: &ResolvedConfig, output: Output) -> figjson::Result<()> {
    match cli.command {
        None => {
            print_quickstart();
            Ok(())
        }

        Some(Commands::Token(cmd)) => figjson::cli::token::execute(&cmd, config, output).await,

        Some(Commands::Resolve(args)) => figjson::cli::resolve::execute(&args, output),

        Some(Commands::Get(args)) => figjson::cli::get::execute(&args, config, output).await,
    }
}

fn get_args(cli: &Cli) -> Option<&figjson::cli::args::GetArgs> {
    match &cli.command {
        Some(Commands::Get(args)) => Some(args),
        _ => None,
    }
}

fn fallback_format(cli: &Cli) -> OutputFormat {
    if cli.json {
        OutputFormat::Json
    } else {
        cli.format.unwrap_or_default()
    }
}

fn print_quickstart() {
    println!("figjson - fetch the raw JSON of a Figma selection");
    println!();
    println!("Quick start:");
    println!("  figjson token save <TOKEN>     Save your Figma personal access token");
    println!("  figjson resolve <URL>          Show the file and node ids of a selection URL");
    println!("  figjson get <URL>              Print the selection's JSON");
    println!("  figjson get <URL> --copy       ...and copy it to the clipboard");
    println!();
    println!("Run 'figjson --help' for all options.");
}
