//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::storage::config::StorageBackend;

/// Fetch the raw JSON of a Figma selection.
#[derive(Parser, Debug)]
#[command(name = "figjson")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Global flags ===
    /// Output format for messages and errors
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Token storage backend
    #[arg(long, value_enum, value_name = "BACKEND", global = true)]
    pub storage: Option<StorageBackend>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save, delete or show the Figma access token
    #[command(subcommand)]
    Token(TokenCommand),

    /// Print the file and node ids of a selection URL without fetching
    Resolve(ResolveArgs),

    /// Fetch the JSON of a selection
    Get(GetArgs),
}

/// Token subcommands.
#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Save a personal access token (read from stdin when omitted)
    Save {
        /// The token
        token: Option<String>,
    },

    /// Delete the saved token
    Delete,

    /// Show the saved token (masked)
    Show {
        /// Print the token in full
        #[arg(long)]
        reveal: bool,
    },
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Selection URL copied from Figma
    pub url: String,
}

/// Arguments for the `get` command.
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Selection URL copied from Figma
    pub url: String,

    /// Use this token instead of the saved one
    #[arg(long, env = "FIGJSON_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Copy the JSON to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Write the JSON to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Parse a format name.
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
