//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for parley
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(author, version, about = "Chat sessions with a pluggable completion backend")]
#[command(long_about = r#"
Parley opens an interactive chat session against a simulated completion
backend. Sessions are identified by short opaque tokens; switch between
them with /open, browse them with /sessions, and start fresh ones with
/new.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./parley.toml       Project-level config
3. ~/.config/parley/config.toml   Global config

Example:
  parley
  parley k3v9x2mp            # resume a known session token
  parley --transcript-log ./transcript.jsonl
"#)]
pub struct Cli {
    /// Session token to make active (a new session is created when omitted)
    pub session: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the welcome banner and transcript headers
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write structured transcript events to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub transcript_log: Option<PathBuf>,

    /// Make every completion request fail (exercises the error path)
    #[arg(long)]
    pub fail_provider: bool,
}
