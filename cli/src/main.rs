//! CLI entrypoint for parley
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use parley_application::{
    CompletionProvider, MessagePipeline, Navigator, NoTranscriptLogger, SessionDirectory,
    TranscriptLogger,
};
use parley_domain::SessionId;
use parley_infrastructure::{
    ConfigLoader, InMemorySessionDirectory, JsonlTranscriptLogger, SimulatedCompletionProvider,
};
use parley_presentation::{ChatRepl, Cli, ConsoleFormatter, ReplNavigator};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to load configuration")?
    };

    ConsoleFormatter::set_color_enabled(config.output.color);

    info!("Starting parley");

    // === Dependency Injection ===
    let params = config.provider.params();
    let provider: Arc<dyn CompletionProvider> = if cli.fail_provider {
        Arc::new(SimulatedCompletionProvider::failing(
            params,
            "simulated backend failure",
        ))
    } else {
        Arc::new(SimulatedCompletionProvider::new(params))
    };

    let logger: Arc<dyn TranscriptLogger> = match cli
        .transcript_log
        .as_ref()
        .and_then(JsonlTranscriptLogger::new)
    {
        Some(jsonl) => {
            info!("transcript events logged to {}", jsonl.path().display());
            Arc::new(jsonl)
        }
        None => Arc::new(NoTranscriptLogger),
    };

    let pipeline = Arc::new(
        MessagePipeline::new(provider)
            .with_greeting(config.chat.greeting.clone())
            .with_transcript_logger(logger),
    );
    let directory: Arc<dyn SessionDirectory> = Arc::new(InMemorySessionDirectory::seeded());
    let navigator = Arc::new(ReplNavigator::new());

    // Resume the requested session, or create a fresh one.
    let initial = match cli.session.as_deref().and_then(SessionId::parse) {
        Some(id) => id,
        None => directory
            .create_session()
            .await
            .context("failed to create a session")?,
    };
    navigator.go_to(&initial);

    let repl = ChatRepl::new(pipeline, directory, navigator)
        .with_quiet(cli.quiet)
        .with_history_file(config.repl.history_file.clone().map(Into::into));
    repl.run().await?;

    Ok(())
}
