//! Application layer for parley
//!
//! This crate contains the message pipeline state machine, port definitions,
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod pipeline;
pub mod ports;

// Re-export commonly used types
pub use config::ProviderParams;
pub use pipeline::{IgnoreReason, MessagePipeline, PipelineState, SubmitOutcome};
pub use ports::{
    completion_provider::{CompletionProvider, ProviderError},
    navigator::Navigator,
    session_directory::{DirectoryError, SessionDirectory},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
