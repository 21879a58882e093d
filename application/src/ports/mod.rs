//! Port definitions (interfaces for external collaborators)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod completion_provider;
pub mod navigator;
pub mod session_directory;
pub mod transcript_logger;
