//! Infrastructure layer for parley
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod completion;
pub mod config;
pub mod directory;
pub mod logging;

// Re-export commonly used types
pub use completion::SimulatedCompletionProvider;
pub use config::{ConfigLoader, FileChatConfig, FileConfig, FileProviderConfig};
pub use directory::InMemorySessionDirectory;
pub use logging::JsonlTranscriptLogger;
