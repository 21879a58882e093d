//! Session directory adapters.
//!
//! Provides [`InMemorySessionDirectory`], an in-process implementation of
//! the [`SessionDirectory`](parley_application::SessionDirectory) port.

mod in_memory;

pub use in_memory::InMemorySessionDirectory;
