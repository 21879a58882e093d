//! Completion adapters.
//!
//! Provides [`SimulatedCompletionProvider`], a deferred-reply stand-in for
//! a network-backed completion service. It implements the
//! [`CompletionProvider`](parley_application::CompletionProvider) port, so
//! swapping in a real backend never touches pipeline logic.

mod simulated;

pub use simulated::SimulatedCompletionProvider;
