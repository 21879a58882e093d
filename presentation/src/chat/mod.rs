//! Interactive chat surface.
//!
//! [`ChatRepl`] is the rendering/input surface in front of the message
//! pipeline; [`ReplNavigator`] implements the navigation port for it.

mod navigator;
mod repl;

pub use navigator::ReplNavigator;
pub use repl::ChatRepl;
