//! Terminal prompts: the arrow-key select menu and its helpers.

mod completion;
mod erase;
mod select;

pub use completion::PathCompleter;
pub use select::{DEFAULT_POINTER, SelectError, SelectOption, select};
#[cfg(test)]
pub(crate) use select::validate;
