//! Operations that implement monokit commands.
//!
//! `create` and `add` each correspond to a CLI subcommand and expose a `run()`
//! function. Both gather every answer up front, then hand each app to
//! `scaffold`, and remove what they created if a later step fails.

pub mod add;
pub mod create;
pub mod scaffold;
