//! Abstracted external dependencies for testability.
//!
//! Four traits cover all side effects: [`Fs`] for filesystem operations,
//! [`Runner`] for spawning package-manager commands, [`Prompter`] for
//! interactive questions, and [`Terminal`] for the raw keypress stream the
//! select prompt reads from.
//!
//! Production code uses the real implementations ([`RealFs`], [`RealRunner`],
//! [`RealPrompter`], [`RealTerminal`]). Tests substitute fakes via generics — no
//! trait objects needed.

mod real_fs;
mod real_prompt;
mod real_runner;
mod real_terminal;

pub use real_fs::RealFs;
pub use real_prompt::RealPrompter;
pub use real_runner::RealRunner;
pub use real_terminal::RealTerminal;

#[cfg(test)]
mod fake_fs;
#[cfg(test)]
mod fake_runner;
#[cfg(test)]
mod fake_terminal;

#[cfg(test)]
#[allow(unused_imports)]
pub use self::fake_fs::FakeFs;
#[cfg(test)]
#[allow(unused_imports)]
pub use self::fake_prompt::{FakePrompter, FakeResponse};
#[cfg(test)]
#[allow(unused_imports)]
pub use self::fake_runner::FakeRunner;
#[cfg(test)]
#[allow(unused_imports)]
pub use self::fake_terminal::FakeTerminal;

use anyhow::Result;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::prompt::SelectOption;

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// A single entry returned by [`Fs::read_dir`].
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Full path to this entry.
    pub path: PathBuf,
    /// Whether this is a directory (follows symlinks).
    pub is_dir: bool,
}

impl DirEntry {
    /// The final path component as a string, or empty if it has none.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Abstraction over the filesystem operations the scaffolder performs.
///
/// Every method that touches the filesystem goes through this trait.
pub trait Fs {
    // -- Reading --

    /// Read the entire contents of a file as a UTF-8 string.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    // -- Writing --

    /// Write `contents` to a file, creating it or truncating if it exists.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    // -- Removal --

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove a directory and everything below it.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    // -- Directory creation --

    /// Create a single directory. Fails if it already exists or the parent is missing.
    fn create_dir(&self, path: &Path) -> Result<()>;

    // -- Path queries --

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// List the immediate children of a directory, sorted by path.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    // -- System paths --

    /// Return the user's home directory, if it can be determined.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Return the user's config directory (e.g. `~/.config`), if it can be determined.
    fn config_dir(&self) -> Option<PathBuf>;
}

// ---------------------------------------------------------------------------
// Process runner
// ---------------------------------------------------------------------------

/// Why a command run through [`Runner::run`] failed.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` failed (exit {code}): {stderr}")]
    Exit {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// Abstraction over spawning external commands (npm, npx, create-vite).
pub trait Runner {
    /// Run `command_line` through the platform shell with `working_dir` as the
    /// current directory.
    ///
    /// Returns captured stdout when the command exits successfully.
    fn run(&self, working_dir: &Path, command_line: &str) -> Result<String, RunError>;
}

// ---------------------------------------------------------------------------
// Prompter
// ---------------------------------------------------------------------------

/// Abstraction over interactive user prompts.
///
/// In production, `select` drives [`crate::prompt::select`] on the real
/// terminal and `ask` delegates to `dialoguer`. In tests, returns predetermined
/// answers.
pub trait Prompter {
    /// Present a selection prompt and return the chosen option's value.
    ///
    /// A user cancellation surfaces as [`crate::prompt::SelectError::Cancelled`]
    /// inside the returned error.
    fn select<T: Clone>(&self, question: &str, options: &[SelectOption<T>]) -> Result<T>;

    /// Ask for a single line of text. Empty answers are allowed.
    fn ask(&self, question: &str) -> Result<String>;
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

/// A keypress as seen by the select prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
    /// Ctrl-C.
    Interrupt,
    /// Anything the prompt does not react to.
    Other,
}

/// The raw terminal a select prompt owns while it is active.
///
/// Output goes through the [`Write`] supertrait so crossterm commands can be
/// queued onto it.
pub trait Terminal: Write {
    /// Switch between raw (unbuffered, no echo) and line-buffered input.
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()>;

    /// Block until the next keypress.
    fn read_key(&mut self) -> io::Result<Key>;
}
