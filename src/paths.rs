//! Path and name utilities for user-supplied input.
//!
//! Use [`expand_tilde`] before any filesystem operation on user-provided paths.
//! Use [`sanitize_name`] on project and app names before validating them.

use anyhow::{Result, bail};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::platform::Fs;

static VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid name regex"));

/// Expand `~` or `~/...` at the start of a path to the user's home directory.
///
/// Returns the path unchanged if it doesn't start with `~` or if the home
/// directory cannot be determined.
pub fn expand_tilde(path: &str, fs: &impl Fs) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = fs.home_dir() {
            return home.join(rest);
        }
    } else if path == "~"
        && let Some(home) = fs.home_dir()
    {
        return home;
    }
    PathBuf::from(path)
}

/// Resolve the answer to "where should it go?".
///
/// An empty answer or `.` means the current directory.
pub fn parent_dir(answer: &str, fs: &impl Fs) -> PathBuf {
    let answer = answer.trim();
    if answer.is_empty() || answer == "." {
        return PathBuf::from(".");
    }
    expand_tilde(answer, fs)
}

/// Replace every whitespace character with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Sanitize `name` and check it is usable as a folder name.
pub fn validate_name(name: &str, what: &str) -> Result<String> {
    let name = sanitize_name(name);
    if !VALID_NAME.is_match(&name) {
        bail!(
            "Invalid {what} name {name:?}. {what} names may only contain letters, digits, `_` and `-`."
        );
    }
    Ok(name)
}
