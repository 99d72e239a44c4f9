//! Text edits on generated files and rendering of the bundled file templates.
//!
//! Manifests and configs are treated as plain text: a [`Replacement`] swaps the
//! first match of a literal or regex pattern, and [`insert_line`] splices a
//! line in at an index. Nothing here parses JSON or JavaScript.

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::path::Path;
use tera::Tera;
use tracing::{debug, trace};

use crate::platform::Fs;

pub const BIOME_JSON: &str = include_str!("../templates/biome.json");
pub const GITIGNORE: &str = include_str!("../templates/gitignore");
pub const README: &str = include_str!("../templates/README.md");
pub const INDEX_JS: &str = include_str!("../templates/index.js");
pub const VITE_CONFIG: &str = include_str!("../templates/vite.config.js");
pub const VITE_CONFIG_BLOCK: &str = include_str!("../templates/vite_config_block.js");

#[derive(Debug, Clone)]
enum Pattern {
    Literal(String),
    Regex(Regex),
}

/// Replace the first occurrence of a pattern with fixed text.
#[derive(Debug, Clone)]
pub struct Replacement {
    pattern: Pattern,
    with: String,
}

impl Replacement {
    pub fn literal(from: impl Into<String>, with: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::Literal(from.into()),
            with: with.into(),
        }
    }

    /// `with` is inserted verbatim; `$` groups are not expanded.
    pub fn regex(pattern: &str, with: impl Into<String>) -> Result<Self> {
        let regex =
            Regex::new(pattern).with_context(|| format!("Invalid replacement pattern: {pattern}"))?;
        Ok(Self {
            pattern: Pattern::Regex(regex),
            with: with.into(),
        })
    }

    /// Apply to `text`, or `None` when the pattern does not occur.
    pub fn apply(&self, text: &str) -> Option<String> {
        match &self.pattern {
            Pattern::Literal(from) => text
                .contains(from.as_str())
                .then(|| text.replacen(from.as_str(), &self.with, 1)),
            Pattern::Regex(regex) => regex
                .is_match(text)
                .then(|| regex.replacen(text, 1, NoExpand(&self.with)).into_owned()),
        }
    }

    fn describe(&self) -> &str {
        match &self.pattern {
            Pattern::Literal(from) => from.as_str(),
            Pattern::Regex(regex) => regex.as_str(),
        }
    }
}

/// Apply `replacements` in order to the file at `path` and write it back.
///
/// Patterns that do not occur are skipped. Returns how many matched.
pub fn apply_replacements(fs: &impl Fs, path: &Path, replacements: &[Replacement]) -> Result<usize> {
    let mut text = fs
        .read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut applied = 0;
    for replacement in replacements {
        match replacement.apply(&text) {
            Some(updated) => {
                trace!("{}: replaced {:?}", path.display(), replacement.describe());
                text = updated;
                applied += 1;
            }
            None => debug!("{}: pattern {:?} not found", path.display(), replacement.describe()),
        }
    }

    fs.write(path, text.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(applied)
}

/// Insert `line` so it becomes line number `at` (0-based) of the file.
///
/// Indexes past the end append.
pub fn insert_line(fs: &impl Fs, path: &Path, at: usize, line: &str) -> Result<()> {
    let text = fs
        .read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut lines: Vec<&str> = text.split('\n').collect();
    lines.insert(at.min(lines.len()), line);
    fs.write(path, lines.join("\n").as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Render one of the bundled templates.
pub fn render(template: &str, context: &tera::Context) -> Result<String> {
    Tera::one_off(template, context, false).context("Failed to render template")
}

/// Render a template straight into a file.
pub fn write_rendered(
    fs: &impl Fs,
    path: &Path,
    template: &str,
    context: &tera::Context,
) -> Result<()> {
    let text = render(template, context)?;
    fs.write(path, text.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))
}
