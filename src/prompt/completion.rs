//! Filesystem path completion for line prompts.
//!
//! Splits the typed line into a directory part and a partial name. When the
//! partial name is itself an existing directory, completion descends into it.
//! Directory candidates carry a trailing `/`.

use dialoguer::Completion;

use crate::paths::expand_tilde;
use crate::platform::{DirEntry, Fs};

pub struct PathCompleter<'a, F: Fs> {
    fs: &'a F,
}

impl<'a, F: Fs> PathCompleter<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Every path that could complete `line`, sorted.
    ///
    /// Unreadable directories yield no candidates.
    pub fn candidates(&self, line: &str) -> Vec<String> {
        let (dir, base) = match line.rfind('/') {
            Some(idx) => (&line[..=idx], &line[idx + 1..]),
            None => ("", line),
        };
        let mut prefix = dir.to_string();
        let mut base = base.to_string();

        let Some(mut entries) = self.list(&prefix) else {
            return Vec::new();
        };
        if !base.is_empty()
            && entries
                .iter()
                .any(|e| e.is_dir && e.file_name() == base)
        {
            prefix = format!("{prefix}{base}/");
            base.clear();
            entries = match self.list(&prefix) {
                Some(entries) => entries,
                None => return Vec::new(),
            };
        }

        entries
            .iter()
            .filter_map(|entry| {
                let name = entry.file_name();
                if !name.starts_with(&base) {
                    return None;
                }
                let slash = if entry.is_dir { "/" } else { "" };
                Some(format!("{prefix}{name}{slash}"))
            })
            .collect()
    }

    /// Entries of the directory `prefix` names. A leading `~` is expanded for
    /// the lookup only; candidates keep what the user typed.
    fn list(&self, prefix: &str) -> Option<Vec<DirEntry>> {
        let dir = if prefix.is_empty() { "." } else { prefix };
        self.fs.read_dir(&expand_tilde(dir, self.fs)).ok()
    }
}

impl<F: Fs> Completion for PathCompleter<'_, F> {
    /// Offer the longest prefix shared by all candidates, if it extends the input.
    fn get(&self, input: &str) -> Option<String> {
        let candidates = self.candidates(input);
        let first = candidates.first()?;
        let common = candidates.iter().skip(1).fold(first.clone(), |acc, candidate| {
            acc.chars()
                .zip(candidate.chars())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect()
        });
        (common.len() > input.len()).then_some(common)
    }
}
