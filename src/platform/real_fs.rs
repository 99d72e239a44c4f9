//! Real filesystem implementation delegating to `std::fs` and `dirs`.
//!
//! Methods return bare errors without added context — callers add their own
//! `.with_context()` messages for domain-specific error descriptions.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{DirEntry, Fs};

/// Real filesystem — delegates every operation to the OS.
pub struct RealFs;

impl Fs for RealFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        Ok(std::fs::write(path, contents)?)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        Ok(std::fs::remove_file(path)?)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        Ok(std::fs::remove_dir_all(path)?)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        Ok(std::fs::create_dir(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            // Follow symlinks so a linked directory still completes with a slash.
            let is_dir = path.is_dir();
            entries.push(DirEntry { path, is_dir });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        dirs::config_dir()
    }
}
