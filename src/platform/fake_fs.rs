//! In-memory filesystem fake for testing.
//!
//! Stores files and directories in a `HashMap` with interior mutability via
//! `RefCell`. Writes and directory creation require the parent directory to
//! exist, matching what the real filesystem would do.
//!
//! Non-trait setup methods (`add_file`, `add_dir`) auto-create parent
//! directories for convenience in test setup.

use anyhow::{Result, bail};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{DirEntry, Fs};

/// A single entry in the fake filesystem.
#[derive(Clone, Debug)]
pub(crate) enum FakeEntry {
    File { content: Vec<u8> },
    Dir,
}

/// In-memory filesystem for testing — no real I/O.
///
/// Uses `RefCell` for interior mutability so trait methods taking `&self`
/// can still mutate the internal state.
pub struct FakeFs {
    entries: RefCell<HashMap<PathBuf, FakeEntry>>,
    home: PathBuf,
    config_dir: PathBuf,
    fail_writes: RefCell<bool>,
}

impl FakeFs {
    /// Create a new fake filesystem with the given home directory.
    ///
    /// Automatically creates the home directory and `~/.config`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let config_dir = home.join(".config");
        let fs = Self {
            entries: RefCell::new(HashMap::new()),
            home: home.clone(),
            config_dir: config_dir.clone(),
            fail_writes: RefCell::new(false),
        };
        fs.add_dir(config_dir);
        fs
    }

    /// Toggle write failures. When enabled, all `Fs::write` calls bail.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }

    // -- Setup helpers (not part of the Fs trait) --

    /// Add a file with content. Auto-creates parent directories.
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        let path = path.into();
        self.ensure_parents(&path);
        self.entries.borrow_mut().insert(
            path,
            FakeEntry::File {
                content: content.into(),
            },
        );
    }

    /// Add a directory entry. Auto-creates parent directories.
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.ensure_parents(&path);
        self.entries
            .borrow_mut()
            .entry(path)
            .or_insert(FakeEntry::Dir);
    }

    /// Content of a file as a string, or `None` if it does not exist.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.entries.borrow().get(path.as_ref()) {
            Some(FakeEntry::File { content }) => Some(String::from_utf8_lossy(content).into_owned()),
            _ => None,
        }
    }

    /// Ensure all parent directories of `path` exist.
    fn ensure_parents(&self, path: &Path) {
        let mut entries = self.entries.borrow_mut();
        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                entries.entry(current.clone()).or_insert(FakeEntry::Dir);
            }
        }
    }

    fn parent_is_dir(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.is_dir(parent),
            _ => true,
        }
    }
}

impl Fs for FakeFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let entries = self.entries.borrow();
        match entries.get(path) {
            Some(FakeEntry::File { content }) => Ok(String::from_utf8(content.clone())?),
            Some(_) => bail!("not a file: {}", path.display()),
            None => bail!("file not found: {}", path.display()),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if *self.fail_writes.borrow() {
            bail!("simulated write failure: {}", path.display());
        }
        if !self.parent_is_dir(path) {
            bail!("parent directory missing: {}", path.display());
        }
        if self.is_dir(path) {
            bail!("is a directory: {}", path.display());
        }
        self.entries.borrow_mut().insert(
            path.to_path_buf(),
            FakeEntry::File {
                content: contents.to_vec(),
            },
        );
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        match entries.get(path) {
            Some(FakeEntry::File { .. }) => {
                entries.remove(path);
                Ok(())
            }
            Some(FakeEntry::Dir) => bail!("is a directory: {}", path.display()),
            None => bail!("file not found: {}", path.display()),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        match entries.get(path) {
            Some(FakeEntry::Dir) => {}
            _ => bail!("not a directory: {}", path.display()),
        }
        entries.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        if self.exists(path) {
            bail!("already exists: {}", path.display());
        }
        if !self.parent_is_dir(path) {
            bail!("parent directory missing: {}", path.display());
        }
        self.entries
            .borrow_mut()
            .insert(path.to_path_buf(), FakeEntry::Dir);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.entries.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entries.borrow().get(path), Some(FakeEntry::Dir))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        if !self.is_dir(path) {
            bail!("not a directory: {}", path.display());
        }
        let entries = self.entries.borrow();
        let mut results: Vec<DirEntry> = entries
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, entry)| DirEntry {
                path: p.clone(),
                is_dir: matches!(entry, FakeEntry::Dir),
            })
            .collect();
        results.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(results)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        Some(self.home.clone())
    }

    fn config_dir(&self) -> Option<PathBuf> {
        Some(self.config_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_roundtrip() {
        let fs = FakeFs::new("/home/test");
        fs.add_file("/tmp/hello.txt", "hello world");
        assert_eq!(
            fs.read_to_string(Path::new("/tmp/hello.txt")).unwrap(),
            "hello world"
        );
        assert!(fs.exists(Path::new("/tmp/hello.txt")));
        assert!(!fs.is_dir(Path::new("/tmp/hello.txt")));
    }

    #[test]
    fn test_write_requires_parent() {
        let fs = FakeFs::new("/home/test");
        assert!(fs.write(Path::new("/nowhere/out.txt"), b"x").is_err());
        fs.add_dir("/tmp");
        fs.write(Path::new("/tmp/out.txt"), b"written").unwrap();
        assert_eq!(fs.contents("/tmp/out.txt").as_deref(), Some("written"));
    }

    #[test]
    fn test_fail_writes() {
        let fs = FakeFs::new("/home/test");
        fs.add_dir("/tmp");
        fs.set_fail_writes(true);
        assert!(fs.write(Path::new("/tmp/out.txt"), b"x").is_err());
    }

    #[test]
    fn test_create_dir_fails_when_present() {
        let fs = FakeFs::new("/home/test");
        fs.add_dir("/work/app");
        assert!(fs.create_dir(Path::new("/work/app")).is_err());
        fs.create_dir(Path::new("/work/other")).unwrap();
        assert!(fs.is_dir(Path::new("/work/other")));
    }

    #[test]
    fn test_create_dir_requires_parent() {
        let fs = FakeFs::new("/home/test");
        assert!(fs.create_dir(Path::new("/missing/app")).is_err());
    }

    #[test]
    fn test_remove_file() {
        let fs = FakeFs::new("/home/test");
        fs.add_file("/tmp/gone.txt", "bye");
        fs.remove_file(Path::new("/tmp/gone.txt")).unwrap();
        assert!(!fs.exists(Path::new("/tmp/gone.txt")));
        assert!(fs.remove_file(Path::new("/tmp/gone.txt")).is_err());
    }

    #[test]
    fn test_remove_dir_all() {
        let fs = FakeFs::new("/home/test");
        fs.add_file("/work/app/src/main.js", "x");
        fs.add_file("/work/keep.txt", "y");

        fs.remove_dir_all(Path::new("/work/app")).unwrap();
        assert!(!fs.exists(Path::new("/work/app")));
        assert!(!fs.exists(Path::new("/work/app/src/main.js")));
        assert!(fs.exists(Path::new("/work/keep.txt")));
    }

    #[test]
    fn test_read_dir_lists_children_only() {
        let fs = FakeFs::new("/home/test");
        fs.add_file("/root/a.txt", "a");
        fs.add_file("/root/sub/b.txt", "b");

        let entries = fs.read_dir(Path::new("/root")).unwrap();
        let names: Vec<String> = entries.iter().map(DirEntry::file_name).collect();
        assert_eq!(names, vec!["a.txt", "sub"]);
        assert!(entries[1].is_dir);
    }

    #[test]
    fn test_home_and_config_dir() {
        let fs = FakeFs::new("/home/test");
        assert_eq!(fs.home_dir(), Some(PathBuf::from("/home/test")));
        assert_eq!(fs.config_dir(), Some(PathBuf::from("/home/test/.config")));
    }

    #[test]
    fn test_auto_creates_parents() {
        let fs = FakeFs::new("/home/test");
        fs.add_file("/a/b/c/d.txt", "deep");
        assert!(fs.is_dir(Path::new("/a")));
        assert!(fs.is_dir(Path::new("/a/b/c")));
    }
}
