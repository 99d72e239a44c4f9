//! Fake process runner for testing.
//!
//! Records every call and, for commands matching a registered fragment,
//! materializes the files that command would have produced inside a
//! [`FakeFs`]. Fragments registered with `fail_on()` make the call fail with a
//! non-zero exit.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use super::{FakeFs, Fs, RunError, Runner};

struct Effect {
    fragment: String,
    /// Path relative to the call's working directory.
    path: PathBuf,
    content: String,
}

/// Mock runner — never spawns anything.
pub struct FakeRunner<'a> {
    fs: &'a FakeFs,
    effects: Vec<Effect>,
    failures: Vec<String>,
    calls: RefCell<Vec<(PathBuf, String)>>,
}

impl<'a> FakeRunner<'a> {
    pub fn new(fs: &'a FakeFs) -> Self {
        Self {
            fs,
            effects: Vec::new(),
            failures: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// When a command containing `fragment` runs, create `path` (relative to
    /// its working directory) with `content`.
    pub fn produces(mut self, fragment: &str, path: impl Into<PathBuf>, content: &str) -> Self {
        self.effects.push(Effect {
            fragment: fragment.to_string(),
            path: path.into(),
            content: content.to_string(),
        });
        self
    }

    /// Make any command containing `fragment` exit with status 1.
    pub fn fail_on(mut self, fragment: &str) -> Self {
        self.failures.push(fragment.to_string());
        self
    }

    /// `(working_dir, command_line)` for every call, in order.
    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.borrow().clone()
    }

    /// Just the command lines, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(_, c)| c.clone()).collect()
    }
}

impl Runner for FakeRunner<'_> {
    fn run(&self, working_dir: &Path, command_line: &str) -> Result<String, RunError> {
        self.calls
            .borrow_mut()
            .push((working_dir.to_path_buf(), command_line.to_string()));

        if !self.fs.is_dir(working_dir) {
            return Err(RunError::Spawn {
                command: command_line.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
            });
        }

        if self.failures.iter().any(|f| command_line.contains(f)) {
            return Err(RunError::Exit {
                command: command_line.to_string(),
                code: 1,
                stderr: "FakeRunner: simulated failure".to_string(),
            });
        }

        for effect in self
            .effects
            .iter()
            .filter(|e| command_line.contains(&e.fragment))
        {
            self.fs
                .add_file(working_dir.join(&effect.path), effect.content.as_str());
        }

        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let fs = FakeFs::new("/home/test");
        fs.add_dir("/work");
        let runner = FakeRunner::new(&fs);
        runner.run(Path::new("/work"), "npm init -y").unwrap();
        runner.run(Path::new("/work"), "npm install").unwrap();
        assert_eq!(runner.commands(), vec!["npm init -y", "npm install"]);
    }

    #[test]
    fn test_produces_files_relative_to_working_dir() {
        let fs = FakeFs::new("/home/test");
        fs.add_dir("/work");
        let runner = FakeRunner::new(&fs).produces("npm init", "package.json", "{}");
        runner.run(Path::new("/work"), "npm init -y").unwrap();
        assert_eq!(
            fs.read_to_string(Path::new("/work/package.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_fail_on_fragment() {
        let fs = FakeFs::new("/home/test");
        fs.add_dir("/work");
        let runner = FakeRunner::new(&fs).fail_on("install");
        assert!(matches!(
            runner.run(Path::new("/work"), "npm install"),
            Err(RunError::Exit { code: 1, .. })
        ));
    }

    #[test]
    fn test_missing_working_dir_fails_to_spawn() {
        let fs = FakeFs::new("/home/test");
        let runner = FakeRunner::new(&fs);
        assert!(matches!(
            runner.run(Path::new("/nowhere"), "npm init -y"),
            Err(RunError::Spawn { .. })
        ));
    }
}
