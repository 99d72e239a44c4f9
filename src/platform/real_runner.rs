//! Real process runner that shells out through the platform shell.

use std::path::Path;
use std::process::Command;
use tracing::{debug, trace};

use super::{RunError, Runner};

/// Real runner — spawns `sh -c` (or `cmd /C` on Windows) and waits for exit.
pub struct RealRunner;

impl Runner for RealRunner {
    fn run(&self, working_dir: &Path, command_line: &str) -> Result<String, RunError> {
        debug!("Running `{command_line}` in {}", working_dir.display());

        let output = shell(command_line)
            .current_dir(working_dir)
            .output()
            .map_err(|source| RunError::Spawn {
                command: command_line.to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(RunError::Exit {
                command: command_line.to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }
        if !stderr.is_empty() {
            debug!("`{command_line}` wrote to stderr: {stderr}");
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!("`{command_line}` stdout: {stdout}");
        Ok(stdout)
    }
}

#[cfg(windows)]
fn shell(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command_line);
    cmd
}

#[cfg(not(windows))]
fn shell(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}
