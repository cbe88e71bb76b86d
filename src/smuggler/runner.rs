// raventool/src/smuggler/runner.rs
use std::path::Path;
use std::process::Command;

use crate::errors::{AppError, Result};

/// Outcome of one smuggler invocation. Exit code 0 is the sole success signal.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub exit_code: i32,
    pub output: String,
}

impl ProcessResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Seam for launching the external dump/restore executable, so the
/// orchestrators can be exercised against a stub.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessResult>;
}

/// Spawns the real process and blocks until it exits, capturing combined output.
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| AppError::CommandStart {
                program: program.display().to_string(),
                source: e,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ProcessResult {
            // None means the child was killed by a signal
            exit_code: output.status.code().unwrap_or(-1),
            output: combined,
        })
    }
}
