// raventool/src/smuggler/retry.rs
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use super::runner::{CommandRunner, ProcessResult};
use crate::errors::{AppError, Result};

/// Runs the smuggler, retrying exactly once after `pacing` if the first
/// attempt fails (non-zero exit or spawn error). A second failure is fatal and
/// names the command and its arguments. Success at either attempt is followed
/// by one more `pacing` sleep before returning, to throttle the server.
pub async fn run_with_retry(
    runner: &dyn CommandRunner,
    program: &Path,
    args: &[String],
    pacing: Duration,
) -> Result<ProcessResult> {
    let first_failure = match attempt(runner, program, args) {
        Ok(result) => {
            tokio::time::sleep(pacing).await;
            return Ok(result);
        }
        Err(output) => output,
    };

    warn!("Smuggler failed the first time: {first_failure}");
    warn!(
        "Sleeping for {} seconds before trying again",
        pacing.as_secs()
    );
    tokio::time::sleep(pacing).await;

    info!("Trying again");
    match attempt(runner, program, args) {
        Ok(result) => {
            tokio::time::sleep(pacing).await;
            info!("Succeeded the second time");
            Ok(result)
        }
        Err(output) => Err(AppError::CommandFailed {
            program: program.display().to_string(),
            args: args.join(" "),
            output,
        }),
    }
}

fn attempt(
    runner: &dyn CommandRunner,
    program: &Path,
    args: &[String],
) -> std::result::Result<ProcessResult, String> {
    match runner.run(program, args) {
        Ok(result) if result.is_success() => Ok(result),
        Ok(result) => {
            warn!(
                exit_code = result.exit_code,
                "Smuggler exited with failure"
            );
            warn!("Smuggler process output = {}", result.output);
            Err(result.output)
        }
        Err(e) => Err(e.to_string()),
    }
}
