use thiserror::Error;

/// Structured failures raised around the external smuggler process. Remote
/// admin and filesystem errors travel as `anyhow::Error` with context instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to start process {program}: {source}")]
    CommandStart {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Raised after the retry policy gives up; names the command and its
    /// arguments and carries the captured output of the final attempt.
    #[error("Process {program} didn't work with arguments {args}; output: {output}")]
    CommandFailed {
        program: String,
        args: String,
        output: String,
    },
}

pub type Result<T> = std::result::Result<T, AppError>;
