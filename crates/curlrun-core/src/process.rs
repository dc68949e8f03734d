//! Runs a curl command as a blocking subprocess.

use std::io;
use std::process::Command;

use crate::command::CurlCommand;

/// Captured result of one process run. A non-zero exit is not an error here;
/// the output parser deals with a missing or garbled status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Executes curl commands. Implemented by [`ProcessRunner`]; tests script it.
pub trait Runner {
    fn run(&self, command: &CurlCommand) -> io::Result<ProcessOutput>;
}

/// Spawns the command's program and waits for it to exit. No timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, command: &CurlCommand) -> io::Result<ProcessOutput> {
        if command.program().is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
        }
        tracing::debug!("running {:?}", command.redacted_argv());

        let output = Command::new(command.program())
            .args(command.args())
            .output()?;

        let result = ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };

        if !result.success() {
            tracing::warn!(
                "{} exited with {:?}: {}",
                command.program(),
                result.exit_code,
                result.stderr.trim()
            );
        }
        Ok(result)
    }
}
