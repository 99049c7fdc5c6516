//! External process execution.
//!
//! Every engine interaction goes through a [`ProcessExecutor`]. The crate ships
//! [`SystemExecutor`], which spawns real subprocesses; tests substitute a
//! scripted executor.

mod system;

pub use system::SystemExecutor;

use crate::command::CommandLine;
use crate::errors::DockhandResult;
use async_trait::async_trait;
use std::time::Duration;

/// Runs engine command lines.
///
/// Implementations must attempt each command exactly once. A nonzero exit
/// code is reported through [`ProcessOutput`], not as an error; errors are
/// reserved for spawn/IO failures and for [`run_streaming`] timeouts.
///
/// [`run_streaming`]: ProcessExecutor::run_streaming
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    /// Run to completion and capture stdout/stderr.
    async fn run(&self, command: &CommandLine) -> DockhandResult<ProcessOutput>;

    /// Run to completion, forwarding each output line to `on_output` as it
    /// arrives. If `timeout` elapses first, the process is killed and
    /// [`DockhandError::Timeout`](crate::DockhandError::Timeout) is returned.
    async fn run_streaming(
        &self,
        command: &CommandLine,
        on_output: &mut (dyn FnMut(OutputChunk) + Send),
        timeout: Duration,
    ) -> DockhandResult<ProcessOutput>;
}

/// Exit status and captured output of a finished process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code (0 = success). `-1` if the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the exit code was 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn code(&self) -> i32 {
        self.exit_code
    }
}

impl From<std::process::Output> for ProcessOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Which pipe a streamed line came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// One line of streamed process output, without its trailing newline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputChunk {
    pub stream: OutputStream,
    pub line: String,
}

impl OutputChunk {
    pub fn stdout(line: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stdout,
            line: line.into(),
        }
    }

    pub fn stderr(line: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stderr,
            line: line.into(),
        }
    }
}
