//! Error types for dockhand.
//!
//! Errors are keyed to the lifecycle action whose engine process failed:
//! - [`DockhandError::Pull`], [`DockhandError::Create`], [`DockhandError::Start`]:
//!   container spec operations, carrying the image and captured stderr
//! - [`DockhandError::Login`]: registry login
//! - [`DockhandError::CopyFailed`]: `cp` in either direction
//! - [`DockhandError::Inspect`], [`DockhandError::Timeout`]: handle operations
//!
//! Handle operations that return a raw [`ProcessOutput`](crate::ProcessOutput)
//! (`stop`, `start`, `delete`, `execute`) never produce an error for a
//! nonzero exit code; they only fail when the process cannot be spawned.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result alias used across the crate.
pub type DockhandResult<T> = Result<T, DockhandError>;

#[derive(Debug, Error)]
pub enum DockhandError {
    /// `pull` exited nonzero.
    #[error("Could not pull Docker image `{image}`. Process output: `{stderr}`")]
    Pull { image: String, stderr: String },

    /// `create` exited nonzero.
    #[error("Could not create Docker container `{image}`. Process output: `{stderr}`")]
    Create { image: String, stderr: String },

    /// `start` exited nonzero.
    #[error("Could not start Docker container `{image}`. Process output: `{stderr}`")]
    Start { image: String, stderr: String },

    /// `login` exited nonzero.
    #[error("Could not log in to Docker registry. Process output: `{stderr}`")]
    Login { stderr: String },

    /// `cp` exited nonzero.
    #[error("The command \"{command}\" failed with exit code {exit_code}: {stderr}")]
    CopyFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// `inspect` exited nonzero.
    #[error("Could not inspect container {identifier} (exit code {exit_code}): {stderr}")]
    Inspect {
        identifier: String,
        exit_code: i32,
        stderr: String,
    },

    /// A streaming process exceeded its deadline and was killed.
    #[error("The command \"{command}\" exceeded the timeout of {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// The container spec failed validation.
    #[error("invalid container spec: {0}")]
    InvalidSpec(String),

    /// The engine answered with something we cannot use.
    #[error("engine: {0}")]
    Engine(String),

    /// A caller-supplied argument cannot be used.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration.
    #[error("config: {0}")]
    Config(String),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl DockhandError {
    /// Stderr captured from the failing engine process, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Pull { stderr, .. }
            | Self::Create { stderr, .. }
            | Self::Start { stderr, .. }
            | Self::Login { stderr }
            | Self::CopyFailed { stderr, .. }
            | Self::Inspect { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
