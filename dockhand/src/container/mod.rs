//! ContainerHandle - a created container bound to its engine identifier
//!
//! This module is organized into focused submodules:
//! - `exec`: scripts run through the container shell
//! - `files`: copying files between host and container
//!
//! Handles are only produced by [`ContainerSpec::create`] and
//! [`ContainerSpec::start`].
//!
//! [`ContainerSpec::create`]: crate::ContainerSpec::create
//! [`ContainerSpec::start`]: crate::ContainerSpec::start

mod exec;
mod files;

pub use exec::ExecScript;

use crate::errors::{DockhandError, DockhandResult};
use crate::process::{OutputChunk, ProcessOutput};
use crate::runtime::constants::container as const_container;
use crate::spec::ContainerSpec;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Engine-assigned container identifier.
///
/// The short form (first 12 characters) is computed once and is what every
/// per-container command uses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerId {
    full: String,
    short: String,
}

impl ContainerId {
    pub(crate) fn new(full: impl Into<String>) -> Self {
        let full = full.into();
        let short = full
            .chars()
            .take(const_container::SHORT_ID_LEN)
            .collect::<String>();
        Self { full, short }
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }

    pub fn short(&self) -> &str {
        &self.short
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// ContainerHandle represents a created (and possibly running) container.
///
/// Conceptually, it plays the same role that `std::process::Child` does for
/// `std::process::Command`: the spec describes, the handle controls.
///
/// Operations come in two kinds:
/// - `stop`, `start`, `delete`, `execute` return the raw [`ProcessOutput`]
///   and never fail on a nonzero exit code; interpreting it is up to the caller
/// - file transfer and `inspect` return an error when the engine fails
///
/// **Release**: if the spec had `stop_on_release` set, call
/// [`close`](Self::close) to stop the container. Dropping the handle never
/// runs a process.
pub struct ContainerHandle {
    spec: Arc<ContainerSpec>,
    id: ContainerId,
    name: Option<String>,
    stop_on_release: bool,
    closed: bool,
}

impl ContainerHandle {
    pub(crate) fn new(spec: Arc<ContainerSpec>, id: ContainerId) -> Self {
        let name = spec.name().map(str::to_string);
        let stop_on_release = spec.stop_on_release();
        Self {
            spec,
            id,
            name,
            stop_on_release,
            closed: false,
        }
    }

    /// Full identifier as printed by the engine.
    pub fn identifier(&self) -> &str {
        self.id.as_str()
    }

    /// First 12 characters of the identifier.
    pub fn short_identifier(&self) -> &str {
        self.id.short()
    }

    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    /// Name the spec had when this container was created.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The spec this container was created from.
    pub fn spec(&self) -> &ContainerSpec {
        &self.spec
    }

    async fn run_simple(&self, verb: &str) -> DockhandResult<ProcessOutput> {
        let command = self.spec.render_simple_command(verb, self.short_identifier());
        self.spec.executor().run(&command).await
    }

    /// `<engine> stop <id>`.
    pub async fn stop(&self) -> DockhandResult<ProcessOutput> {
        self.run_simple("stop").await
    }

    /// `<engine> rm <id>`.
    pub async fn delete(&self) -> DockhandResult<ProcessOutput> {
        self.run_simple("rm").await
    }

    /// `<engine> start <id>`.
    pub async fn start(&self) -> DockhandResult<ProcessOutput> {
        self.run_simple("start").await
    }

    /// Start attached, forwarding output lines to `on_output` as they arrive.
    ///
    /// Returns once the container's process exits. If `timeout` elapses first,
    /// the engine process is killed and [`DockhandError::Timeout`] is returned.
    pub async fn start_and_stream_output<F>(
        &self,
        mut on_output: F,
        timeout: Duration,
    ) -> DockhandResult<ProcessOutput>
    where
        F: FnMut(OutputChunk) + Send,
    {
        let command = self
            .spec
            .render_simple_command("start", self.short_identifier())
            .arg("--attach");

        self.spec
            .executor()
            .run_streaming(&command, &mut on_output, timeout)
            .await
    }

    /// [`start_and_stream_output`](Self::start_and_stream_output) with the
    /// default timeout of 3000 seconds.
    pub async fn start_and_stream_output_default<F>(
        &self,
        on_output: F,
    ) -> DockhandResult<ProcessOutput>
    where
        F: FnMut(OutputChunk) + Send,
    {
        self.start_and_stream_output(on_output, const_container::DEFAULT_STREAM_TIMEOUT)
            .await
    }

    /// `<engine> inspect <id>`, parsed as JSON and returned unchanged.
    ///
    /// The engine prints an array with one object per inspected container.
    pub async fn inspect(&self) -> DockhandResult<serde_json::Value> {
        let output = self.run_simple("inspect").await?;

        if !output.success() {
            return Err(DockhandError::Inspect {
                identifier: self.short_identifier().to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        Ok(serde_json::from_str(output.stdout.trim())?)
    }

    /// Release the handle.
    ///
    /// Stops the container if the spec had `stop_on_release` set, returning
    /// the stop output; otherwise returns `Ok(None)` without running anything.
    pub async fn close(mut self) -> DockhandResult<Option<ProcessOutput>> {
        self.closed = true;
        if !self.stop_on_release {
            return Ok(None);
        }
        tracing::debug!(container_id = %self.short_identifier(), "Stopping on release");
        self.stop().await.map(Some)
    }
}

impl fmt::Debug for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("image", &self.spec.image())
            .finish_non_exhaustive()
    }
}

impl Drop for ContainerHandle {
    fn drop(&mut self) {
        if self.stop_on_release && !self.closed {
            tracing::warn!(
                container_id = %self.short_identifier(),
                "ContainerHandle dropped without close(); container was not stopped"
            );
        }
    }
}

// Independent handles are driven from separate tasks.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<ContainerHandle>;
};
