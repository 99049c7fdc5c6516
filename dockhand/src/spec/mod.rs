//! ContainerSpec - declarative description of a container
//!
//! Organized into focused submodules:
//! - `builder`: fluent construction and validation
//! - `render`: deterministic translation into engine command lines
//!
//! Lifecycle entry points (`pull_image`, `create`, `start`) live here; each
//! renders one command, runs it once, and maps a nonzero exit to the error
//! kind of that action.

mod builder;
mod render;

pub use builder::ContainerSpecBuilder;
pub use render::StartVerb;

use crate::command::EngineCommand;
use crate::container::{ContainerHandle, ContainerId};
use crate::errors::{DockhandError, DockhandResult};
use crate::mapping::{EnvMapping, LabelMapping, PortMapping, VolumeMapping};
use crate::process::{ProcessExecutor, ProcessOutput, SystemExecutor};
use crate::runtime::EngineOptions;
use crate::runtime::constants::container as const_container;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Everything needed to create a container.
///
/// A spec is immutable once built. Every [`ContainerHandle`] keeps its own
/// snapshot of the spec it was created from, so deriving a new spec with
/// [`ContainerSpec::to_builder`] never affects existing handles.
///
/// # Example
///
/// ```
/// use dockhand::{ContainerSpec, EngineOptions, StartVerb};
///
/// let spec = ContainerSpec::builder("nginx")
///     .name("web")
///     .map_port(8080, 80)
///     .engine(EngineOptions::new("docker"))
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     spec.render_start_command(StartVerb::Start).to_string(),
///     "docker start -p 8080:80 --name web -d --rm nginx"
/// );
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ContainerSpec {
    #[serde(default)]
    pub(crate) image: String,

    #[serde(default)]
    pub(crate) name: Option<String>,

    /// Run detached (`-d`).
    #[serde(default = "default_true")]
    pub(crate) daemonize: bool,

    #[serde(default)]
    pub(crate) privileged: bool,

    /// Shell that reads exec scripts from stdin.
    #[serde(default = "default_shell")]
    pub(crate) shell: String,

    #[serde(default)]
    pub(crate) network: Option<String>,

    #[serde(default)]
    pub(crate) ports: Vec<PortMapping>,

    #[serde(default)]
    pub(crate) env: Vec<EnvMapping>,

    #[serde(default)]
    pub(crate) volumes: Vec<VolumeMapping>,

    #[serde(default)]
    pub(crate) labels: Vec<LabelMapping>,

    /// Remove the container when it exits (`--rm`).
    #[serde(default = "default_true")]
    pub(crate) clean_up_after_exit: bool,

    /// Stop the container when its handle is closed.
    #[serde(default)]
    pub(crate) stop_on_release: bool,

    /// Appended after the image, split like a shell would.
    #[serde(default)]
    pub(crate) command: Option<String>,

    /// Raw tokens placed before every other option.
    #[serde(default)]
    pub(crate) extra_args: Vec<String>,

    #[serde(default)]
    pub(crate) engine: EngineOptions,

    #[serde(skip, default = "default_executor")]
    pub(crate) executor: Arc<dyn ProcessExecutor>,
}

fn default_true() -> bool {
    true
}

fn default_shell() -> String {
    const_container::DEFAULT_SHELL.to_string()
}

fn default_executor() -> Arc<dyn ProcessExecutor> {
    Arc::new(SystemExecutor::new())
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self {
            image: String::new(),
            name: None,
            daemonize: default_true(),
            privileged: false,
            shell: default_shell(),
            network: None,
            ports: Vec::new(),
            env: Vec::new(),
            volumes: Vec::new(),
            labels: Vec::new(),
            clean_up_after_exit: default_true(),
            stop_on_release: false,
            command: None,
            extra_args: Vec::new(),
            engine: EngineOptions::default(),
            executor: default_executor(),
        }
    }
}

impl fmt::Debug for ContainerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSpec")
            .field("image", &self.image)
            .field("name", &self.name)
            .field("daemonize", &self.daemonize)
            .field("privileged", &self.privileged)
            .field("shell", &self.shell)
            .field("network", &self.network)
            .field("ports", &self.ports)
            .field("env", &self.env)
            .field("volumes", &self.volumes)
            .field("labels", &self.labels)
            .field("clean_up_after_exit", &self.clean_up_after_exit)
            .field("stop_on_release", &self.stop_on_release)
            .field("command", &self.command)
            .field("extra_args", &self.extra_args)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl ContainerSpec {
    /// Start building a spec for `image`.
    pub fn builder(image: impl Into<String>) -> ContainerSpecBuilder {
        ContainerSpecBuilder::new(image)
    }

    /// Builder seeded with this spec's values.
    pub fn to_builder(&self) -> ContainerSpecBuilder {
        ContainerSpecBuilder::from_spec(self.clone())
    }

    /// Check the invariants a built spec guarantees.
    ///
    /// Specs obtained through deserialization should be validated before use.
    pub fn validate(&self) -> DockhandResult<()> {
        if self.image.trim().is_empty() {
            return Err(DockhandError::InvalidSpec(
                "image must not be empty".to_string(),
            ));
        }
        self.engine.validate()?;
        if let Some(port) = self.ports.iter().find(|p| p.container == 0) {
            return Err(DockhandError::InvalidSpec(format!(
                "container port must be greater than zero (host side {})",
                port.host
            )));
        }
        if self.env.iter().any(|e| e.name.is_empty()) {
            return Err(DockhandError::InvalidSpec(
                "environment variable name must not be empty".to_string(),
            ));
        }
        if let Some(command) = &self.command {
            shell_words::split(command).map_err(|e| {
                DockhandError::InvalidSpec(format!("command `{}`: {}", command, e))
            })?;
        }
        Ok(())
    }

    /// Replace the executor, e.g. after deserializing a spec.
    pub fn with_executor(mut self, executor: Arc<dyn ProcessExecutor>) -> Self {
        self.executor = executor;
        self
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn daemonize(&self) -> bool {
        self.daemonize
    }

    pub fn privileged(&self) -> bool {
        self.privileged
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    pub fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }

    pub fn ports(&self) -> &[PortMapping] {
        &self.ports
    }

    pub fn env(&self) -> &[EnvMapping] {
        &self.env
    }

    pub fn volumes(&self) -> &[VolumeMapping] {
        &self.volumes
    }

    pub fn labels(&self) -> &[LabelMapping] {
        &self.labels
    }

    pub fn clean_up_after_exit(&self) -> bool {
        self.clean_up_after_exit
    }

    pub fn stop_on_release(&self) -> bool {
        self.stop_on_release
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    /// Engine settings, as given to [`ContainerSpecBuilder::engine`].
    pub fn engine(&self) -> &EngineOptions {
        &self.engine
    }

    /// Command prefix built from [`engine`](Self::engine).
    pub fn engine_command(&self) -> EngineCommand {
        EngineCommand::new(self.engine.clone())
    }

    pub(crate) fn executor(&self) -> &Arc<dyn ProcessExecutor> {
        &self.executor
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Pull the image (`<engine> pull <image>`).
    pub async fn pull_image(&self) -> DockhandResult<()> {
        let command = self.engine_command().verb("pull").arg(&self.image);
        let output = self.executor.run(&command).await?;

        if !output.success() {
            return Err(DockhandError::Pull {
                image: self.image.clone(),
                stderr: output.stderr,
            });
        }

        tracing::info!(image = %self.image, "Pulled image");
        Ok(())
    }

    /// Create the container without starting it.
    pub async fn create(&self) -> DockhandResult<ContainerHandle> {
        let command = self.render_start_command(StartVerb::Create);
        let output = self.executor.run(&command).await?;

        if !output.success() {
            return Err(DockhandError::Create {
                image: self.image.clone(),
                stderr: output.stderr,
            });
        }

        self.handle_from_output(output)
    }

    /// Start the container.
    pub async fn start(&self) -> DockhandResult<ContainerHandle> {
        let command = self.render_start_command(StartVerb::Start);
        let output = self.executor.run(&command).await?;

        if !output.success() {
            return Err(DockhandError::Start {
                image: self.image.clone(),
                stderr: output.stderr,
            });
        }

        self.handle_from_output(output)
    }

    /// Wrap the identifier the engine printed on stdout.
    fn handle_from_output(&self, output: ProcessOutput) -> DockhandResult<ContainerHandle> {
        let identifier = output.stdout.trim();
        if identifier.is_empty() {
            return Err(DockhandError::Engine(format!(
                "engine reported success for image `{}` but printed no container identifier",
                self.image
            )));
        }

        let id = ContainerId::new(identifier);
        tracing::info!(
            container_id = %id.short(),
            image = %self.image,
            name = self.name.as_deref().unwrap_or(""),
            "Container created"
        );

        Ok(ContainerHandle::new(Arc::new(self.clone()), id))
    }
}

// Specs are shared across tasks through handles.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<ContainerSpec>;
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = ContainerSpec::builder("alpine").build().unwrap();

        assert!(spec.daemonize());
        assert!(!spec.privileged());
        assert!(spec.clean_up_after_exit());
        assert!(!spec.stop_on_release());
        assert_eq!(spec.shell(), "bash");
        assert_eq!(spec.name(), None);
        assert_eq!(spec.network(), None);
    }

    #[test]
    fn test_validate_rejects_empty_image() {
        let err = ContainerSpec::default().validate().unwrap_err();
        assert!(matches!(err, DockhandError::InvalidSpec(_)));
    }

    #[test]
    fn test_validate_rejects_zero_container_port() {
        let spec = ContainerSpec {
            image: "nginx".into(),
            ports: vec![PortMapping::new(8080, 0)],
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_env_name() {
        let spec = ContainerSpec {
            image: "nginx".into(),
            env: vec![EnvMapping::new("", "value")],
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbalanced_command() {
        let spec = ContainerSpec {
            image: "alpine".into(),
            command: Some("sh -c 'echo".into()),
            ..Default::default()
        };
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("command"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let spec: ContainerSpec = serde_json::from_str(
            r#"{
                "image": "redis:7",
                "name": "cache",
                "ports": [{"host": "6379", "container": 6379}],
                "env": [{"name": "REDIS_ARGS", "value": "--save 60 1"}]
            }"#,
        )
        .unwrap();

        spec.validate().unwrap();
        assert_eq!(spec.image(), "redis:7");
        assert_eq!(spec.name(), Some("cache"));
        assert!(spec.daemonize());
        assert!(spec.clean_up_after_exit());
        assert_eq!(spec.shell(), "bash");
        assert_eq!(spec.ports(), [PortMapping::new(6379, 6379)]);
    }
}
