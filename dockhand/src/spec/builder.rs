//! Fluent construction of [`ContainerSpec`].

use super::ContainerSpec;
use crate::errors::DockhandResult;
use crate::mapping::{EnvMapping, LabelMapping, PortMapping, VolumeMapping};
use crate::process::ProcessExecutor;
use crate::runtime::EngineOptions;
use std::sync::Arc;

/// Builder for [`ContainerSpec`].
///
/// Non-consuming: every setter takes `&mut self` and returns it, so a builder
/// can be configured in a chain or step by step and built more than once.
/// Mapping setters append; their order is the order of the rendered flags.
///
/// # Example
///
/// ```
/// use dockhand::ContainerSpec;
///
/// let spec = ContainerSpec::builder("postgres:16")
///     .name("db")
///     .env("POSTGRES_PASSWORD", "secret")
///     .volume("/srv/pg", "/var/lib/postgresql/data")
///     .do_not_clean_up_after_exit()
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.name(), Some("db"));
/// assert!(!spec.clean_up_after_exit());
/// ```
#[derive(Debug, Clone)]
pub struct ContainerSpecBuilder {
    inner: ContainerSpec,
}

impl ContainerSpecBuilder {
    /// Create a builder for `image` with default settings.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            inner: ContainerSpec {
                image: image.into(),
                ..Default::default()
            },
        }
    }

    pub(crate) fn from_spec(spec: ContainerSpec) -> Self {
        Self { inner: spec }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────────────────

    pub fn image(&mut self, image: impl Into<String>) -> &mut Self {
        self.inner.image = image.into();
        self
    }

    /// Container name (`--name`). An empty name clears it.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.inner.name = (!name.is_empty()).then_some(name);
        self
    }

    /// Command appended after the image. An empty command clears it.
    pub fn command(&mut self, command: impl Into<String>) -> &mut Self {
        let command = command.into();
        self.inner.command = (!command.is_empty()).then_some(command);
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Flags
    // ─────────────────────────────────────────────────────────────────────

    pub fn daemonize(&mut self, daemonize: bool) -> &mut Self {
        self.inner.daemonize = daemonize;
        self
    }

    pub fn do_not_daemonize(&mut self) -> &mut Self {
        self.daemonize(false)
    }

    pub fn privileged(&mut self, privileged: bool) -> &mut Self {
        self.inner.privileged = privileged;
        self
    }

    pub fn clean_up_after_exit(&mut self, clean_up: bool) -> &mut Self {
        self.inner.clean_up_after_exit = clean_up;
        self
    }

    pub fn do_not_clean_up_after_exit(&mut self) -> &mut Self {
        self.clean_up_after_exit(false)
    }

    /// Stop the container when [`ContainerHandle::close`] is called.
    ///
    /// [`ContainerHandle::close`]: crate::ContainerHandle::close
    pub fn stop_on_release(&mut self, stop: bool) -> &mut Self {
        self.inner.stop_on_release = stop;
        self
    }

    /// Shell used by `execute` (default `bash`).
    pub fn shell(&mut self, shell: impl Into<String>) -> &mut Self {
        self.inner.shell = shell.into();
        self
    }

    /// Network to attach to (`--network`). An empty name clears it.
    pub fn network(&mut self, network: impl Into<String>) -> &mut Self {
        let network = network.into();
        self.inner.network = (!network.is_empty()).then_some(network);
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mappings
    // ─────────────────────────────────────────────────────────────────────

    /// Publish `container` port on `host` (a port or `ip:port`).
    pub fn map_port(&mut self, host: impl ToString, container: u16) -> &mut Self {
        self.inner.ports.push(PortMapping::new(host, container));
        self
    }

    pub fn env(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.inner.env.push(EnvMapping::new(name, value));
        self
    }

    /// Append several environment variables in iteration order.
    pub fn envs<I, K, V>(&mut self, vars: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in vars {
            self.env(name, value);
        }
        self
    }

    pub fn volume(&mut self, host: impl Into<String>, container: impl Into<String>) -> &mut Self {
        self.inner.volumes.push(VolumeMapping::new(host, container));
        self
    }

    pub fn label(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.inner.labels.push(LabelMapping::new(name, value));
        self
    }

    /// Replace the raw tokens placed before all other options.
    pub fn extra_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Engine
    // ─────────────────────────────────────────────────────────────────────

    pub fn engine(&mut self, options: EngineOptions) -> &mut Self {
        self.inner.engine = options;
        self
    }

    /// Remote engine endpoint (`-H`). An empty host clears it.
    pub fn remote_host(&mut self, host: impl Into<String>) -> &mut Self {
        let host = host.into();
        self.inner.engine.remote_host = (!host.is_empty()).then_some(host);
        self
    }

    /// Executor used for every command of this spec and its handles.
    pub fn executor(&mut self, executor: Arc<dyn ProcessExecutor>) -> &mut Self {
        self.inner.executor = executor;
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Build
    // ─────────────────────────────────────────────────────────────────────

    /// Validate and build the configured [`ContainerSpec`].
    pub fn build(&self) -> DockhandResult<ContainerSpec> {
        self.inner.validate()?;
        Ok(self.inner.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DockhandError;

    #[test]
    fn test_mappings_preserve_insertion_order() {
        let spec = ContainerSpec::builder("app")
            .env("B", "2")
            .env("A", "1")
            .envs([("C", "3"), ("D", "4")])
            .build()
            .unwrap();

        let names: Vec<&str> = spec.env().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C", "D"]);
    }

    #[test]
    fn test_step_by_step_configuration() {
        let mut builder = ContainerSpec::builder("app");
        builder.name("first");
        builder.privileged(true);
        builder.name("second");

        let spec = builder.build().unwrap();
        assert_eq!(spec.name(), Some("second"));
        assert!(spec.privileged());
    }

    #[test]
    fn test_empty_strings_clear_optional_fields() {
        let spec = ContainerSpec::builder("app")
            .name("web")
            .name("")
            .network("")
            .command("")
            .remote_host("")
            .build()
            .unwrap();

        assert_eq!(spec.name(), None);
        assert_eq!(spec.network(), None);
        assert_eq!(spec.command(), None);
        assert_eq!(spec.engine().remote_host(), None);
    }

    #[test]
    fn test_engine_getter_returns_configured_options() {
        let options = EngineOptions::new("podman").with_remote_host("tcp://10.0.0.5:2375");
        let spec = ContainerSpec::builder("app")
            .engine(options.clone())
            .build()
            .unwrap();

        assert_eq!(spec.engine(), &options);
        assert_eq!(
            spec.engine_command().base_command().to_string(),
            "podman -H tcp://10.0.0.5:2375"
        );
    }

    #[test]
    fn test_build_validates() {
        let err = ContainerSpec::builder("").build().unwrap_err();
        assert!(matches!(err, DockhandError::InvalidSpec(_)));

        let err = ContainerSpec::builder("nginx")
            .map_port(80, 0)
            .build()
            .unwrap_err();
        assert!(matches!(err, DockhandError::InvalidSpec(_)));
    }

    #[test]
    fn test_to_builder_leaves_original_untouched() {
        let original = ContainerSpec::builder("nginx").name("web").build().unwrap();
        let derived = original.to_builder().name("web-2").map_port(81, 80).build().unwrap();

        assert_eq!(original.name(), Some("web"));
        assert!(original.ports().is_empty());
        assert_eq!(derived.name(), Some("web-2"));
        assert_eq!(derived.ports().len(), 1);
    }
}
