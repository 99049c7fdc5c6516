use crate::cli::GlobalFlags;
use anyhow::Context;
use clap::Args;
use dockhand::ContainerSpec;
use std::path::{Path, PathBuf};

/// Container description shared by `render`, `run` and `create`.
#[derive(Args, Debug, Clone)]
pub struct SpecArgs {
    /// Image to use (overrides the spec file)
    pub image: Option<String>,

    /// Command to run after the image
    #[arg(trailing_var_arg = true)]
    pub command: Vec<String>,

    /// Load a YAML or JSON spec as the base; flags are applied on top
    #[arg(long)]
    pub spec: Option<PathBuf>,

    /// Container name
    #[arg(long)]
    pub name: Option<String>,

    /// Publish a port (HOST:CONTAINER)
    #[arg(short = 'p', long = "publish", value_parser = parse_port)]
    pub ports: Vec<(String, u16)>,

    /// Set an environment variable (KEY=VALUE)
    #[arg(short = 'e', long = "env", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,

    /// Bind mount a volume (HOST:CONTAINER)
    #[arg(short = 'v', long = "volume", value_parser = parse_volume)]
    pub volumes: Vec<(String, String)>,

    /// Set a label (KEY=VALUE)
    #[arg(short = 'l', long = "label", value_parser = parse_key_value)]
    pub labels: Vec<(String, String)>,

    /// Give the container extended privileges
    #[arg(long)]
    pub privileged: bool,

    /// Network to connect the container to
    #[arg(long)]
    pub network: Option<String>,

    /// Keep the container after it exits
    #[arg(long)]
    pub no_rm: bool,

    /// Do not detach (omit `-d`)
    #[arg(long)]
    pub foreground: bool,

    /// Shell used for exec scripts
    #[arg(long)]
    pub shell: Option<String>,
}

impl SpecArgs {
    /// Build the spec: spec file (if any), then flags, then global engine flags.
    pub fn to_spec(&self, global: &GlobalFlags) -> anyhow::Result<ContainerSpec> {
        let base = match &self.spec {
            Some(path) => Some(load_spec_file(path)?),
            None => None,
        };
        let engine = base
            .as_ref()
            .map(|spec| spec.engine().clone())
            .unwrap_or_default();

        let mut builder = match &base {
            Some(spec) => spec.to_builder(),
            None => ContainerSpec::builder(""),
        };

        if let Some(image) = &self.image {
            builder.image(image);
        }
        if !self.command.is_empty() {
            builder.command(shell_words::join(&self.command));
        }
        if let Some(name) = &self.name {
            builder.name(name);
        }
        for (host, container) in &self.ports {
            builder.map_port(host, *container);
        }
        builder.envs(self.env.iter().cloned());
        for (host, container) in &self.volumes {
            builder.volume(host, container);
        }
        for (name, value) in &self.labels {
            builder.label(name, value);
        }
        if self.privileged {
            builder.privileged(true);
        }
        if let Some(network) = &self.network {
            builder.network(network);
        }
        if self.no_rm {
            builder.do_not_clean_up_after_exit();
        }
        if self.foreground {
            builder.do_not_daemonize();
        }
        if let Some(shell) = &self.shell {
            builder.shell(shell);
        }
        builder.engine(global.engine_options(engine));

        builder.build().context("failed to build container spec")
    }
}

fn load_spec_file(path: &Path) -> anyhow::Result<ContainerSpec> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let spec: ContainerSpec = if is_json {
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {} as JSON", path.display()))?
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse {} as YAML", path.display()))?
    };

    tracing::debug!(path = %path.display(), image = spec.image(), "Loaded spec file");
    Ok(spec)
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))
}

fn parse_port(s: &str) -> Result<(String, u16), String> {
    let (host, container) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected HOST:CONTAINER, got `{}`", s))?;
    let container = container
        .parse::<u16>()
        .map_err(|e| format!("invalid container port `{}`: {}", container, e))?;
    Ok((host.to_string(), container))
}

fn parse_volume(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(h, c)| (h.to_string(), c.to_string()))
        .ok_or_else(|| format!("expected HOST:CONTAINER, got `{}`", s))
}
