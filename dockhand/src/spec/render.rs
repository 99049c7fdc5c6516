//! Translation of a [`ContainerSpec`] into engine command lines.
//!
//! The option order produced by [`ContainerSpec::render_extra_options`] is
//! fixed: extra args, ports, env, volumes, labels, `--name`, `-d`,
//! `--privileged`, `--rm`, `--network`. Callers and tests compare rendered
//! command lines byte for byte, so the order must not change.

use super::ContainerSpec;
use crate::command::CommandLine;
use crate::mapping::Mapping;
use std::fmt;

/// Verb used to bring a container into existence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartVerb {
    Create,
    Start,
}

impl StartVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Start => "start",
        }
    }
}

impl fmt::Display for StartVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn mapping_args<'a, M: Mapping + 'a>(
    mappings: impl IntoIterator<Item = &'a M>,
) -> impl Iterator<Item = String> {
    mappings.into_iter().flat_map(|m| m.to_args())
}

impl ContainerSpec {
    /// Options placed between the verb and the image.
    pub fn render_extra_options(&self) -> Vec<String> {
        let mut options: Vec<String> = self.extra_args.clone();

        options.extend(mapping_args(&self.ports));
        options.extend(mapping_args(&self.env));
        options.extend(mapping_args(&self.volumes));
        options.extend(mapping_args(&self.labels));

        if let Some(name) = &self.name {
            options.push("--name".to_string());
            options.push(name.clone());
        }
        if self.daemonize {
            options.push("-d".to_string());
        }
        if self.privileged {
            options.push("--privileged".to_string());
        }
        if self.clean_up_after_exit {
            options.push("--rm".to_string());
        }
        if let Some(network) = &self.network {
            options.push("--network".to_string());
            options.push(network.clone());
        }

        options
    }

    /// `<base> <verb> <extra options> <image> [command...]`.
    pub fn render_start_command(&self, verb: StartVerb) -> CommandLine {
        self.engine_command()
            .verb(verb.as_str())
            .args(self.render_extra_options())
            .arg(&self.image)
            .args(self.command_args())
    }

    /// `<base> <verb> <identifier>`, for commands on an existing container.
    pub fn render_simple_command(&self, verb: &str, identifier: &str) -> CommandLine {
        self.engine_command().verb(verb).arg(identifier)
    }

    /// `<base> exec --interactive <identifier> <shell> -` with `script` on stdin.
    ///
    /// Displays as `echo "<script>" | <base> exec --interactive <identifier> <shell> -`.
    pub fn render_exec_command(&self, identifier: &str, script: &str) -> CommandLine {
        self.engine_command()
            .verb("exec")
            .args(["--interactive", identifier, self.shell.as_str(), "-"])
            .stdin(script)
    }

    /// `<base> cp <source> <destination>`.
    pub fn render_copy_command(&self, source: &str, destination: &str) -> CommandLine {
        self.engine_command().verb("cp").args([source, destination])
    }

    /// The optional command split into argv tokens.
    ///
    /// `validate` guarantees the command splits; an unbuilt spec that does not
    /// falls back to a single token.
    fn command_args(&self) -> Vec<String> {
        match &self.command {
            Some(command) => {
                shell_words::split(command).unwrap_or_else(|_| vec![command.clone()])
            }
            None => Vec::new(),
        }
    }
}
