//! Invariant engine command prefix.

use super::CommandLine;
use crate::runtime::EngineOptions;
use crate::runtime::constants::engine as const_engine;

/// Produces the prefix every engine invocation starts with: the engine
/// binary, then `-H <remote_host>` when a remote host is configured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineCommand {
    options: EngineOptions,
}

impl EngineCommand {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// `["<binary>"]`, plus `["-H", host]` if the remote host is non-empty.
    pub fn base_command(&self) -> CommandLine {
        let cmd = CommandLine::new(&self.options.binary);
        match self.options.remote_host() {
            Some(host) => cmd.args([const_engine::HOST_FLAG, host]),
            None => cmd,
        }
    }

    /// Base command followed by `verb`.
    pub fn verb(&self, verb: &str) -> CommandLine {
        self.base_command().arg(verb)
    }
}

impl From<EngineOptions> for EngineCommand {
    fn from(options: EngineOptions) -> Self {
        Self::new(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_command_local() {
        let engine = EngineCommand::new(EngineOptions::new("docker"));
        assert_eq!(engine.base_command().to_string(), "docker");
        assert!(engine.base_command().arguments().is_empty());
    }

    #[test]
    fn test_base_command_remote_host() {
        let engine =
            EngineCommand::new(EngineOptions::new("docker").with_remote_host("tcp://1.2.3.4:2375"));
        let base = engine.base_command();

        let tokens: Vec<&str> = base.tokens().collect();
        assert_eq!(tokens, ["docker", "-H", "tcp://1.2.3.4:2375"]);
        assert_eq!(base.arguments().iter().filter(|a| *a == "-H").count(), 1);
    }

    #[test]
    fn test_verb_follows_host_flag() {
        let engine = EngineCommand::new(EngineOptions::new("podman").with_remote_host("h"));
        assert_eq!(engine.verb("pull").to_string(), "podman -H h pull");
    }
}
