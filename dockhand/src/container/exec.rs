//! Script execution inside the container shell.

use super::ContainerHandle;
use crate::errors::DockhandResult;
use crate::process::ProcessOutput;
use crate::runtime::constants::container as const_container;
use std::path::Path;

/// Script fed to the container shell on stdin.
///
/// Built from a single string, used as is, or from a sequence of commands,
/// joined with `;`.
///
/// ```
/// use dockhand::ExecScript;
///
/// assert_eq!(ExecScript::from("ls -la").as_str(), "ls -la");
/// assert_eq!(ExecScript::from(["cd /app", "make"]).as_str(), "cd /app;make");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecScript(String);

impl ExecScript {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn joined<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let commands: Vec<S> = commands.into_iter().collect();
        let parts: Vec<&str> = commands.iter().map(AsRef::as_ref).collect();
        Self(parts.join(";"))
    }
}

impl From<&str> for ExecScript {
    fn from(script: &str) -> Self {
        Self(script.to_string())
    }
}

impl From<String> for ExecScript {
    fn from(script: String) -> Self {
        Self(script)
    }
}

impl From<&String> for ExecScript {
    fn from(script: &String) -> Self {
        Self(script.clone())
    }
}

impl<S: AsRef<str>> From<Vec<S>> for ExecScript {
    fn from(commands: Vec<S>) -> Self {
        Self::joined(commands)
    }
}

impl<S: AsRef<str>> From<&[S]> for ExecScript {
    fn from(commands: &[S]) -> Self {
        Self::joined(commands)
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for ExecScript {
    fn from(commands: [S; N]) -> Self {
        Self::joined(commands)
    }
}

impl ContainerHandle {
    /// Run `script` through the container shell.
    ///
    /// The raw output is returned whatever the exit code.
    pub async fn execute(&self, script: impl Into<ExecScript>) -> DockhandResult<ProcessOutput> {
        let script = script.into();
        let command = self
            .spec
            .render_exec_command(self.short_identifier(), script.as_str());
        self.spec.executor().run(&command).await
    }

    /// Append a public key to `authorized_keys` inside the container and fix
    /// its mode and owner.
    ///
    /// Runs three separate scripts (append, `chmod 600`, `chown root:root`).
    /// Their exit codes are not checked and a failure midway is not rolled back.
    pub async fn add_public_key(
        &self,
        public_key_path: impl AsRef<Path>,
        authorized_keys: &str,
    ) -> DockhandResult<()> {
        let contents = tokio::fs::read_to_string(public_key_path.as_ref()).await?;
        let key = contents.trim();

        self.execute(format!("echo '{}' >> {}", key, authorized_keys))
            .await?;
        self.execute(format!("chmod 600 {}", authorized_keys)).await?;
        self.execute(format!("chown root:root {}", authorized_keys))
            .await?;

        tracing::debug!(
            container_id = %self.short_identifier(),
            authorized_keys,
            "Added public key"
        );
        Ok(())
    }

    /// [`add_public_key`](Self::add_public_key) targeting
    /// `/root/.ssh/authorized_keys`.
    pub async fn add_public_key_default(
        &self,
        public_key_path: impl AsRef<Path>,
    ) -> DockhandResult<()> {
        self.add_public_key(public_key_path, const_container::AUTHORIZED_KEYS)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_from_string() {
        assert_eq!(ExecScript::from("whoami").as_str(), "whoami");
        assert_eq!(ExecScript::from(String::from("a; b")).as_str(), "a; b");
    }

    #[test]
    fn test_script_from_sequence() {
        let commands = vec!["apt-get update".to_string(), "apt-get install -y curl".to_string()];
        assert_eq!(
            ExecScript::from(commands).as_str(),
            "apt-get update;apt-get install -y curl"
        );
        assert_eq!(ExecScript::from(&["a", "b", "c"][..]).as_str(), "a;b;c");
    }

    #[test]
    fn test_script_from_empty_sequence() {
        let commands: Vec<&str> = Vec::new();
        assert_eq!(ExecScript::from(commands).as_str(), "");
    }
}
