//! Registry authentication (`<engine> login`).

use crate::command::{CommandLine, EngineCommand};
use crate::errors::{DockhandError, DockhandResult};
use crate::process::{ProcessExecutor, SystemExecutor};
use crate::runtime::EngineOptions;
use std::sync::Arc;

/// Logs the engine in to a container registry.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use dockhand::RegistryClient;
///
/// let registry = RegistryClient::default();
/// registry
///     .login(Some("registry.example.com"), "deploy", "s3cret")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RegistryClient {
    engine: EngineCommand,
    executor: Arc<dyn ProcessExecutor>,
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl RegistryClient {
    /// Client that runs real engine processes.
    pub fn new(options: EngineOptions) -> Self {
        Self::with_executor(options, Arc::new(SystemExecutor::new()))
    }

    pub fn with_executor(options: EngineOptions, executor: Arc<dyn ProcessExecutor>) -> Self {
        Self {
            engine: EngineCommand::new(options),
            executor,
        }
    }

    /// `<base> login [server] [--username <u>] [--password <p>]`.
    ///
    /// Empty values are left out. The password is masked when the command
    /// line is displayed.
    pub fn render_login_command(
        &self,
        server: Option<&str>,
        username: &str,
        password: &str,
    ) -> CommandLine {
        let mut command = self.engine.verb("login");
        if let Some(server) = server.filter(|s| !s.is_empty()) {
            command = command.arg(server);
        }
        if !username.is_empty() {
            command = command.args(["--username", username]);
        }
        if !password.is_empty() {
            command = command.arg("--password").secret_arg(password);
        }
        command
    }

    /// Log in, failing with [`DockhandError::Login`] on a nonzero exit.
    pub async fn login(
        &self,
        server: Option<&str>,
        username: &str,
        password: &str,
    ) -> DockhandResult<()> {
        let command = self.render_login_command(server, username, password);
        let output = self.executor.run(&command).await?;

        if !output.success() {
            return Err(DockhandError::Login {
                stderr: output.stderr,
            });
        }

        tracing::info!(
            server = server.unwrap_or("default"),
            username,
            "Logged in to registry"
        );
        Ok(())
    }
}
