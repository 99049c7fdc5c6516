//! Configuration for the container engine.

use crate::errors::{DockhandError, DockhandResult};
use crate::runtime::constants::{engine as const_engine, envs as const_envs};
use serde::{Deserialize, Serialize};

// ============================================================================
// Engine Options
// ============================================================================

/// Which engine binary to drive and where it should connect.
///
/// `Default` consults the environment:
/// - `DOCKHAND_ENGINE`: binary name (default `docker`)
/// - `DOCKHAND_REMOTE_HOST`: remote endpoint passed through `-H`
///
/// # Example
///
/// ```
/// use dockhand::EngineOptions;
///
/// let options = EngineOptions::new("docker").with_remote_host("tcp://1.2.3.4:2375");
/// assert_eq!(options.remote_host.as_deref(), Some("tcp://1.2.3.4:2375"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Engine binary, resolved through `PATH`.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Remote engine endpoint (`-H <remote_host>`).
    ///
    /// An empty string is treated the same as `None`.
    #[serde(default = "default_remote_host")]
    pub remote_host: Option<String>,
}

fn default_binary() -> String {
    std::env::var(const_envs::DOCKHAND_ENGINE)
        .ok()
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| const_engine::DEFAULT_BINARY.to_string())
}

fn default_remote_host() -> Option<String> {
    std::env::var(const_envs::DOCKHAND_REMOTE_HOST)
        .ok()
        .filter(|h| !h.is_empty())
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            remote_host: default_remote_host(),
        }
    }
}

impl EngineOptions {
    /// Options for `binary` with no remote host, ignoring the environment.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            remote_host: None,
        }
    }

    /// Set the remote engine endpoint.
    pub fn with_remote_host(mut self, host: impl Into<String>) -> Self {
        let host = host.into();
        self.remote_host = (!host.is_empty()).then_some(host);
        self
    }

    /// Remote host, if one is configured and non-empty.
    pub fn remote_host(&self) -> Option<&str> {
        self.remote_host.as_deref().filter(|h| !h.is_empty())
    }

    pub fn validate(&self) -> DockhandResult<()> {
        if self.binary.trim().is_empty() {
            return Err(DockhandError::Config(
                "engine binary must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ignores_environment() {
        let options = EngineOptions::new("podman");
        assert_eq!(options.binary, "podman");
        assert_eq!(options.remote_host(), None);
    }

    #[test]
    fn test_empty_remote_host_is_none() {
        let options = EngineOptions::new("docker").with_remote_host("");
        assert_eq!(options.remote_host, None);

        let options = EngineOptions {
            binary: "docker".into(),
            remote_host: Some(String::new()),
        };
        assert_eq!(options.remote_host(), None);
    }

    #[test]
    fn test_empty_binary_is_config_error() {
        let err = EngineOptions::new(" ").validate().unwrap_err();
        assert!(matches!(err, DockhandError::Config(_)));
        assert!(EngineOptions::new("docker").validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_explicit_fields() {
        let options: EngineOptions =
            serde_json::from_str(r#"{"binary": "docker", "remote_host": "1.2.3.4"}"#).unwrap();
        assert_eq!(options, EngineOptions::new("docker").with_remote_host("1.2.3.4"));
    }
}
