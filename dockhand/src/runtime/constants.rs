//! Constants for dockhand
//!
//! Centralized location for engine defaults and environment variable names.

pub mod envs {
    /// Overrides the engine binary (e.g. `podman`).
    pub const DOCKHAND_ENGINE: &str = "DOCKHAND_ENGINE";

    /// Remote engine endpoint passed through `-H`.
    pub const DOCKHAND_REMOTE_HOST: &str = "DOCKHAND_REMOTE_HOST";
}

/// Engine CLI defaults
pub mod engine {
    /// Binary invoked when nothing else is configured
    pub const DEFAULT_BINARY: &str = "docker";

    /// Global flag selecting a remote engine endpoint
    pub const HOST_FLAG: &str = "-H";
}

/// Container defaults
pub mod container {
    use std::time::Duration;

    /// Shell that reads exec scripts from stdin
    pub const DEFAULT_SHELL: &str = "bash";

    /// Length of the short identifier used on per-container commands
    pub const SHORT_ID_LEN: usize = 12;

    /// Where `add_public_key` appends keys by default
    pub const AUTHORIZED_KEYS: &str = "/root/.ssh/authorized_keys";

    /// Upper bound for `start_and_stream_output`
    pub const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_secs(3000);
}
