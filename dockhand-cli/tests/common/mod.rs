#![allow(dead_code)]

use assert_cmd::Command;
use std::time::Duration;

/// The dockhand binary with a clean engine environment.
///
/// Only `render` and argument errors are exercised, so no engine is needed.
pub fn dockhand() -> Command {
    let bin_path: &str = env!("CARGO_BIN_EXE_dockhand");
    let mut cmd = Command::new(bin_path);
    cmd.timeout(Duration::from_secs(30));
    cmd.env_remove("DOCKHAND_ENGINE")
        .env_remove("DOCKHAND_REMOTE_HOST")
        .env_remove("RUST_LOG");
    cmd
}
