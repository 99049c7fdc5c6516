#![allow(dead_code)]

use dockhand::{ContainerHandle, ContainerSpec, ContainerSpecBuilder, EngineOptions};
use dockhand_test_utils::{CONTAINER_ID, FakeExecutor};
use std::sync::Arc;

/// Builder for `image` wired to `fake`, with a local `docker` engine.
pub fn spec_builder(image: &str, fake: &Arc<FakeExecutor>) -> ContainerSpecBuilder {
    let mut builder = ContainerSpec::builder(image);
    builder
        .engine(EngineOptions::new("docker"))
        .executor(fake.clone());
    builder
}

/// Start a container from `spec` against `fake`, answering the start with
/// [`CONTAINER_ID`].
pub async fn started(spec: &ContainerSpec, fake: &FakeExecutor) -> ContainerHandle {
    fake.push_success(format!("{}\n", CONTAINER_ID));
    spec.start().await.expect("start should succeed")
}

/// The short form of [`CONTAINER_ID`].
pub fn short_id() -> &'static str {
    &CONTAINER_ID[..12]
}
