//! Integration tests for spec lifecycle operations (pull, create, start).

use dockhand::{DockhandError, EngineOptions};
use dockhand_test_utils::{CONTAINER_ID, FakeExecutor};
use std::sync::Arc;

mod common;

// ============================================================================
// PULL
// ============================================================================

#[tokio::test]
async fn pull_runs_pull_command() {
    let fake = Arc::new(FakeExecutor::new());
    let spec = common::spec_builder("nginx:1.27", &fake).build().unwrap();

    spec.pull_image().await.unwrap();

    assert_eq!(fake.rendered_calls(), ["docker pull nginx:1.27"]);
}

#[tokio::test]
async fn pull_failure_carries_image_and_stderr() {
    let fake = Arc::new(FakeExecutor::new());
    let spec = common::spec_builder("nginx:nope", &fake).build().unwrap();
    fake.push_failure(1, "manifest for nginx:nope not found");

    let err = spec.pull_image().await.unwrap_err();

    match err {
        DockhandError::Pull { image, stderr } => {
            assert_eq!(image, "nginx:nope");
            assert_eq!(stderr, "manifest for nginx:nope not found");
        }
        other => panic!("expected Pull error, got {other:?}"),
    }
}

// ============================================================================
// CREATE / START
// ============================================================================

#[tokio::test]
async fn start_renders_full_command_over_remote_host() {
    let fake = Arc::new(FakeExecutor::new());
    let spec = common::spec_builder("nginx", &fake)
        .name("web")
        .map_port(8080, 80)
        .engine(EngineOptions::new("docker").with_remote_host("1.2.3.4"))
        .build()
        .unwrap();
    fake.push_success(CONTAINER_ID);

    spec.start().await.unwrap();

    assert_eq!(
        fake.rendered_calls(),
        ["docker -H 1.2.3.4 start -p 8080:80 --name web -d --rm nginx"]
    );
}

#[tokio::test]
async fn create_uses_create_verb() {
    let fake = Arc::new(FakeExecutor::new());
    let spec = common::spec_builder("redis", &fake)
        .command("redis-server --appendonly yes")
        .build()
        .unwrap();
    fake.push_success(CONTAINER_ID);

    spec.create().await.unwrap();

    assert_eq!(
        fake.rendered_calls(),
        ["docker create -d --rm redis redis-server --appendonly yes"]
    );
}

#[tokio::test]
async fn identifier_is_trimmed_stdout() {
    let fake = Arc::new(FakeExecutor::new());
    let spec = common::spec_builder("alpine", &fake).build().unwrap();
    fake.push_success(format!("  {}\n", CONTAINER_ID));

    let handle = spec.create().await.unwrap();

    assert_eq!(handle.identifier(), CONTAINER_ID);
    assert_eq!(handle.short_identifier(), &CONTAINER_ID[..12]);
}

#[tokio::test]
async fn create_failure_is_create_error() {
    let fake = Arc::new(FakeExecutor::new());
    let spec = common::spec_builder("alpine", &fake).build().unwrap();
    fake.push_failure(125, "Conflict. The container name is already in use");

    let err = spec.create().await.unwrap_err();

    assert!(matches!(err, DockhandError::Create { ref image, .. } if image == "alpine"));
    assert_eq!(
        err.stderr(),
        Some("Conflict. The container name is already in use")
    );
}

#[tokio::test]
async fn start_failure_is_start_error() {
    let fake = Arc::new(FakeExecutor::new());
    let spec = common::spec_builder("alpine", &fake).build().unwrap();
    fake.push_failure(125, "no such image");

    let err = spec.start().await.unwrap_err();

    assert!(matches!(err, DockhandError::Start { .. }));
    assert!(err.to_string().contains("Could not start Docker container `alpine`"));
}

#[tokio::test]
async fn empty_identifier_is_engine_error() {
    let fake = Arc::new(FakeExecutor::new());
    let spec = common::spec_builder("alpine", &fake).build().unwrap();
    fake.push_success("   \n");

    let err = spec.start().await.unwrap_err();

    assert!(matches!(err, DockhandError::Engine(_)));
}

#[tokio::test]
async fn one_spec_creates_independent_handles() {
    let fake = Arc::new(FakeExecutor::new());
    let spec = common::spec_builder("alpine", &fake).name("worker").build().unwrap();
    fake.push_success("aaaaaaaaaaaaaaaa");
    fake.push_success("bbbbbbbbbbbbbbbb");

    let first = spec.create().await.unwrap();
    let second = spec.create().await.unwrap();

    assert_ne!(first.identifier(), second.identifier());
    assert_eq!(first.name(), Some("worker"));
    assert_eq!(second.name(), Some("worker"));
}

#[tokio::test]
async fn derived_spec_does_not_change_existing_handle() {
    let fake = Arc::new(FakeExecutor::new());
    let spec = common::spec_builder("alpine", &fake).name("before").build().unwrap();
    let handle = common::started(&spec, &fake).await;

    let _derived = spec
        .to_builder()
        .name("after")
        .shell("sh")
        .build()
        .unwrap();

    assert_eq!(handle.name(), Some("before"));
    handle.execute("true").await.unwrap();
    let exec = fake.last_call().unwrap();
    assert!(exec.arguments().contains(&"bash".to_string()));
}
