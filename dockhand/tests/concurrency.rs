//! Independent specs and handles driven from concurrent tasks.

use dockhand::ContainerSpec;
use dockhand_test_utils::FakeExecutor;
use std::sync::Arc;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn independent_specs_do_not_interfere() {
    let web_fake = Arc::new(FakeExecutor::new());
    let db_fake = Arc::new(FakeExecutor::new());
    let web = common::spec_builder("nginx", &web_fake)
        .name("web")
        .map_port(8080, 80)
        .build()
        .unwrap();
    let db = common::spec_builder("postgres:16", &db_fake)
        .name("db")
        .env("POSTGRES_PASSWORD", "example")
        .build()
        .unwrap();
    web_fake.push_success("aaaaaaaaaaaaaaaaaaaa\n");
    db_fake.push_success("bbbbbbbbbbbbbbbbbbbb\n");

    let (web_handle, db_handle) = tokio::join!(web.start(), db.start());
    let web_handle = web_handle.unwrap();
    let db_handle = db_handle.unwrap();

    let (web_out, db_out) = tokio::join!(
        web_handle.execute("nginx -t"),
        db_handle.execute("pg_isready")
    );
    web_out.unwrap();
    db_out.unwrap();

    assert_eq!(
        web_fake.rendered_calls(),
        [
            "docker start -p 8080:80 --name web -d --rm nginx",
            "echo \"nginx -t\" | docker exec --interactive aaaaaaaaaaaa bash -",
        ]
    );
    assert_eq!(
        db_fake.rendered_calls(),
        [
            "docker start -e POSTGRES_PASSWORD=example --name db -d --rm postgres:16",
            "echo \"pg_isready\" | docker exec --interactive bbbbbbbbbbbb bash -",
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn handles_move_across_tasks() {
    let fake = Arc::new(FakeExecutor::new());
    let spec: ContainerSpec = common::spec_builder("alpine", &fake).build().unwrap();
    let handle = common::started(&spec, &fake).await;

    let task = tokio::spawn(async move {
        let output = handle.stop().await.unwrap();
        (handle, output)
    });
    let (handle, output) = task.await.unwrap();

    assert!(output.success());
    assert!(handle.close().await.unwrap().is_none());
    assert_eq!(fake.calls().len(), 2);
}
