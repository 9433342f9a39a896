// tests/command_vertices.rs
#![cfg(unix)]

use std::error::Error;

use dagrun::exec::{CommandError, run_command};
use dagrun::{DagError, Runner};
use dagrun_test_utils::builders::{GraphFileBuilder, VertexConfigBuilder};
use dagrun_test_utils::{init_tracing, with_timeout};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn successful_command_is_ok() -> TestResult {
    init_tracing();
    with_timeout(run_command("ok", "echo hello; echo oops 1>&2")).await?;
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_is_a_command_error() {
    init_tracing();

    let err = with_timeout(run_command("bad", "exit 3")).await.unwrap_err();
    let cmd_err = err.downcast_ref::<CommandError>().expect("CommandError");
    assert_eq!(
        cmd_err,
        &CommandError::NonZeroExit {
            vertex: "bad".to_string(),
            cmd: "exit 3".to_string(),
            code: 3,
        }
    );
}

#[tokio::test]
async fn graph_file_commands_run_in_dependency_order() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let log = dir.path().join("order.log");
    let log = log.display();

    let graph = GraphFileBuilder::new()
        .with_vertex(
            "first",
            VertexConfigBuilder::new(&format!("echo first >> {log}")).build(),
        )
        .with_vertex(
            "second",
            VertexConfigBuilder::new(&format!("echo second >> {log}"))
                .after("first")
                .build(),
        )
        .with_vertex(
            "third",
            VertexConfigBuilder::new(&format!("echo third >> {log}"))
                .after("second")
                .build(),
        )
        .build();

    with_timeout(Runner::from_config(&graph).run()).await?;

    let contents = std::fs::read_to_string(dir.path().join("order.log"))?;
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec!["first", "second", "third"]);
    Ok(())
}

#[tokio::test]
async fn failing_command_skips_dependents() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let marker = dir.path().join("should-not-exist");

    let graph = GraphFileBuilder::new()
        .with_vertex("broken", VertexConfigBuilder::new("exit 1").build())
        .with_vertex(
            "after-broken",
            VertexConfigBuilder::new(&format!("touch {}", marker.display()))
                .after("broken")
                .build(),
        )
        .build();

    let err = with_timeout(Runner::from_config(&graph).run())
        .await
        .unwrap_err();

    match err {
        DagError::Action(inner) => {
            let cmd_err = inner.downcast_ref::<CommandError>().expect("CommandError");
            assert!(matches!(cmd_err, CommandError::NonZeroExit { code: 1, .. }));
        }
        other => panic!("expected Action error, got {other:?}"),
    }
    assert!(!marker.exists());
    Ok(())
}
