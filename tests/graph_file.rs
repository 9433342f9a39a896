// tests/graph_file.rs

use std::io::Write;

use dagrun::config::{VertexConfig, load_from_path, parse_str};
use dagrun::{DagError, Runner};
use tempfile::NamedTempFile;

#[test]
fn parses_vertices_and_after_lists() {
    let graph = parse_str(
        r#"
[vertex.build]
cmd = "echo build"

[vertex.test]
cmd = "echo test"
after = ["build"]
"#,
    )
    .unwrap();

    assert_eq!(graph.vertex.len(), 2);
    assert_eq!(graph.vertex["build"], VertexConfig::new("echo build"));
    assert_eq!(graph.vertex["test"].after, vec!["build".to_string()]);
}

#[test]
fn empty_file_is_an_empty_graph() {
    let graph = parse_str("").unwrap();
    assert!(graph.vertex.is_empty());
}

#[test]
fn empty_cmd_is_rejected() {
    let err = parse_str(
        r#"
[vertex.blank]
cmd = "   "
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("blank"));
}

#[test]
fn unknown_fields_are_rejected() {
    let result = parse_str(
        r#"
[vertex.a]
cmd = "echo a"
depends = ["b"]
"#,
    );
    assert!(result.is_err());
}

#[test]
fn load_from_path_reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[vertex.A]
cmd = "echo A"

[vertex.B]
cmd = "echo B"
after = ["A"]
"#
    )
    .unwrap();

    let graph = load_from_path(file.path()).unwrap();
    let runner = Runner::from_config(&graph);
    assert_eq!(runner.vertex_count(), 2);
    assert_eq!(runner.edge_count(), 1);
    assert!(runner.validate().is_ok());
}

#[test]
fn load_from_missing_path_mentions_the_path() {
    let err = load_from_path("/definitely/not/here/Dagrun.toml").unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here/Dagrun.toml"));
}

#[test]
fn unknown_after_reference_is_left_to_the_runner() {
    let graph = parse_str(
        r#"
[vertex.A]
cmd = "echo A"
after = ["NonExistent"]
"#,
    )
    .unwrap();

    let runner = Runner::from_config(&graph);
    match runner.validate() {
        Err(DagError::MissingVertex { from, to, missing }) => {
            assert_eq!(from, "NonExistent");
            assert_eq!(to, "A");
            assert_eq!(missing, "NonExistent");
        }
        other => panic!("expected MissingVertex, got {other:?}"),
    }
}

#[test]
fn cycle_in_file_is_reported_by_the_runner() {
    let graph = parse_str(
        r#"
[vertex.A]
cmd = "echo A"
after = ["B"]

[vertex.B]
cmd = "echo B"
after = ["A"]
"#,
    )
    .unwrap();

    let err = Runner::from_config(&graph).validate().unwrap_err();
    assert!(err.to_string().contains("cycle detected"));
    assert!(matches!(err, DagError::CycleDetected(ref names) if names.len() == 2));
}
