use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/sample_graph.json")
        .canonicalize()
        .expect("fixture graph present")
}

fn prepare_command() -> Command {
    let mut cmd = cargo_bin_cmd!("roadgraph-cli");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("ROADGRAPH_GRAPH")
        .arg("--graph")
        .arg(fixture_path());
    cmd
}

#[test]
fn a_star_route_is_the_default() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "A", "--to", "J"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: a-star"))
        .stdout(predicate::str::contains("Path: A -> C -> D -> I -> J"))
        .stdout(predicate::str::contains("Total: 10.93 km, 10.9 min"));
}

#[test]
fn dijkstra_algorithm_is_supported() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "B", "--to", "G", "--algorithm", "dijkstra"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: dijkstra"))
        .stdout(predicate::str::contains("Path: B -> A -> F -> G"));
}

#[test]
fn speed_changes_reported_time() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "A", "--to", "E", "--speed", "30"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total: 6.96 km, 13.9 min"));
}

#[test]
fn json_format_outputs_summary() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "json", "route", "--from", "A", "--to", "E"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(value["algorithm"], "a-star");
    assert_eq!(value["path"], serde_json::json!(["A", "C", "D", "E"]));
    assert_eq!(value["goal"]["label"], "Dolmabahce Palace");
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(3));
}

#[test]
fn rich_format_uses_markdown() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "rich", "route", "--from", "H", "--to", "F"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("**Route**"))
        .stdout(predicate::str::contains("Golden Horn Ferry"));
}

#[test]
fn unknown_node_error_is_friendly() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "a", "--to", "J"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown node 'a'"))
        .stderr(predicate::str::contains("Did you mean 'A'?"));
}

#[test]
fn unreachable_node_fails_with_message() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "A", "--to", "K"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No route found between A and K"));
}

#[test]
fn max_distance_too_small_suggests_increasing_it() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "A", "--to", "J", "--max-distance", "5"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("increase --max-distance"));
}

#[test]
fn via_is_rejected_for_dijkstra() {
    let mut cmd = prepare_command();
    cmd.args([
        "route",
        "--from",
        "A",
        "--to",
        "C",
        "--algorithm",
        "dijkstra",
        "--via",
        "J",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("waypoints"));
}

#[test]
fn via_with_a_star_keeps_shortest_path() {
    let mut cmd = prepare_command();
    cmd.args(["route", "--from", "A", "--to", "C", "--via", "J"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Path: A -> C"));
}

#[test]
fn compare_reports_both_algorithms() {
    let mut cmd = prepare_command();
    cmd.args(["compare", "--from", "A", "--to", "J", "--iterations", "2"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Comparison: A -> J"))
        .stdout(predicate::str::contains("dijkstra"))
        .stdout(predicate::str::contains("a-star"))
        .stdout(predicate::str::contains("avg over 2 runs"));
}

#[test]
fn nearest_finds_closest_node() {
    let mut cmd = prepare_command();
    cmd.args(["nearest", "--lat", "41.0256", "--lon", "28.9741", "--count", "2"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("C (Galata Tower) 0.000 km"));
}

#[test]
fn nodes_lists_every_node() {
    let mut cmd = prepare_command();
    cmd.args(["--format", "json", "nodes"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    let rows = value.as_array().expect("array of nodes");
    assert_eq!(rows.len(), 11);
    assert_eq!(rows[10]["id"], "K");
    assert_eq!(rows[10]["degree"], 0);
}

#[test]
fn graph_location_can_come_from_environment() {
    let mut cmd = cargo_bin_cmd!("roadgraph-cli");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env("ROADGRAPH_GRAPH", fixture_path())
        .args(["route", "--from", "A", "--to", "G"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Path: A -> F -> G"));
}

#[test]
fn missing_graph_is_reported() {
    let temp = tempfile::tempdir().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("roadgraph-cli");
    cmd.env("RUST_LOG", "error")
        .arg("--graph")
        .arg(temp.path().join("nope.json"))
        .args(["nodes"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load graph"));
}
