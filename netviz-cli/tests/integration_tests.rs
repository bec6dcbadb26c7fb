//! Integration tests for the netviz CLI
//!
//! Runs the built binary against records files and stores in isolated
//! temp directories.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn run_netviz(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_netviz"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute netviz command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_str(&stdout(output)).expect("stdout should be JSON")
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

const THREE_NODES: &str = r#"[
  {"id": 1, "type": 0, "radius": 3.0, "x": 10.0, "y": 10.0, "neighbors": "2"},
  {"id": 2, "type": 2, "radius": 3.0, "x": 20.0, "y": 10.0, "neighbors": ""},
  {"id": 3, "type": 1, "radius": 3.0, "x": 15.0, "y": 20.0, "neighbors": "1"}
]"#;

fn point(value: &Value) -> (f64, f64) {
    (
        value["x"].as_f64().expect("x"),
        value["y"].as_f64().expect("y"),
    )
}

fn segment_endpoints(scene: &Value) -> Vec<((f64, f64), (f64, f64))> {
    scene["segments"]
        .as_array()
        .expect("segments array")
        .iter()
        .map(|s| (point(&s["start"]), point(&s["end"])))
        .collect()
}

// ============================================================================
// render
// ============================================================================

#[test]
fn test_render_json_from_file_uses_positions() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "nodes.json", THREE_NODES);

    let output = run_netviz(
        dir.path(),
        &["render", "--input", "nodes.json", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let scene = stdout_json(&output);
    assert_eq!(scene["glyphs"].as_array().unwrap().len(), 3);
    assert_eq!(scene["labels"].as_array().unwrap().len(), 3);
    assert_eq!(
        segment_endpoints(&scene),
        vec![((10.0, 10.0), (15.0, 20.0)), ((15.0, 20.0), (20.0, 10.0))]
    );
}

#[test]
fn test_render_json_with_id_resolution() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "nodes.json", THREE_NODES);

    let output = run_netviz(
        dir.path(),
        &[
            "render",
            "--input",
            "nodes.json",
            "--resolve",
            "id",
            "--format",
            "json",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        segment_endpoints(&stdout_json(&output)),
        vec![((10.0, 10.0), (20.0, 10.0)), ((15.0, 20.0), (10.0, 10.0))]
    );
}

#[test]
fn test_render_svg() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "nodes.json", THREE_NODES);

    let output = run_netviz(
        dir.path(),
        &["render", "--input", "nodes.json", "--format", "svg"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let svg = stdout(&output);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("<polygon"));
    assert!(svg.contains("<circle"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_render_table_summary() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "nodes.json", THREE_NODES);

    let output = run_netviz(dir.path(), &["render", "--input", "nodes.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Glyphs"));
    assert!(text.contains("Segments"));
    assert!(text.contains("triangle"));
}

#[test]
fn test_out_of_range_neighbor_fails_by_default() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "nodes.json",
        r#"[
          {"id": 0, "type": 0, "radius": 1.0, "x": 0.0, "y": 0.0, "neighbors": "1,7"},
          {"id": 1, "type": 1, "radius": 1.0, "x": 5.0, "y": 5.0}
        ]"#,
    );

    let output = run_netviz(
        dir.path(),
        &["render", "--input", "nodes.json", "--format", "json"],
    );
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("references position 7"));
}

#[test]
fn test_render_compact_json() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "nodes.json", THREE_NODES);

    let output = run_netviz(
        dir.path(),
        &["render", "--input", "nodes.json", "--format", "json", "--compact"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert_eq!(text.trim_end().lines().count(), 1);
    assert_eq!(
        segment_endpoints(&stdout_json(&output)),
        vec![((10.0, 10.0), (15.0, 20.0)), ((15.0, 20.0), (20.0, 10.0))]
    );
}

#[test]
fn test_out_of_range_neighbor_skipped_on_request() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "nodes.json",
        r#"[
          {"id": 0, "type": 0, "radius": 1.0, "x": 0.0, "y": 0.0, "neighbors": "1,7"},
          {"id": 1, "type": 1, "radius": 1.0, "x": 5.0, "y": 5.0}
        ]"#,
    );

    let output = run_netviz(
        dir.path(),
        &[
            "render",
            "--input",
            "nodes.json",
            "--on-missing-neighbor",
            "skip",
            "--format",
            "json",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let scene = stdout_json(&output);
    assert_eq!(scene["segments"].as_array().unwrap().len(), 1);
    assert_eq!(scene["skipped_edges"][0]["reference"], 7);
}

#[test]
fn test_invalid_resolution_flag_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run_netviz(dir.path(), &["render", "--resolve", "sideways"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("sideways"));
}

#[test]
fn test_render_without_store_suggests_import() {
    let dir = TempDir::new().unwrap();
    let output = run_netviz(dir.path(), &["render"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("netviz import"));
}

// ============================================================================
// import + store
// ============================================================================

#[test]
fn test_import_then_render_from_store() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "nodes.json", THREE_NODES);

    let output = run_netviz(dir.path(), &["import", "nodes.json", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let summary = stdout_json(&output);
    assert_eq!(summary["node_count"], 3);
    assert!(dir.path().join(".netviz").join("topology.duckdb").exists());

    let output = run_netviz(dir.path(), &["render", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        segment_endpoints(&stdout_json(&output)),
        vec![((10.0, 10.0), (15.0, 20.0)), ((15.0, 20.0), (20.0, 10.0))]
    );
}

#[test]
fn test_import_to_explicit_db_path() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "nodes.json", THREE_NODES);

    let output = run_netviz(
        dir.path(),
        &["import", "nodes.json", "--db", "snap.duckdb"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Imported 3 nodes"));

    let output = run_netviz(
        dir.path(),
        &["nodes", "--db", "snap.duckdb", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let listing = stdout_json(&output);
    let ids: Vec<i64> = listing["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_null_field_in_store_fails_load() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "nodes.json",
        r#"[
          {"id": 1, "type": 0, "radius": 1.0, "x": 0.0, "y": 0.0},
          {"id": 2, "type": 0, "radius": 1.0, "x": 1.0, "y": null}
        ]"#,
    );

    let output = run_netviz(dir.path(), &["import", "nodes.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = run_netviz(dir.path(), &["render"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Missing value for column 'y' at row 1"));
}

#[test]
fn test_import_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "nodes.json", r#"{"id": 1}"#);

    let output = run_netviz(dir.path(), &["import", "nodes.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("nodes.json"));
}

// ============================================================================
// nodes
// ============================================================================

#[test]
fn test_nodes_json_drops_malformed_tokens() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "nodes.json",
        r#"[
          {"id": 0, "type": 0, "radius": 1.0, "x": 0.0, "y": 0.0, "neighbors": "1,x,-2, 2"},
          {"id": 1, "type": 4, "radius": 1.0, "x": 1.0, "y": 1.0}
        ]"#,
    );

    let output = run_netviz(
        dir.path(),
        &["nodes", "--input", "nodes.json", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let listing = stdout_json(&output);
    assert_eq!(listing["nodes"][0]["neighbors"], serde_json::json!([1]));
    assert!(listing["nodes"][1]["type"].is_null());
}

#[test]
fn test_duplicate_ids_fail() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "nodes.json",
        r#"[
          {"id": 5, "type": 0, "radius": 1.0, "x": 0.0, "y": 0.0},
          {"id": 5, "type": 1, "radius": 1.0, "x": 1.0, "y": 1.0}
        ]"#,
    );

    let output = run_netviz(dir.path(), &["nodes", "--input", "nodes.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Duplicate node id 5"));
}

// ============================================================================
// configuration
// ============================================================================

#[test]
fn test_config_sets_defaults() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "nodes.json", THREE_NODES);
    write_file(
        dir.path(),
        ".netvizrc.toml",
        r#"
[render]
resolve = "id"

[output]
format = "json"
color = false
"#,
    );

    let output = run_netviz(dir.path(), &["render", "--input", "nodes.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        segment_endpoints(&stdout_json(&output)),
        vec![((10.0, 10.0), (20.0, 10.0)), ((15.0, 20.0), (10.0, 10.0))]
    );

    // Flags win over config
    let output = run_netviz(
        dir.path(),
        &["render", "--input", "nodes.json", "--resolve", "position"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        segment_endpoints(&stdout_json(&output)),
        vec![((10.0, 10.0), (15.0, 20.0)), ((15.0, 20.0), (20.0, 10.0))]
    );
}

#[test]
fn test_config_store_path() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "nodes.json", THREE_NODES);
    write_file(
        dir.path(),
        ".netvizrc.toml",
        r#"
[store]
path = "data/net.duckdb"
"#,
    );

    let output = run_netviz(dir.path(), &["import", "nodes.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("data").join("net.duckdb").exists());
}

#[test]
fn test_no_command_prints_help() {
    let dir = TempDir::new().unwrap();
    let output = run_netviz(dir.path(), &[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));
}
