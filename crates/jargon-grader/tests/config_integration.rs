//! Configuration integration tests.
//!
//! Run the compiled binary against temporary project trees and read the
//! effective configuration back through `info --json`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("JARGON_GRADER_CORPUS")
        .env_remove("JARGON_GRADER_MAX_RARE_COUNT")
        .env_remove("RUST_LOG");
    cmd
}

/// Run `info --json` from `dir` and return the `config` object.
fn config_in(dir: &Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value = serde_json::from_slice(&output.stdout).expect("invalid JSON output");
    json["config"].clone()
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn defaults_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());

    assert!(config["config_file"].is_null());
    assert!(config["corpus"].is_null());
    assert_eq!(config["log_level"], "info");
    assert_eq!(config["thresholds"]["min_count"], 0);
    assert_eq!(config["thresholds"]["max_count"], 80);
    assert_eq!(config["thresholds"]["max_rare_count"], 80);
    assert_eq!(config["thresholds"]["max_uncommon_count"], 1000);
    assert_eq!(config["max_input_bytes"], 5 * 1024 * 1024);
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn discovers_dotfile_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".jargon-grader.toml"), "max_count = 50\n").unwrap();

    let config = config_in(tmp.path());
    assert_eq!(config["thresholds"]["max_count"], 50);
    assert!(
        config["config_file"]
            .as_str()
            .unwrap()
            .ends_with(".jargon-grader.toml")
    );
}

#[test]
fn discovers_short_name_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("jargon.toml"), "max_rare_count = 20\n").unwrap();

    let config = config_in(tmp.path());
    assert_eq!(config["thresholds"]["max_rare_count"], 20);
}

#[test]
fn full_name_overrides_short_name() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("jargon.toml"), "min_score = 40.0\n").unwrap();
    fs::write(tmp.path().join(".jargon-grader.toml"), "min_score = 75.0\n").unwrap();

    let config = config_in(tmp.path());
    assert_eq!(config["min_score"], 75.0);
}

#[test]
fn discovers_config_in_ancestor() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("docs").join("guides");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        tmp.path().join("jargon-grader.toml"),
        "corpus = \"words.csv\"\n",
    )
    .unwrap();

    let config = config_in(&nested);
    assert_eq!(config["corpus"], "words.csv");
}

#[test]
fn nearest_config_wins() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(tmp.path().join(".jargon-grader.toml"), "max_count = 10\n").unwrap();
    fs::write(project.join(".jargon-grader.toml"), "max_count = 30\n").unwrap();

    let config = config_in(&project);
    assert_eq!(config["thresholds"]["max_count"], 30);
}

#[test]
fn git_boundary_stops_search() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(tmp.path().join(".jargon-grader.toml"), "max_count = 10\n").unwrap();

    let config = config_in(&src);
    assert_eq!(config["thresholds"]["max_count"], 80);
    assert!(config["config_file"].is_null());
}

#[test]
fn config_beside_git_is_found() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(repo.join(".jargon-grader.toml"), "max_count = 10\n").unwrap();

    let config = config_in(&src);
    assert_eq!(config["thresholds"]["max_count"], 10);
}

// =============================================================================
// Formats
// =============================================================================

#[test]
fn parses_yaml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".jargon-grader.yaml"),
        "max_uncommon_count: 500\ncorpus_format: delimited\n",
    )
    .unwrap();

    let config = config_in(tmp.path());
    assert_eq!(config["thresholds"]["max_uncommon_count"], 500);
    assert_eq!(config["corpus_format"], "delimited");
}

#[test]
fn parses_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".jargon-grader.json"),
        r#"{"log_level": "warn", "disable_input_limit": true}"#,
    )
    .unwrap();

    let config = config_in(tmp.path());
    assert_eq!(config["log_level"], "warn");
    assert!(config["max_input_bytes"].is_null());
}

#[test]
fn yaml_overrides_toml_in_same_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".jargon-grader.toml"), "max_count = 10\n").unwrap();
    fs::write(tmp.path().join(".jargon-grader.yaml"), "max_count: 20\n").unwrap();

    let config = config_in(tmp.path());
    assert_eq!(config["thresholds"]["max_count"], 20);
}

// =============================================================================
// Explicit config, flags and environment
// =============================================================================

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".jargon-grader.toml"), "max_count = 10\n").unwrap();
    let explicit = tmp.path().join("strict.toml");
    fs::write(&explicit, "max_count = 200\n").unwrap();

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["--config", explicit.to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["thresholds"]["max_count"], 200);
    assert!(
        json["config"]["config_file"]
            .as_str()
            .unwrap()
            .ends_with("strict.toml")
    );
}

#[test]
fn env_overrides_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".jargon-grader.toml"), "max_rare_count = 10\n").unwrap();

    let output = cmd()
        .env("JARGON_GRADER_MAX_RARE_COUNT", "33")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["thresholds"]["max_rare_count"], 33);
}

#[test]
fn corpus_flag_overrides_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".jargon-grader.toml"), "corpus = \"a.csv\"\n").unwrap();

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["--corpus", "b.csv", "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["corpus"], "b.csv");
}

#[test]
fn corpus_format_flag_overrides_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".jargon-grader.toml"),
        "corpus_format = \"delimited\"\n",
    )
    .unwrap();

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["--corpus-format", "json", "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["corpus_format"], "json");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn invalid_toml_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".jargon-grader.toml"), "not toml [[[").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

#[test]
fn wrong_type_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".jargon-grader.toml"), "max_count = \"lots\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn unknown_keys_are_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".jargon-grader.toml"),
        "max_count = 12\nnot_a_setting = true\n",
    )
    .unwrap();

    let config = config_in(tmp.path());
    assert_eq!(config["thresholds"]["max_count"], 12);
}
