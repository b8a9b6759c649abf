use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn datacache(cache_root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("datacache"));
    cmd.env_remove("USE_CACHE")
        .env_remove("DATACACHE_ROOT")
        .env_remove("RUST_LOG")
        .arg("--cache-root")
        .arg(cache_root);
    cmd
}

fn get(cache_root: &Path, use_cache: bool) -> Value {
    let assert = datacache(cache_root)
        .args(["get", "--seed", "42", "--points", "50", "--use-cache"])
        .arg(use_cache.to_string())
        .assert()
        .success();
    let mut items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 1);
    items.remove(0)
}

#[test]
fn get_without_cache_generates_and_writes_artifact() {
    let temp = tempdir().unwrap();

    let item = get(temp.path(), false);

    assert_eq!(item["kind"], "dataset");
    assert_eq!(item["key"], "42-50");
    assert_eq!(item["status"], "miss");
    assert_eq!(item["data"]["outcome"]["reason"], "disabled");
    assert_eq!(item["data"]["x"].as_array().unwrap().len(), 50);
    assert_eq!(item["data"]["y"].as_array().unwrap().len(), 50);

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["42-50.json"]);

    let artifact: Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("42-50.json")).unwrap())
            .unwrap();
    let mut fields: Vec<_> = artifact.as_object().unwrap().keys().cloned().collect();
    fields.sort();
    assert_eq!(fields, vec!["sha256_sum", "x", "y"]);
}

#[test]
fn get_with_cache_reuses_verified_artifact() {
    let temp = tempdir().unwrap();
    let first = get(temp.path(), false);
    let written = fs::read(temp.path().join("42-50.json")).unwrap();

    let second = get(temp.path(), true);

    assert_eq!(second["status"], "hit");
    assert_eq!(second["meta"]["hit"], true);
    assert_eq!(second["data"]["x"], first["data"]["x"]);
    assert_eq!(second["data"]["y"], first["data"]["y"]);
    assert_eq!(fs::read(temp.path().join("42-50.json")).unwrap(), written);
}

#[test]
fn get_with_corrupted_digest_regenerates_and_repairs() {
    let temp = tempdir().unwrap();
    let first = get(temp.path(), false);

    let path = temp.path().join("42-50.json");
    let mut artifact: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    artifact["sha256_sum"] = Value::from("0".repeat(64));
    fs::write(&path, serde_json::to_string(&artifact).unwrap()).unwrap();

    let second = get(temp.path(), true);

    assert_eq!(second["status"], "miss");
    assert_eq!(second["data"]["outcome"]["reason"], "integrity_mismatch");
    assert_eq!(second["data"]["x"], first["data"]["x"]);

    datacache(temp.path())
        .args(["verify", "--seed", "42", "--points", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"valid\""));
}

#[test]
fn use_cache_can_come_from_environment() {
    let temp = tempdir().unwrap();
    get(temp.path(), false);

    let assert = datacache(temp.path())
        .env("USE_CACHE", "true")
        .args(["get", "--seed", "42", "--points", "50"])
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items[0]["status"], "hit");
}

#[test]
fn get_reads_params_file() {
    let temp = tempdir().unwrap();
    let params = temp.path().join("params.json");
    fs::write(&params, r#"{"random_seed": -3, "n_points": 20}"#).unwrap();
    let cache = temp.path().join("cache");

    let assert = datacache(&cache)
        .arg("get")
        .arg("--params")
        .arg(&params)
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(items[0]["key"], "3-20");
    assert!(cache.join("3-20.json").is_file());
}

#[test]
fn get_requires_parameters() {
    let temp = tempdir().unwrap();
    datacache(temp.path()).arg("get").assert().failure();
    datacache(temp.path())
        .args(["get", "--seed", "1", "--points", "0"])
        .assert()
        .failure();
}

#[test]
fn get_fails_when_cache_root_is_not_writable() {
    let temp = tempdir().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    datacache(&blocker)
        .args(["get", "--seed", "1", "--points", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to cache dataset"));
}

#[test]
fn key_prints_artifact_location() {
    let temp = tempdir().unwrap();

    let assert = datacache(temp.path())
        .args(["key", "--seed", "7", "--points", "20"])
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "key");
    assert_eq!(items[0]["key"], "7-20");
    assert!(items[0]["path"].as_str().unwrap().ends_with("/7-20.json"));
    assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
}

#[test]
fn verify_reports_missing_and_tampered_artifacts() {
    let temp = tempdir().unwrap();

    datacache(temp.path())
        .args(["verify", "--seed", "42", "--points", "50"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"status\":\"missing\""));

    get(temp.path(), false);
    let path = temp.path().join("42-50.json");
    let mut artifact: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    artifact["y"][10] = Value::from(0.0);
    fs::write(&path, serde_json::to_string(&artifact).unwrap()).unwrap();
    let tampered = fs::read(&path).unwrap();

    datacache(temp.path())
        .args(["verify", "--seed", "42", "--points", "50"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("INTEGRITY_MISMATCH"));

    // Verification never repairs
    assert_eq!(fs::read(&path).unwrap(), tampered);
}

#[test]
fn list_verifies_every_artifact() {
    let temp = tempdir().unwrap();
    get(temp.path(), false);
    fs::write(temp.path().join("1-1.json"), "{\"x\": []}").unwrap();

    let assert = datacache(temp.path()).arg("list").assert().success();
    let items = parse_jsonl(&assert.get_output().stdout);

    let rows: Vec<_> = items
        .iter()
        .map(|i| (i["key"].as_str().unwrap(), i["status"].as_str().unwrap()))
        .collect();
    assert_eq!(rows, vec![("1-1", "malformed"), ("42-50", "valid")]);
}

#[test]
fn list_renders_markdown() {
    let temp = tempdir().unwrap();
    get(temp.path(), false);

    datacache(temp.path())
        .args(["list", "--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Artifacts"))
        .stdout(predicate::str::contains("**42-50**"))
        .stdout(predicate::str::contains("[valid]"));
}

#[test]
fn doctor_checks_cache_root() {
    let temp = tempdir().unwrap();

    let assert = datacache(temp.path()).arg("doctor").assert().success();
    let items = parse_jsonl(&assert.get_output().stdout);

    let checks: Vec<_> = items
        .iter()
        .map(|i| (i["key"].as_str().unwrap(), i["status"].as_str().unwrap()))
        .collect();
    assert_eq!(checks, vec![("cache_root", "present"), ("writable", "ok")]);
}
