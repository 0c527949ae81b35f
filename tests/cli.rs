//! CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn write_schema(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("schema.json");
    std::fs::write(
        &path,
        r#"{
            "models": [
                {
                    "name": "Product",
                    "fields": [
                        {"name": "sku", "typeName": "String"},
                        {"name": "price", "typeName": "Float"},
                        {"name": "currency", "typeName": "String"},
                        {"name": "stock", "typeName": "Int"},
                        {"name": "weight", "typeName": "Float"}
                    ]
                },
                {
                    "name": "ProductV2",
                    "fields": [
                        {"name": "sku", "typeName": "String"},
                        {"name": "price", "typeName": "Float"},
                        {"name": "currency", "typeName": "String"},
                        {"name": "stock", "typeName": "Int"},
                        {"name": "weight", "typeName": "Float"}
                    ]
                }
            ]
        }"#,
    )
    .unwrap();
    path
}

#[test]
fn audit_prints_a_text_summary() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(&dir);

    Command::cargo_bin("schemascope")
        .unwrap()
        .args(["audit", "--schema"])
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema Audit Report"))
        .stdout(predicate::str::contains("Overall:"))
        .stdout(predicate::str::contains("ProductV2"));
}

#[test]
fn audit_writes_json_reports() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(&dir);
    let output = dir.path().join("report.json");

    Command::cargo_bin("schemascope")
        .unwrap()
        .args(["audit", "--format", "json", "--schema"])
        .arg(&schema)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let body = std::fs::read_to_string(&output).unwrap();
    let report: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(report["overall_score"].is_number());
    assert!(body.contains("versioned-models"));
}

#[test]
fn missing_schema_file_fails_with_context() {
    Command::cargo_bin("schemascope")
        .unwrap()
        .args(["audit", "--schema", "/nonexistent/schema.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema"));
}

#[test]
fn print_default_config_round_trips_through_validate() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("schemascope.yml");

    let output = Command::cargo_bin("schemascope")
        .unwrap()
        .arg("print-default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("traversal"))
        .get_output()
        .stdout
        .clone();
    std::fs::write(&config, output).unwrap();

    Command::cargo_bin("schemascope")
        .unwrap()
        .arg("validate-config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.yml");
    std::fs::write(&config, "weights:\n  structure: -2.0\n").unwrap();

    Command::cargo_bin("schemascope")
        .unwrap()
        .arg("validate-config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("weights"));
}
