use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn sysdig_sarif_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sysdig-sarif").expect("binary builds");
    cmd.env_remove("RUST_LOG")
        .env_remove("SYSDIG_SARIF_LOG_LEVEL")
        .env_remove("SYSDIG_SARIF_LOG_FILE");
    cmd
}

fn sample_report() -> Value {
    json!({
        "scanner": { "version": "1.8.0" },
        "info": {
            "resultUrl": "https://secure.sysdig.com/#/scanning/results/r1/overview",
            "resultId": "r1"
        },
        "result": {
            "metadata": {
                "pullString": "registry.example.com/app:2.4",
                "digest": "sha256:1111",
                "imageId": "sha256:2222",
                "architecture": "amd64",
                "baseOs": "debian 12.2",
                "os": "linux",
                "size": 81234567,
                "layersCount": 5
            },
            "packages": [
                {
                    "name": "zlib1g",
                    "version": "1:1.2.13",
                    "type": "os",
                    "path": "/var/lib/dpkg/status"
                },
                {
                    "name": "openssl",
                    "version": "1.1.1",
                    "type": "os",
                    "path": "/var/lib/dpkg/status",
                    "vulns": [
                        {
                            "name": "CVE-2021-1234",
                            "severity": { "value": "Critical" },
                            "cvssScore": { "value": { "score": 9.8, "version": "3.1", "vector": "AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H" } },
                            "exploitable": false
                        }
                    ]
                },
                {
                    "name": "libssl1.1",
                    "version": "1.1.1",
                    "type": "os",
                    "path": "/var/lib/dpkg/status",
                    "vulns": [
                        {
                            "name": "CVE-2021-1234",
                            "severity": { "value": "Critical" },
                            "cvssScore": { "value": { "score": 9.8, "version": "3.1", "vector": "AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H" } },
                            "fixedInVersion": "1.1.1n",
                            "exploitable": true
                        },
                        {
                            "name": "CVE-2022-0778",
                            "severity": { "value": "Low" },
                            "cvssScore": { "value": { "score": 3.7, "version": "3.1", "vector": "AV:N/AC:H" } },
                            "exploitable": false,
                            "acceptedRisks": [{ "id": "risk-1" }]
                        }
                    ]
                },
                {
                    "name": "jackson-databind",
                    "version": "2.13.0",
                    "type": "java",
                    "path": "/app/lib/jackson-databind-2.13.0.jar",
                    "vulns": [
                        {
                            "name": "CVE-2022-42003",
                            "severity": { "value": "High" },
                            "cvssScore": { "value": { "score": 7.5, "version": "3.1", "vector": "AV:N/AC:L" } },
                            "exploitable": false
                        }
                    ]
                }
            ]
        }
    })
}

fn write_report(dir: &Path, report: &Value) -> PathBuf {
    let path = dir.join("report.json");
    std::fs::write(&path, serde_json::to_vec(report).expect("serialize")).expect("write report");
    path
}

fn run_ok(args: &[&str], report: &Value) -> Value {
    let dir = TempDir::new().expect("temp dir");
    let path = write_report(dir.path(), report);
    let output = sysdig_sarif_cmd()
        .arg(&path)
        .args(args)
        .output()
        .expect("run binary");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn rule_ids(sarif: &Value) -> Vec<String> {
    sarif["runs"][0]["tool"]["driver"]["rules"]
        .as_array()
        .expect("rules")
        .iter()
        .map(|rule| rule["id"].as_str().expect("id").to_string())
        .collect()
}

fn result_rule_ids(sarif: &Value) -> Vec<String> {
    sarif["runs"][0]["results"]
        .as_array()
        .expect("results")
        .iter()
        .map(|result| result["ruleId"].as_str().expect("ruleId").to_string())
        .collect()
}

#[test]
fn converts_report_to_sarif_on_stdout() {
    let sarif = run_ok(&[], &sample_report());
    assert_eq!(sarif["version"], "2.1.0");
    assert_eq!(sarif["$schema"], "https://json.schemastore.org/sarif-2.1.0.json");
    assert_eq!(rule_ids(&sarif), vec!["CVE-2021-1234", "CVE-2022-0778", "CVE-2022-42003"]);
    assert_eq!(
        result_rule_ids(&sarif),
        vec!["CVE-2021-1234", "CVE-2021-1234", "CVE-2022-0778", "CVE-2022-42003"]
    );

    let run = &sarif["runs"][0];
    assert_eq!(run["tool"]["driver"]["version"], "1.8.0");
    assert_eq!(run["tool"]["driver"]["rules"][0]["name"], "os");
    assert_eq!(run["tool"]["driver"]["rules"][0]["defaultConfiguration"]["level"], "error");
    assert_eq!(run["results"][2]["level"], "note");
    assert_eq!(run["results"][3]["level"], "error");
    assert_eq!(
        run["results"][1]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
        "registry.example.com/app:2.4"
    );
    assert_eq!(run["properties"]["layersCount"], "5");
}

#[test]
fn skipped_packages_are_logged_to_stderr() {
    let dir = TempDir::new().unwrap();
    let path = write_report(dir.path(), &sample_report());
    sysdig_sarif_cmd()
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Package: zlib1g has no vulnerabilities...skipping...",
        ))
        .stdout(predicate::str::starts_with("{\"version\":\"2.1.0\""));
}

#[test]
fn debug_log_level_is_accepted() {
    let dir = TempDir::new().unwrap();
    let path = write_report(dir.path(), &sample_report());
    sysdig_sarif_cmd()
        .arg(&path)
        .args(["--log-level", "DEBUG"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn log_file_receives_logs() {
    let dir = TempDir::new().unwrap();
    let path = write_report(dir.path(), &sample_report());
    let log_path = dir.path().join("report.log");
    sysdig_sarif_cmd()
        .arg(&path)
        .arg("--log-file")
        .arg(&log_path)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    let logs = std::fs::read_to_string(&log_path).unwrap();
    assert!(logs.contains("Loading"));
}

#[test]
fn writes_output_file() {
    let dir = TempDir::new().unwrap();
    let path = write_report(dir.path(), &sample_report());
    let out = dir.path().join("out.sarif");
    sysdig_sarif_cmd()
        .arg(&path)
        .arg("--output-filename")
        .arg(&out)
        .arg("--pretty")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let sarif: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(rule_ids(&sarif).len(), 3);
}

#[test]
fn filters_by_type_and_severity() {
    let sarif = run_ok(&["--type", "java"], &sample_report());
    assert_eq!(rule_ids(&sarif), vec!["CVE-2022-42003"]);

    let sarif = run_ok(&["--min-severity", "high", "--not-type", "java"], &sample_report());
    assert_eq!(rule_ids(&sarif), vec!["CVE-2021-1234"]);
    assert_eq!(result_rule_ids(&sarif).len(), 2);

    let sarif = run_ok(&["--exclude-accepted"], &sample_report());
    assert!(!rule_ids(&sarif).contains(&"CVE-2022-0778".to_string()));
}

#[test]
fn groups_by_package() {
    let sarif = run_ok(&["--group-by-package"], &sample_report());
    assert_eq!(rule_ids(&sarif), vec!["openssl", "libssl1.1", "jackson-databind"]);
    assert_eq!(result_rule_ids(&sarif).len(), 3);
}

#[test]
fn missing_file_fails_without_output() {
    let dir = TempDir::new().unwrap();
    sysdig_sarif_cmd()
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to read file"));
}

#[test]
fn invalid_json_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    sysdig_sarif_cmd()
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid JSON file"));
}

#[test]
fn foreign_json_is_a_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = write_report(dir.path(), &json!({ "metadata": {}, "policies": [] }));
    sysdig_sarif_cmd()
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("JSON file is not from sysdig-cli-scanner"))
        .stderr(predicate::str::contains("missing required key `scanner`"));
}

#[test]
fn missing_filename_prints_usage() {
    sysdig_sarif_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
