#![allow(deprecated)]

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use uuid::Uuid;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn docgrade() -> Command {
    let mut cmd = Command::cargo_bin("docgrade").expect("binary exists");
    cmd.env_remove("DOCGRADE_MONGO_URL")
        .env_remove("DOCGRADE_DB")
        .env_remove("DOCGRADE_COLLECTION")
        .env_remove("DOCGRADE_TIMEOUT_SECS");
    cmd
}

fn stdout_of(cmd: &mut Command, success: bool) -> String {
    let assert = if success {
        cmd.assert().success()
    } else {
        cmd.assert().code(1)
    };
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

#[test]
fn full_export_scores_seventy_and_exits_zero() {
    let stdout = stdout_of(docgrade().arg("--from-json").arg(fixture("employees_full.json")), true);

    assert!(stdout.starts_with("========== MongoDB Query Lab Auto-Report =========="));
    assert_eq!(stdout.matches(": PASS (").count(), 7);
    assert!(stdout.trim_end().ends_with("TOTAL SCORE: 70 / 70"));
}

#[test]
fn text_salary_export_loses_schema_points() {
    let stdout = stdout_of(
        docgrade()
            .arg("--from-json")
            .arg(fixture("employees_text_salary.json")),
        false,
    );

    assert!(stdout.contains(
        "Schema Check: FAIL (Missing or invalid types for name, department, salary, or age; \
         document #3 has `salary` as a string)"
    ));
    assert!(stdout.contains("TOTAL SCORE: 60 / 70"));
}

#[test]
fn sparse_export_reports_each_missing_piece() {
    let stdout = stdout_of(docgrade().arg("--from-json").arg(fixture("employees_sparse.json")), false);

    assert!(stdout.contains("Exercise 1: FAIL (Expected 5+ documents, found 2)"));
    assert!(stdout.contains("Schema Check: PASS (All fields valid)"));
    assert!(stdout.contains("Exercise 3 Data: FAIL (Only 1 distinct departments found, expected 2+)"));
    assert!(stdout.contains("> 50k: true, < 30k: false"));
    assert!(stdout.contains("TOTAL SCORE: 30 / 70"));
}

#[test]
fn unreadable_source_prints_one_critical_line() {
    let stdout = stdout_of(docgrade().arg("--from-json").arg(fixture("does_not_exist.json")), false);

    let body: Vec<&str> = stdout
        .lines()
        .filter(|line| !line.starts_with("=====") && !line.starts_with("-----"))
        .collect();
    assert_eq!(body.len(), 2, "{stdout}");
    assert!(body[0].starts_with("CRITICAL: Failed to connect or query database. "));
    assert_eq!(body[1], "TOTAL SCORE: 0 / 70");
}

#[test]
fn unreachable_server_is_a_critical_failure() {
    let stdout = stdout_of(
        docgrade()
            .args(["--uri", "mongodb://127.0.0.1:1/?directConnection=true"])
            .args(["--timeout", "1"]),
        false,
    );

    assert_eq!(stdout.matches("CRITICAL: ").count(), 1);
    assert!(stdout.contains("TOTAL SCORE: 0 / 70"));
}

#[test]
fn gradescope_results_are_written() {
    let out = std::env::temp_dir()
        .join(format!("docgrade-{}", Uuid::new_v4()))
        .join("results.json");

    docgrade()
        .arg("--from-json")
        .arg(fixture("employees_sparse.json"))
        .arg("--gradescope")
        .arg(&out)
        .assert()
        .code(1);

    let results: Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("results written")).expect("json");
    assert_eq!(results["score"], 30.0);

    let tests = results["tests"].as_array().expect("tests array");
    assert_eq!(tests.len(), 7);
    assert_eq!(tests[0]["name"], "Exercise 1");
    assert_eq!(tests[0]["status"], "failed");
    assert_eq!(tests[1]["status"], "passed");
    assert_eq!(tests[1]["max_score"], 10.0);

    let _ = fs::remove_dir_all(out.parent().expect("temp dir"));
}

#[test]
fn gradescope_results_carry_critical_failures() {
    let out = std::env::temp_dir()
        .join(format!("docgrade-{}", Uuid::new_v4()))
        .join("results.json");

    docgrade()
        .arg("--from-json")
        .arg(fixture("does_not_exist.json"))
        .arg("--gradescope")
        .arg(&out)
        .args(["--visibility", "after_published"])
        .assert()
        .code(1);

    let results: Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("results written")).expect("json");
    assert_eq!(results["score"], 0.0);
    assert!(
        results["output"]
            .as_str()
            .expect("output text")
            .starts_with("CRITICAL: Failed to connect or query database. ")
    );
    assert_eq!(results["tests"], serde_json::json!([]));
    assert_eq!(results["visibility"], "after_published");

    let _ = fs::remove_dir_all(out.parent().expect("temp dir"));
}

#[test]
fn unknown_visibility_is_rejected() {
    docgrade()
        .arg("--from-json")
        .arg(fixture("employees_full.json"))
        .args(["--visibility", "someday"])
        .assert()
        .failure();
}

#[test]
fn flags_override_environment() {
    let stdout = stdout_of(
        docgrade()
            .env("DOCGRADE_MONGO_URL", "mongodb://127.0.0.1:1/?directConnection=true")
            .env("DOCGRADE_TIMEOUT_SECS", "1")
            .env("DOCGRADE_DB", "envDB")
            .env("DOCGRADE_COLLECTION", "staff")
            .args(["--db", "flagDB"]),
        false,
    );

    assert!(stdout.contains("`flagDB.staff`"), "{stdout}");
    assert!(!stdout.contains("envDB"), "{stdout}");
}

#[test]
fn table_goes_to_stderr() {
    let assert = docgrade()
        .arg("--from-json")
        .arg(fixture("employees_full.json"))
        .arg("--table")
        .assert()
        .success();
    let output = assert.get_output();
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("Grading Overview"));
    assert!(stderr.contains("Total: 70/70"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Grading Overview"));
}
