use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn rundoc() -> Command {
    Command::cargo_bin("rundoc").unwrap()
}

#[test]
fn test_cli_help() {
    rundoc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Runnable documentation"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    rundoc().arg("--version").assert().success();
}

#[test]
fn test_missing_subcommand() {
    rundoc().assert().failure();
}

#[test]
fn test_list_documents() {
    rundoc()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("RUNDOC"))
        .stdout(predicate::str::contains("Bug Report"))
        .stdout(predicate::str::contains("Pull request template"));
}

#[test]
fn test_plan_readme() {
    rundoc()
        .args(["plan", "--doc-name", "RUNDOC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 executable command(s)"))
        .stdout(predicate::str::contains("Command: cargo test"));
}

#[test]
fn test_plan_json() {
    let output = rundoc()
        .args(["plan", "--doc-name", "RUNDOC", "--section", "Development", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plans: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plans.as_array().unwrap().len(), 2);
    assert_eq!(plans[0]["shell"], "bash");
    assert_eq!(plans[0]["context"]["name"], "Development");
}

#[test]
fn test_plan_unknown_section_fails() {
    rundoc()
        .args(["plan", "--doc-name", "RUNDOC", "--section", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no executable blocks found for section 'Nope'"));
}

#[test]
fn test_unknown_document_fails() {
    rundoc()
        .args(["plan", "--doc-name", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document 'missing' not found"));
}

#[test]
fn test_render_then_compare() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("README.md");
    let path = path.to_str().unwrap();

    rundoc()
        .args(["render", "--doc-name", "RUNDOC", "--path", path])
        .assert()
        .success();

    let rendered = fs::read_to_string(path).unwrap();
    assert!(rendered.starts_with("# RUNDOC\n"));

    rundoc()
        .args(["compare", "--doc-name", "RUNDOC", "--path", path])
        .assert()
        .success()
        .stderr(predicate::str::contains("File matches"));

    fs::write(path, format!("{}\nlocal edit\n", rendered)).unwrap();

    rundoc()
        .args(["compare", "--doc-name", "RUNDOC", "--path", path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Content mismatch detected"));
}

#[test]
fn test_run_blocked_by_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    // bash를 허용하지 않으므로 실행 전에 거부됨
    fs::write(&config, "allowed_shells = [\"sh\"]\n").unwrap();

    rundoc()
        .args(["run", "--doc-name", "RUNDOC", "--section", "Development"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Command blocked for security"))
        .stderr(predicate::str::contains("2 out of 2 commands failed"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "timeout_secs = \"soon\"\n").unwrap();

    rundoc()
        .args(["list", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}
