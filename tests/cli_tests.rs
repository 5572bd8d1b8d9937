use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn containerize() -> Command {
    let mut cmd = Command::cargo_bin("containerize").unwrap();
    // Keep the user's own config file out of the way
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("containerize-tests-no-config"));
    cmd
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn flask_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "requirements.txt", "flask==2.3.0\nredis>=4\n");
    write(
        dir.path(),
        "app.py",
        "import os\nfrom flask import Flask\napp = Flask(__name__)\nSECRET = os.environ.get('SECRET_KEY')\napp.run(port=5000)\n",
    );
    dir
}

#[test]
fn analyze_json_reports_flask_stack() {
    let repo = flask_repo();
    let output = containerize()
        .args(["analyze", "--json"])
        .arg(repo.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let analysis: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(analysis["language"], "Python");
    assert_eq!(analysis["framework"], "flask");
    assert_eq!(analysis["port"], 5000);
    assert!(analysis["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .any(|dep| dep == "flask"));
    assert!(analysis["environment_variables"]["SECRET_KEY"].is_string());
}

#[test]
fn analyze_summary_view() {
    let repo = flask_repo();
    containerize()
        .args(["analyze", "--display", "summary"])
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Port: 5000"));
}

#[test]
fn analyze_missing_path_fails() {
    containerize()
        .args(["analyze", "/definitely/not/a/real/path"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn analyze_empty_repository_fails() {
    let dir = TempDir::new().unwrap();
    containerize()
        .arg("analyze")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn generate_writes_all_files() {
    let repo = flask_repo();
    let out = TempDir::new().unwrap();

    containerize()
        .arg("generate")
        .arg(repo.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();

    for name in [
        "Dockerfile",
        "docker-compose.yml",
        "container-config.yml",
        ".env.example",
        "CONTAINERIZATION_README.md",
    ] {
        assert!(out.path().join(name).is_file(), "missing {}", name);
    }

    let dockerfile = fs::read_to_string(out.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("EXPOSE 5000"));

    let compose = fs::read_to_string(out.path().join("docker-compose.yml")).unwrap();
    assert!(compose.contains("redis:7-alpine"));
}

#[test]
fn generate_refuses_to_overwrite_without_force() {
    let repo = flask_repo();
    // A second Python file keeps the existing Dockerfile from tying the language vote
    write(repo.path(), "wsgi.py", "from app import app\n");
    write(repo.path(), "Dockerfile", "FROM scratch\n");

    containerize()
        .args(["generate", "--dockerfile"])
        .arg(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refusing to overwrite"));
    assert_eq!(fs::read_to_string(repo.path().join("Dockerfile")).unwrap(), "FROM scratch\n");

    containerize()
        .args(["generate", "--dockerfile", "--force"])
        .arg(repo.path())
        .assert()
        .success();
    assert!(fs::read_to_string(repo.path().join("Dockerfile"))
        .unwrap()
        .contains("python:3.11-slim"));
}

#[test]
fn generate_conflict_writes_nothing() {
    let repo = flask_repo();
    write(repo.path(), ".env.example", "SECRET_KEY=\n");

    containerize()
        .arg("generate")
        .arg(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(".env.example"));

    assert!(!repo.path().join("Dockerfile").exists());
    assert!(!repo.path().join("docker-compose.yml").exists());
    assert!(!repo.path().join("container-config.yml").exists());
    assert_eq!(
        fs::read_to_string(repo.path().join(".env.example")).unwrap(),
        "SECRET_KEY=\n"
    );
}

#[test]
fn generate_dry_run_writes_nothing() {
    let repo = flask_repo();
    let out = TempDir::new().unwrap();

    containerize()
        .args(["generate", "--config-file", "--format", "json", "--dry-run"])
        .arg(repo.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- container-config.json (dry run) ---"))
        .stdout(predicate::str::contains("\"image_name\""));

    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn support_lists_languages_and_frameworks() {
    containerize()
        .arg("support")
        .assert()
        .success()
        .stdout(predicate::str::contains("Python"))
        .stdout(predicate::str::contains("django"));

    containerize()
        .args(["support", "--languages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frameworks").not());
}

#[test]
fn config_prints_toml_and_honours_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("containerize.toml");
    fs::write(&path, "[analysis]\nmax_source_files = 7\n").unwrap();

    containerize()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_source_files = 7"))
        .stdout(predicate::str::contains("[generation]"));
}

#[test]
fn missing_config_file_is_an_error() {
    containerize()
        .args(["--config", "/no/such/config.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
