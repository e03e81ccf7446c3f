use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `revive` with its config and session store inside a scratch directory
fn revive(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("revive").unwrap();
    cmd.env("REVIVE_HOME", home.path())
        .env_remove("REVIVE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_command() {
    let home = TempDir::new().unwrap();
    let mut cmd = revive(&home);
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Revive Fitness"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("membership"))
        .stdout(predicate::str::contains("admin"));
}

#[test]
fn test_version_command() {
    let home = TempDir::new().unwrap();
    let mut cmd = revive(&home);
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let home = TempDir::new().unwrap();
    let mut cmd = revive(&home);
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_revive"));
}

#[test]
fn test_open_static_page() {
    let home = TempDir::new().unwrap();
    let mut cmd = revive(&home);
    cmd.arg("open").arg("/about");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("About Revive Fitness"));
}

#[test]
fn test_protected_page_redirects_to_login() {
    let home = TempDir::new().unwrap();
    let mut cmd = revive(&home);
    cmd.arg("open").arg("membership/");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("/login"));
}

#[test]
fn test_admin_page_redirects_to_admin_login() {
    let home = TempDir::new().unwrap();
    let mut cmd = revive(&home);
    cmd.args(["admin", "stats"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("/adminlogin"));
}

#[test]
fn test_whoami_as_guest() {
    let home = TempDir::new().unwrap();
    let mut cmd = revive(&home);
    cmd.arg("whoami");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("You are not logged in."));
}

#[test]
fn test_unknown_page() {
    let home = TempDir::new().unwrap();
    let mut cmd = revive(&home);
    cmd.arg("open").arg("/nowhere");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Page not found"));
}

#[test]
fn test_config_init_writes_file() {
    let home = TempDir::new().unwrap();
    let mut cmd = revive(&home);
    cmd.args(["config", "init"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));

    let written = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(written.contains("base_url"));
}

#[test]
fn test_invalid_month_is_rejected() {
    let home = TempDir::new().unwrap();
    let mut cmd = revive(&home);
    cmd.args(["membership", "--month", "2024-13"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}
