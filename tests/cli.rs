use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn studyfocus(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studyfocus").unwrap();
    cmd.env("STUDYFOCUS_HOME", home.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_status_when_idle() {
    let home = TempDir::new().unwrap();

    studyfocus(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready"))
        .stdout(predicate::str::contains("25:00"));
}

#[test]
fn test_start_persists_across_invocations() {
    let home = TempDir::new().unwrap();

    studyfocus(&home)
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus interval started"));

    assert!(home.path().join("timer.json").exists());
    assert!(home.path().join("studyfocus.db").exists());

    studyfocus(&home)
        .args(["status", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"focus\""))
        .stdout(predicate::str::contains("\"running\": true"));
}

#[test]
fn test_second_start_is_rejected() {
    let home = TempDir::new().unwrap();

    studyfocus(&home).arg("start").assert().success();
    studyfocus(&home)
        .arg("start")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot start a focus interval while in focus",
        ));
}

#[test]
fn test_complete_starts_break_and_logs_session() {
    let home = TempDir::new().unwrap();

    studyfocus(&home).arg("start").assert().success();
    studyfocus(&home)
        .arg("complete")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 min break started"));

    studyfocus(&home)
        .args(["history", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"))
        .stdout(predicate::str::contains("\"completed\": true"));

    studyfocus(&home)
        .arg("skip")
        .assert()
        .success()
        .stdout(predicate::str::contains("Break skipped"));
}

#[test]
fn test_pause_requires_running_timer() {
    let home = TempDir::new().unwrap();

    studyfocus(&home)
        .arg("pause")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot pause while idle"));
}

#[test]
fn test_config_focus_out_of_range() {
    let home = TempDir::new().unwrap();

    studyfocus(&home)
        .args(["config", "focus", "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the accepted range 1-60"));

    studyfocus(&home)
        .args(["config", "focus", "45m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus:      45 min"));
}

#[test]
fn test_config_file_sets_default_output() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  default_output: json\n",
    )
    .unwrap();

    studyfocus(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"timer\""));
}

#[test]
fn test_corrupt_state_file_falls_back_to_idle() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("timer.json"), "{ not json").unwrap();

    studyfocus(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready"));
}

#[test]
fn test_report_json() {
    let home = TempDir::new().unwrap();

    studyfocus(&home)
        .args(["report", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_sessions\": 0"));
}

#[test]
fn test_delete_missing_session() {
    let home = TempDir::new().unwrap();

    studyfocus(&home)
        .args(["delete", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();

    studyfocus(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studyfocus"));
}
