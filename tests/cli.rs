use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A command isolated from the user's config, data and terminal colors.
fn msms(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("msms").unwrap();
    cmd.current_dir(dir)
        .env("MSMS_CONFIG", dir.join("no-config.json"))
        .env_remove("MSMS_DATA")
        .env_remove("MSMS_CARDS_DIR")
        .env_remove("MSMS_LOG")
        .env("NO_COLOR", "1")
        .arg("--data")
        .arg(dir.join("msms.json"));
    cmd
}

fn school() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    msms(dir.path())
        .args(["teacher", "add", "--name", "Ms. Smith", "--subject", "Piano"])
        .assert()
        .success();
    msms(dir.path())
        .args(["student", "add", "--name", "Alice", "--grade", "92"])
        .assert()
        .success();
    dir
}

#[test]
fn self_test_passes_without_touching_data() {
    let dir = tempfile::tempdir().unwrap();
    msms(dir.path())
        .arg("--self-test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-test passed"));
    assert!(!dir.path().join("msms.json").exists());
}

#[test]
fn first_run_creates_the_data_file() {
    let dir = tempfile::tempdir().unwrap();
    msms(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stderr(predicate::str::contains("created new file"))
        .stdout(predicate::str::contains("Teachers:           0"));
    assert!(dir.path().join("msms.json").exists());
}

#[test]
fn add_reports_the_new_ids() {
    let dir = tempfile::tempdir().unwrap();
    msms(dir.path())
        .args(["teacher", "add", "--name", "Ms. Smith", "--subject", "Piano"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Teacher 'Ms. Smith' added with ID 1"));
    msms(dir.path())
        .args(["student", "add", "--name", "Alice", "--grade", "92"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student 'Alice' added with ID 1"));
    msms(dir.path())
        .args(["student", "add", "--name", "Bob", "--grade", "75.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added with ID 2"));
}

#[test]
fn invalid_grade_fails_and_saves_nothing() {
    let dir = school();
    let before = fs::read_to_string(dir.path().join("msms.json")).unwrap();

    msms(dir.path())
        .args(["student", "add", "--name", "Bob", "--grade", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));
    msms(dir.path())
        .args(["student", "add", "--name", "Bob", "--grade", "-5"])
        .assert()
        .failure();

    let after = fs::read_to_string(dir.path().join("msms.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn partial_update_keeps_other_fields() {
    let dir = school();
    msms(dir.path())
        .args(["teacher", "update", "1", "--subject", "Vocal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ms. Smith (ID 1, Vocal)"));
}

#[test]
fn unknown_ids_exit_nonzero() {
    let dir = school();
    msms(dir.path())
        .args(["teacher", "remove", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Teacher ID 99 not found"));
    msms(dir.path())
        .args(["check-in", "99", "Piano101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Student ID 99 not found"));
}

#[test]
fn check_in_shows_up_in_history_and_stats() {
    let dir = school();
    msms(dir.path())
        .args(["check-in", "1", "Piano101"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice (ID 1) checked in for Piano101"));

    msms(dir.path())
        .args(["attendance", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Piano101  Alice"));

    let output = msms(dir.path())
        .args(["stats", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["teacher_count"], 1);
    assert_eq!(stats["student_count"], 1);
    assert_eq!(stats["attendance_count"], 1);
    assert_eq!(stats["average_grade"], 92.0);
    assert_eq!(stats["check_ins_by_course"]["Piano101"], 1);
}

#[test]
fn removing_a_student_keeps_attendance() {
    let dir = school();
    msms(dir.path())
        .args(["check-in", "1", "Piano101"])
        .assert()
        .success();
    msms(dir.path())
        .args(["student", "remove", "1"])
        .assert()
        .success();

    let output = msms(dir.path())
        .args(["stats", "--json"])
        .output()
        .unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["student_count"], 0);
    assert_eq!(stats["attendance_count"], 1);
    assert_eq!(stats["orphaned_attendance"], 1);
    assert_eq!(stats["average_grade"], 0.0);
}

#[test]
fn card_goes_to_the_cards_dir_by_default() {
    let dir = school();
    msms(dir.path())
        .env("MSMS_CARDS_DIR", dir.path().join("cards"))
        .args(["card", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("student_1_card.txt"));

    let card = fs::read_to_string(dir.path().join("cards").join("student_1_card.txt")).unwrap();
    assert!(card.contains("Name: Alice"));
    assert!(card.contains("Grade: 92"));
}

#[test]
fn card_honours_explicit_output() {
    let dir = school();
    let output = dir.path().join("alice.txt");
    msms(dir.path())
        .args(["card", "1", "--output"])
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());

    msms(dir.path())
        .args(["card", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Student ID 7 not found"));
}

#[test]
fn corrupt_data_file_is_recovered() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("msms.json"), "garbage").unwrap();

    msms(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stderr(predicate::str::contains("unreadable or invalid"))
        .stderr(predicate::str::contains("starting empty").not());
    assert_eq!(
        fs::read_to_string(dir.path().join("msms.json.corrupt")).unwrap(),
        "garbage"
    );
}

#[test]
fn menu_without_a_terminal_points_to_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    msms(dir.path())
        .write_stdin("10\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a terminal"));
}
