use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn setup_test_directory() -> tempfile::TempDir {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(dir.path().join("b.log"), "b").unwrap();
    fs::write(dir.path().join("c.txt"), "c").unwrap();

    fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
    fs::write(dir.path().join("nested/a.txt"), "nested a").unwrap();
    fs::write(dir.path().join("nested/deeper/trace.log"), "trace").unwrap();

    dir
}

fn fileclean() -> Command {
    let mut cmd = Command::cargo_bin("fileclean").unwrap();
    cmd.arg("--quiet");
    cmd
}

#[test]
fn test_deletes_exact_name() {
    let dir = setup_test_directory();

    fileclean()
        .arg("--dir")
        .arg(dir.path())
        .arg("--name")
        .arg("a.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("files deleted: 1"));

    assert!(!dir.path().join("a.txt").exists());
    assert!(dir.path().join("b.log").exists());
    assert!(dir.path().join("c.txt").exists());
    // Not recursive, so the nested copy survives
    assert!(dir.path().join("nested/a.txt").exists());
}

#[test]
fn test_recursive_pattern_prunes_empty_dirs() {
    let dir = setup_test_directory();

    fileclean()
        .arg("-d")
        .arg(dir.path())
        .arg("-r")
        .arg("--reg")
        .arg(r"\.log$")
        .assert()
        .success()
        .stdout(predicate::str::contains("files deleted: 2"))
        .stdout(predicate::str::contains("directories removed: 1"));

    assert!(!dir.path().join("b.log").exists());
    assert!(!dir.path().join("nested/deeper").exists());
    assert!(dir.path().join("nested/a.txt").exists());
}

#[test]
fn test_all_with_exclude_keeps_matches() {
    let dir = setup_test_directory();

    fileclean()
        .arg("-d")
        .arg(dir.path())
        .arg("-a")
        .arg("-e")
        .arg("--name")
        .arg("c.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("files deleted: 2"));

    assert!(!dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.log").exists());
    assert!(dir.path().join("c.txt").exists());
}

#[test]
fn test_name_list_file() {
    let dir = setup_test_directory();
    let list_dir = tempdir().unwrap();
    let list = list_dir.path().join("names.txt");
    fs::write(&list, "b.log\n\nc.txt\n").unwrap();

    // The list replaces --name, so a.txt is kept
    fileclean()
        .arg("-d")
        .arg(dir.path())
        .arg("-f")
        .arg(&list)
        .arg("--name")
        .arg("a.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("files deleted: 2"));

    assert!(dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.log").exists());
    assert!(!dir.path().join("c.txt").exists());
}

#[test]
fn test_no_criteria_prints_usage() {
    let dir = setup_test_directory();

    fileclean()
        .arg("-d")
        .arg(dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage"))
        .stderr(predicate::str::contains("invalid configuration"));

    assert!(dir.path().join("a.txt").exists());
}

#[test]
fn test_missing_directory() {
    let dir = tempdir().unwrap();

    fileclean()
        .arg("-d")
        .arg(dir.path().join("missing"))
        .arg("--all")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown directory"));
}

#[test]
fn test_unreadable_name_list() {
    let dir = setup_test_directory();

    fileclean()
        .arg("-d")
        .arg(dir.path())
        .arg("-f")
        .arg(dir.path().join("no-such-list.txt"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read name list"));
}

#[test]
fn test_invalid_pattern_fails_run() {
    let dir = setup_test_directory();

    fileclean()
        .arg("-d")
        .arg(dir.path())
        .arg("--reg")
        .arg("(unclosed")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid pattern `(unclosed`"));

    assert!(dir.path().join("a.txt").exists());
}

#[test]
fn test_verbose_flag() {
    let dir = setup_test_directory();

    fileclean()
        .arg("-d")
        .arg(dir.path())
        .arg("--name")
        .arg("a.txt")
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed:"))
        .stderr(predicate::str::contains("a.txt"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("fileclean")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
