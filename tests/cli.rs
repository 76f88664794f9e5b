#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn rota(file: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("rota-cli").unwrap();
    cmd.env_remove("ROTA_FILE").arg("--file").arg(file);
    cmd
}

#[test]
fn sample_file_is_printed() {
    Command::cargo_bin("rota-cli")
        .unwrap()
        .arg("sample-file")
        .assert()
        .success()
        .stdout(predicate::str::contains("#"))
        .stdout(predicate::str::contains("PERSON"))
        .stdout(predicate::str::contains("DATE"));
}

#[test]
fn add_people_then_assign() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("support.txt");
    fs::write(&file, "# team rota\n").unwrap();

    for (id, name) in [("xxx", "Mr X"), ("yyy", "Mr Y"), ("zzz", "Mr Z")] {
        rota(&file)
            .args(["add-person", id, name, "0"])
            .assert()
            .success();
    }
    rota(&file)
        .args(["set-wfh-days", "xxx", "Mon"])
        .assert()
        .success();

    rota(&file)
        .args(["assign", "--count", "3", "--today", "20171127"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20171128 Tue xxx"))
        .stdout(predicate::str::contains("20171130 Thu zzz"));

    let text = fs::read_to_string(&file).unwrap();
    assert!(text.starts_with("# team rota\n"));
    assert!(text.contains("20171129 | Wed | yyy"));

    rota(&file)
        .args(["show", "--from", "20171129"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20171129"))
        .stdout(predicate::str::contains("20171128").not());

    rota(&file)
        .args(["summary", "--no-score"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STATUS zzz"))
        .stdout(predicate::str::contains("SCORE").not());
}

#[test]
fn holidays_then_check() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("support.txt");
    fs::write(
        &file,
        "PERSON | NAME | INITIAL_SCORE | RECURRING_WFH_DAYS\nxxx | Mr X | 0 |\n\
         DATE | DOW | ONCALL | UNAVAILABLE | HOLIDAYS\n20171127 | Mon | xxx | |\n",
    )
    .unwrap();

    rota(&file)
        .args(["check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no conflicts"));
    rota(&file)
        .args(["set-holidays", "xxx", "20171127", "1"])
        .assert()
        .success();
    rota(&file)
        .args(["check"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("on-holidays"));
}

#[test]
fn weekend_edits_are_refused() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("support.txt");
    let original = "PERSON | NAME | INITIAL_SCORE | RECURRING_WFH_DAYS\nxxx | Mr X | 0 |\n";
    fs::write(&file, original).unwrap();

    for cmd in ["set-oncall", "set-unavailable", "set-holidays"] {
        rota(&file)
            .args([cmd, "xxx", "20171125", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("business days"));
    }
    assert_eq!(fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn assign_with_empty_roster_fails_without_touching_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("support.txt");
    let original = "# nobody yet\n\nDATE | DOW | ONCALL | UNAVAILABLE | HOLIDAYS\n20171127 | Mon | xxx | |\n";
    fs::write(&file, original).unwrap();

    rota(&file)
        .args(["assign", "--today", "20171127"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not find a solution for 20171128"));
    assert_eq!(fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn malformed_file_is_reported() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("support.txt");
    fs::write(
        &file,
        "PERSON | NAME | INITIAL_SCORE | RECURRING_WFH_DAYS\nxxx | Mr X\n",
    )
    .unwrap();
    rota(&file)
        .args(["show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().unwrap();
    rota(&dir.path().join("absent.txt"))
        .args(["show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sample-file"));
}
