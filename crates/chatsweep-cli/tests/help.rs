use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn chatsweep() -> Command {
    Command::cargo_bin("chatsweep").unwrap()
}

#[test]
fn test_help_lists_command_groups() {
    chatsweep()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("project")
                .and(predicate::str::contains("workspace"))
                .and(predicate::str::contains("session"))
                .and(predicate::str::contains("trash")),
        );
}

#[test]
fn test_unknown_sort_field_is_rejected() {
    chatsweep()
        .args(["project", "sessions", "/src/app", "--sort", "size"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sort field 'size'"));
}
