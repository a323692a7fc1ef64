#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! End-to-end tests that run the `realize` binary against a temp project.

mod common;

use std::process::{Command, Output};

fn realize(project: &common::Project, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_realize"))
        .arg("--root")
        .arg(project.path())
        .args(args)
        .output()
        .expect("run realize")
}

#[test]
fn init_writes_settings_into_working_directory() {
    let project = common::Project::new();

    let out = realize(&project, &["init"]);

    assert!(out.status.success(), "{out:?}");
    assert!(project.namespaced().is_file());
}

#[test]
fn init_keeps_existing_settings_without_force() {
    let project = common::Project::new().with_namespaced("flimit: 5\n");

    assert!(realize(&project, &["init"]).status.success());
    assert_eq!(project.read(project.namespaced()), "flimit: 5\n");

    assert!(realize(&project, &["init", "--force"]).status.success());
    assert!(!project.read(project.namespaced()).contains("flimit"));
}

#[test]
fn clean_is_idempotent() {
    let project = common::Project::new().with_namespaced("flimit: 5\n");

    assert!(realize(&project, &["clean"]).status.success());
    assert!(!project.work_dir().exists());
    assert!(realize(&project, &["clean"]).status.success());
}

#[test]
fn token_prints_requested_letters() {
    let project = common::Project::new();

    let out = realize(&project, &["token", "12"]);

    assert!(out.status.success());
    let token = String::from_utf8(out.stdout).unwrap();
    let token = token.trim_end();
    assert_eq!(token.len(), 12);
    assert!(token.chars().all(|c| c.is_ascii_alphabetic()), "{token}");
}

#[test]
fn open_writes_session_header_and_log_lines() {
    let project = common::Project::new().with_namespaced(
        "files:\n  logs:\n    status: true\n    name: logs.log\nlegacy:\n  force: false\n  interval: 0s\n",
    );

    let out = realize(&project, &["open"]);

    assert!(out.status.success(), "{out:?}");
    let logs = project.read(".realize/logs.log");
    assert!(logs.contains("realize "), "{logs}");
    assert!(logs.contains("=========="), "{logs}");
}

#[test]
fn unopenable_resource_terminates_with_context() {
    let project = common::Project::new().with_namespaced(
        "files:\n  errors:\n    status: true\n    name: missing/errors.log\n",
    );

    let out = realize(&project, &["open"]);

    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    let ctx = stderr.find("open").expect("context on stderr");
    let err = stderr.find("I/O error").expect("error on stderr");
    assert!(ctx < err, "{stderr}");
}

#[test]
fn malformed_settings_terminate() {
    let project = common::Project::new().with_namespaced("flimit: [\n");

    let out = realize(&project, &["show"]);

    assert_eq!(out.status.code(), Some(1));
}
