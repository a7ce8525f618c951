//! Integration tests for the pwvault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`. Each
//! test runs in its own temp dir so no `.pwvault.toml` or store file
//! leaks between them. Secrets are piped on stdin or passed inline to
//! avoid interactive prompts.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the pwvault binary, isolated in `dir`.
fn pwvault(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("pwvault").expect("binary should exist");
    cmd.current_dir(dir.path())
        .env_remove("PWVAULT_USER")
        .env("PWVAULT_APP_SECRET", "cli-test-secret")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    pwvault(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Client-side encrypted password vault"))
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    pwvault(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pwvault"));
}

#[test]
fn no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    pwvault(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn check_reports_support() {
    let tmp = TempDir::new().unwrap();
    pwvault(&tmp)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("AES-256-GCM"));
}

#[test]
fn encrypt_then_decrypt() {
    let tmp = TempDir::new().unwrap();

    let blob = stdout_of(
        pwvault(&tmp)
            .args(["--user", "user-123", "encrypt"])
            .write_stdin("MyGmail123!\n"),
    );
    let blob = blob.trim();
    assert!(!blob.contains("MyGmail123!"));

    pwvault(&tmp)
        .args(["--user", "user-123", "decrypt", blob])
        .assert()
        .success()
        .stdout("MyGmail123!\n");
}

#[test]
fn decrypt_as_other_user_shows_generic_error() {
    let tmp = TempDir::new().unwrap();

    let blob = stdout_of(pwvault(&tmp).args(["-u", "user-123", "encrypt", "secret"]));

    pwvault(&tmp)
        .args(["-u", "user-456", "decrypt", blob.trim()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not process this entry"))
        .stderr(predicate::str::contains("aead").not());
}

#[test]
fn user_can_come_from_env() {
    let tmp = TempDir::new().unwrap();
    let blob = stdout_of(
        pwvault(&tmp)
            .env("PWVAULT_USER", "env-user")
            .args(["encrypt", "from-env"]),
    );

    pwvault(&tmp)
        .args(["--user", "env-user", "decrypt", blob.trim()])
        .assert()
        .success()
        .stdout("from-env\n");
}

#[test]
fn encrypt_without_user_fails() {
    let tmp = TempDir::new().unwrap();
    pwvault(&tmp)
        .args(["encrypt", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no user id"));
}

#[test]
fn malformed_blob_fails() {
    let tmp = TempDir::new().unwrap();
    pwvault(&tmp)
        .args(["-u", "user-1", "decrypt", "not-valid-base64!!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not process this entry"));
}

#[test]
fn generate_default_length() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(pwvault(&tmp).arg("generate"));
    assert_eq!(out.trim_end_matches('\n').chars().count(), 12);
}

#[test]
fn generate_respects_flags() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(pwvault(&tmp).args([
        "generate",
        "--length",
        "20",
        "--no-symbols",
        "--no-uppercase",
        "--no-lowercase",
    ]));
    let pw = out.trim_end_matches('\n');
    assert_eq!(pw.len(), 20);
    assert!(pw.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn generate_rejects_short_length() {
    let tmp = TempDir::new().unwrap();
    pwvault(&tmp)
        .args(["generate", "--length", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 12 and 50"));
}

#[test]
fn add_list_show_delete() {
    let tmp = TempDir::new().unwrap();

    let out = stdout_of(
        pwvault(&tmp)
            .args(["-u", "user-1", "add", "Gmail", "--username", "me@example.com"])
            .write_stdin("MyGmail123!\n"),
    );
    let id = out
        .lines()
        .find_map(|l| l.split("Id: ").nth(1))
        .expect("add prints the new id")
        .trim()
        .to_string();

    let store = std::fs::read_to_string(tmp.path().join("pwvault.json")).unwrap();
    assert!(!store.contains("MyGmail123!"));

    pwvault(&tmp)
        .args(["-u", "user-1", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gmail"))
        .stdout(predicate::str::contains("MyGmail123!").not());

    pwvault(&tmp)
        .args(["-u", "user-1", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("MyGmail123!"));

    // Another user cannot see it.
    pwvault(&tmp)
        .args(["-u", "user-2", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    pwvault(&tmp)
        .args(["-u", "user-1", "delete", &id, "--force"])
        .assert()
        .success();

    pwvault(&tmp)
        .args(["-u", "user-1", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries"));
}

#[test]
fn config_file_selects_store_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(".pwvault.toml"),
        "store_file = \"custom.json\"\naad_binding = \"user-id\"\n",
    )
    .unwrap();

    pwvault(&tmp)
        .args(["-u", "user-1", "add", "Bank", "--generate"])
        .assert()
        .success();

    assert!(tmp.path().join("custom.json").exists());
    assert!(!tmp.path().join("pwvault.json").exists());
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    pwvault(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pwvault"));
}
