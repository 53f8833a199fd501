//! Integration tests for the `nostr-git` binary.
//!
//! These tests run the CLI against real git repositories under a temporary
//! root. HOME and XDG_CONFIG_HOME point into the temp dir so no user config
//! leaks in.

use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const OWNER: &str = "alice";
const REPO: &str = "notes";

struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            temp: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn root(&self) -> PathBuf {
        self.temp.path().join("root")
    }

    /// Initialize `<root>/<owner>/<repo>` with one commit on `main`.
    fn init_repo(&self, owner: &str, repo: &str) -> PathBuf {
        let dir = self.root().join(owner).join(repo);
        std::fs::create_dir_all(&dir).unwrap();
        run_git(&dir, &["init", "-q"]);
        run_git(&dir, &["config", "user.email", "test@example.com"]);
        run_git(&dir, &["config", "user.name", "Test User"]);
        run_git(&dir, &["config", "commit.gpgsign", "false"]);
        std::fs::write(dir.join("README.md"), "# Test Repo\n").unwrap();
        run_git(&dir, &["add", "README.md"]);
        run_git(&dir, &["commit", "-q", "-m", "Initial commit"]);
        run_git(&dir, &["branch", "-M", "main"]);
        dir
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// The binary, isolated from user configuration and rooted here.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("nostr-git").unwrap();
        cmd.env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.temp.path().join("xdg"))
            .env_remove("NOSTR_GIT_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--root")
            .arg(self.root());
        cmd
    }
}

fn run_git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn announcement_json(pubkey: &str, repo_id: &str, kind: u32) -> String {
    serde_json::json!({
        "id": "",
        "pubkey": pubkey,
        "created_at": 1_700_000_000u64,
        "kind": kind,
        "tags": [["d", repo_id], ["name", "Notes"]],
        "content": "",
        "sig": "",
    })
    .to_string()
}

#[test]
fn help_describes_the_tool() {
    Command::cargo_bin("nostr-git")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("branch operations"));
}

#[test]
fn list_dir_prints_branches() {
    let ws = Workspace::new();
    let dir = ws.init_repo(OWNER, REPO);

    ws.cmd()
        .args(["list", "--dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("  main"));
}

#[test]
fn list_dir_json() {
    let ws = Workspace::new();
    let dir = ws.init_repo(OWNER, REPO);

    let output = ws
        .cmd()
        .args(["--json", "list", "--dir"])
        .arg(&dir)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, serde_json::json!([{ "name": "main", "is_head": false }]));
}

#[test]
fn create_then_list() {
    let ws = Workspace::new();
    let dir = ws.init_repo(OWNER, REPO);

    ws.cmd()
        .args(["create", OWNER, REPO, "feature/sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 'feature/sync'"));

    ws.cmd()
        .args(["list", "--dir"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("feature/sync"));
}

#[test]
fn deleting_checked_out_branch_fails() {
    let ws = Workspace::new();
    ws.init_repo(OWNER, REPO);

    ws.cmd()
        .args(["delete", OWNER, REPO, "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("checked out"));
}

#[test]
fn traversal_in_owner_is_rejected() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["rename", "..", REPO, "a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn list_event_warns_when_remote_is_missing() {
    let ws = Workspace::new();
    let owner = "ab".repeat(32);
    ws.init_repo(&owner, "grasp");
    let event = ws.write(
        "event.json",
        &announcement_json(&"7e".repeat(32), &format!("{owner}:grasp"), 30617),
    );

    ws.cmd()
        .args(["list", "--event"])
        .arg(&event)
        .assert()
        .success()
        .stdout(predicate::str::contains("main"))
        .stderr(predicate::str::contains("remote 'origin' unavailable"));
}

#[test]
fn list_event_from_stdin() {
    let ws = Workspace::new();
    let pubkey = "7e".repeat(32);
    // "grasp" is not canonical on its own, so the publisher's key and name are used.
    ws.init_repo(&pubkey, "Notes");

    ws.cmd()
        .args(["--json", "list", "--event", "-"])
        .write_stdin(announcement_json(&pubkey, "grasp", 30617))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"unavailable\""));
}

#[test]
fn list_event_rejects_wrong_kind() {
    let ws = Workspace::new();
    let event = ws.write("event.json", &announcement_json(&"7e".repeat(32), "grasp", 1));

    ws.cmd()
        .args(["list", "--event"])
        .arg(&event)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected event kind 30617, found 1"));
}

#[test]
fn missing_explicit_config_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("--config")
        .arg(ws.temp.path().join("absent.toml"))
        .args(["list", "--dir", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
