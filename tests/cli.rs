//! End-to-end tests for the `archive` binary.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn archive_cmd(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("archive").unwrap();
    cmd.env_remove("ARCHIVE_DB")
        .env_remove("ARCHIVE_PATH")
        .env_remove("ARCHIVE_TEST_DB")
        .env_remove("RUST_LOG")
        .arg("--archive")
        .arg(db);
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("--json").output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_store_load_delete_scenario() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("data").join("archive.db");
    let input = dir.path().join("note.txt");
    let output = dir.path().join("out.txt");

    let revision = stdout_json(archive_cmd(&db).arg("revision"));
    assert_eq!(revision["revision"], 0);

    archive_cmd(&db)
        .args(["load", "/"])
        .arg(&output)
        .assert()
        .failure()
        .code(3);

    fs::write(&input, "this is a plain text").unwrap();
    let stored = stdout_json(archive_cmd(&db).args(["store", "/"]).arg(&input));
    assert_eq!(stored["id"], "/");
    assert_eq!(stored["revision"], 1);
    assert_eq!(stored["attributes"]["Type"], "text/plain");
    assert_eq!(stored["attributes"]["Length"], "20");

    archive_cmd(&db).args(["load", "/"]).arg(&output).assert().success();
    assert_eq!(fs::read_to_string(&output).unwrap(), "this is a plain text");

    fs::write(&input, "this is an updated text").unwrap();
    let stored = stdout_json(archive_cmd(&db).args(["store", "/"]).arg(&input));
    assert_eq!(stored["revision"], 2);

    archive_cmd(&db).args(["load", "/"]).arg(&output).assert().success();
    assert_eq!(fs::read_to_string(&output).unwrap(), "this is an updated text");

    let deleted = stdout_json(archive_cmd(&db).args(["delete", "/"]));
    assert_eq!(deleted["deleted"], true);
    assert_eq!(deleted["revision"], 3);

    let deleted = stdout_json(archive_cmd(&db).args(["delete", "/"]));
    assert_eq!(deleted["deleted"], false);
    assert_eq!(deleted["revision"], 3);

    archive_cmd(&db)
        .args(["load", "/"])
        .arg(&output)
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_list_with_prefix() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("archive.db");
    let input = dir.path().join("data.json");
    fs::write(&input, r#"{"k":1}"#).unwrap();

    for id in ["/docs/b", "/docs/a", "/img/x"] {
        archive_cmd(&db).args(["store", id]).arg(&input).assert().success();
    }

    let listed = stdout_json(archive_cmd(&db).args(["list", "--prefix", "/docs/"]));
    assert_eq!(listed["count"], 2);
    assert_eq!(listed["revision"], 3);
    assert_eq!(listed["items"][0]["id"], "/docs/a");
    assert_eq!(listed["items"][1]["id"], "/docs/b");
    assert_eq!(listed["items"][0]["attributes"]["Type"], "application/json");
}

#[test]
fn test_show_suggests_similar_ids() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("archive.db");
    let input = dir.path().join("readme.txt");
    fs::write(&input, "hello").unwrap();

    archive_cmd(&db)
        .args(["store", "/readme", "--label", "Read me", "--attr", "Expires=never"])
        .arg(&input)
        .assert()
        .success();

    let shown = stdout_json(archive_cmd(&db).args(["show", "/readme"]));
    assert_eq!(shown["text"], "hello");
    assert_eq!(shown["attributes"]["Label"], "Read me");
    assert_eq!(shown["attributes"]["Expires"], "never");

    let output = archive_cmd(&db)
        .args(["show", "/readm", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "RESOURCE_NOT_FOUND");
    assert!(err["error"]["message"].as_str().unwrap().contains("/readme"));
}

#[test]
fn test_store_rejects_bad_attribute() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("archive.db");
    let input = dir.path().join("a.txt");
    fs::write(&input, "a").unwrap();

    archive_cmd(&db)
        .args(["store", "/a", "--attr", "NoEquals"])
        .arg(&input)
        .assert()
        .failure()
        .code(4);

    let revision = stdout_json(archive_cmd(&db).arg("revision"));
    assert_eq!(revision["revision"], 0);
}

#[test]
fn test_quiet_keeps_command_output() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("archive.db");

    archive_cmd(&db)
        .args(["-q", "revision"])
        .assert()
        .success()
        .stdout("0\n");

    archive_cmd(&db)
        .args(["-q", "show", "/missing"])
        .assert()
        .failure()
        .code(3)
        .stderr("");
}
