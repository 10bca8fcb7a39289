use std::fs;
use std::process::Command;

fn sddlc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sddlc"))
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn compiles_to_debug_target() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("basic.debug");

    let status = sddlc()
        .arg(fixture("basic.sddl"))
        .arg("-o")
        .arg(&output)
        .arg("-t")
        .arg("debug")
        .status()
        .unwrap();

    assert!(status.success());
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("const Version = 3"));
    assert!(text.contains("message Point {"));
    assert!(text.contains("typedef Shape ["));
    assert!(text.contains("rpc Echo ("));
}

#[test]
fn compiles_to_json_target() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("basic.json");

    let status = sddlc()
        .arg(fixture("basic.sddl"))
        .arg("-o")
        .arg(&output)
        .arg("-t")
        .arg("json")
        .arg("-n")
        .arg("demo")
        .status()
        .unwrap();

    assert!(status.success());
    let text = fs::read_to_string(&output).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["namespace"], "demo");
    assert_eq!(doc["constants"]["Version"], 3);
    assert!(doc["messages"]["Point"].is_array());
}

#[test]
fn unknown_target_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out");

    let status = sddlc()
        .arg(fixture("basic.sddl"))
        .arg("-o")
        .arg(&output)
        .arg("-t")
        .arg("no-such-backend")
        .status()
        .unwrap();

    assert!(!status.success());
}

#[test]
fn undeclared_identifier_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.sddl");
    fs::write(&bad, "auto X = Y\n").unwrap();
    let output = dir.path().join("out");

    let status = sddlc()
        .arg(&bad)
        .arg("-o")
        .arg(&output)
        .arg("-t")
        .arg("debug")
        .status()
        .unwrap();

    assert!(!status.success());
}
