//! Integration tests for core CLI contract behavior.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ntrflash").expect("binary builds");
    cmd.env_remove("NTRFLASH_IMAGE").env_remove("NTRFLASH_CART");
    cmd
}

#[test]
fn help_exits_zero_and_writes_stdout_only() {
    cli_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ntrflash"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn version_exits_zero_and_writes_stdout_only() {
    cli_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ntrflash"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn unknown_command_is_usage_error() {
    cli_cmd()
        .arg("unknown-command-xyz")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn list_names_every_family() {
    cli_cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("dsone")
                .and(predicate::str::contains("dsonei"))
                .and(predicate::str::contains("r4isdhc-hk")),
        );
}

#[test]
fn info_json_is_valid_json() {
    let output = cli_cmd()
        .args(["--cart", "dsone", "info", "--json"])
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).expect("stdout is utf-8");
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["family"], "dsone");
    assert_eq!(value["capacity"], 0x8_0000);
}

#[test]
fn info_without_family_fails_with_hint() {
    cli_cmd()
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--cart"));
}

#[test]
fn completions_command_writes_to_stdout() {
    cli_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("ntrflash"));
}

#[test]
fn dump_with_missing_image_fails() {
    let dir = tempdir().expect("tempdir");
    let image = dir.path().join("missing.bin");
    let out = dir.path().join("dump.bin");

    cli_cmd()
        .current_dir(dir.path())
        .args(["--cart", "dsone", "--image"])
        .arg(&image)
        .arg("dump")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn write_refuses_without_yes_in_non_interactive_mode() {
    let dir = tempdir().expect("tempdir");
    let image = dir.path().join("cart.bin");
    let input = dir.path().join("input.bin");
    fs::write(&input, [0x11u8; 16]).expect("write input");

    cli_cmd()
        .current_dir(dir.path())
        .args(["--cart", "dsone", "--image"])
        .arg(&image)
        .arg("write")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn write_then_dump_round_trips() {
    let dir = tempdir().expect("tempdir");
    let image = dir.path().join("cart.bin");
    let input = dir.path().join("input.bin");
    let out = dir.path().join("dump.bin");

    let payload: Vec<u8> = (0u8..32).collect();
    fs::write(&input, &payload).expect("write input");

    cli_cmd()
        .current_dir(dir.path())
        .args(["--cart", "dsone", "--yes", "--image"])
        .arg(&image)
        .arg("write")
        .arg(&input)
        .args(["--addr", "0x2000"])
        .assert()
        .success();

    // The image file now holds the full cart, payload in place.
    let saved = fs::read(&image).expect("image saved");
    assert_eq!(saved.len(), 0x8_0000);
    assert_eq!(&saved[0x2000..0x2020], &payload[..]);

    cli_cmd()
        .current_dir(dir.path())
        .args(["--cart", "dsone", "--image"])
        .arg(&image)
        .arg("dump")
        .arg(&out)
        .args(["--addr", "0x2000", "--len", "32"])
        .assert()
        .success();

    let dumped = fs::read(&out).expect("dump written");
    assert_eq!(dumped, payload);
}
