//! Integration tests for the CLI binary.
//!
//! Drives the `qrng` binary against the simulated backend.
//!
//! This test is registered as a [[test]] in the quantis-rng-cli crate
//! so that CARGO_BIN_EXE_qrng is available.

use std::process::{Command, Output};

/// Get a Command pointing to the `qrng` binary.
fn qrng_binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qrng"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    qrng_binary()
        .args(args)
        .output()
        .expect("failed to execute qrng")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn cli_responds_to_help() {
    let output = run(&["--help"]);

    assert!(
        output.status.success(),
        "qrng --help should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("qrng") || stdout.contains("Usage"),
        "qrng --help output should contain usage information, got: {stdout}"
    );
    for command in ["roll", "jackpot", "coinflip", "wheel", "random-int", "info"] {
        assert!(stdout.contains(command), "help should list {command}");
    }
}

#[test]
fn cli_responds_to_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("0.2") || stdout.contains("qrng"),
        "qrng --version should contain version info, got: {stdout}"
    );
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = run(&["--nonexistent-flag"]);
    assert!(
        !output.status.success(),
        "qrng with unknown flag should exit with error"
    );
}

#[test]
fn cli_roll_in_range() {
    let output = run(&["--seed", "11", "roll"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    let value: i32 = lines[0].trim().parse().expect("roll prints an integer");
    assert!((1..=100).contains(&value));
}

#[test]
fn cli_seeded_runs_repeat() {
    let a = run(&["--seed", "77", "random-int", "--min", "0", "--max", "999", "--count", "5"]);
    let b = run(&["--seed", "77", "random-int", "--min", "0", "--max", "999", "--count", "5"]);
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
    assert_eq!(stdout_lines(&a).len(), 5);
}

#[test]
fn cli_jackpot_has_two_decimals() {
    let output = run(&["--seed", "3", "jackpot"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    let text = lines[0].trim();
    let (_, decimals) = text.split_once('.').expect("jackpot prints a decimal");
    assert_eq!(decimals.len(), 2, "got {text}");
    let value: f64 = text.parse().unwrap();
    assert!((0.01..=100.0).contains(&value));
}

#[test]
fn cli_random_string_shape() {
    let output = run(&["--seed", "5", "random-string", "--count", "3", "--length", "4"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert_eq!(line.len(), 8);
        assert!(line.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}

#[test]
fn cli_invalid_range_fails() {
    let output = run(&["random-int", "--min", "10", "--max", "1"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no partial output on failure");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid parameters"), "got: {stderr}");
}

#[test]
fn cli_too_large_request_fails() {
    let output = run(&["random-string", "--count", "5000000", "--length", "4"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Request too large"), "got: {stderr}");
}

#[test]
fn cli_json_output() {
    let output = run(&["--json", "--seed", "1", "coinflip"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "int");
    let value = json["result"]["value"].as_i64().unwrap();
    assert!(value == 1 || value == 2);
}

#[test]
fn cli_info_lists_both_classes() {
    let output = run(&["info"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Searching for PCI-E devices..."));
    assert!(stdout.contains("Searching for USB devices..."));
    assert!(stdout.contains("Found card(s): 1"));
}

#[test]
fn cli_devnode_backend_reads_node() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("qrandom0"), [0x1Fu8, 0xA0, 0x00, 0x07]).unwrap();
    let dir = tmp.path().to_string_lossy().to_string();

    let output = run(&[
        "--backend",
        "devnode",
        "--dev-dir",
        dir.as_str(),
        "--device",
        "pci",
        "random-string",
        "--count",
        "2",
        "--length",
        "2",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout_lines(&output), vec!["1fa0", "0007"]);
}

#[test]
fn cli_devnode_missing_device_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().to_string_lossy().to_string();

    let output = run(&["--backend", "devnode", "--dev-dir", dir.as_str(), "--device", "pci", "roll"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No such device"), "got: {stderr}");
}
