//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;

/// Helper to get an sqc command
pub fn sqc() -> Command {
    Command::new(cargo::cargo_bin!("sqc"))
}

/// Run `sqc plan` with the reference parameters plus extra args and return
/// captured stdout.
pub fn plan_stdout(extra: &[&str]) -> String {
    let mut args = vec![
        "plan", "--aql", "0.25", "--ltpd", "1.0", "--lot-size", "10000",
    ];
    args.extend_from_slice(extra);
    let output = sqc().args(&args).output().unwrap();
    assert!(
        output.status.success(),
        "plan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}
