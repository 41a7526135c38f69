//! Shared integration-test harness for running the `phrase-cycler` binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};

fn command(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_phrase-cycler"));
    cmd.args(args)
        .env_remove("PHRASE_CYCLER_CONFIG")
        .env("PHRASE_CYCLER_LOG_LEVEL", "error")
        .env("NO_COLOR", "1");
    cmd
}

/// Runs the binary to completion with the given arguments.
///
/// Logging is silenced through the environment so stderr only carries
/// error messages.
#[allow(clippy::missing_panics_doc)]
pub fn run_command(args: &[&str]) -> Output {
    command(args)
        .output()
        .expect("failed to run phrase-cycler")
}

/// Starts the binary in the background with piped output.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Child {
    command(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn phrase-cycler")
}

/// Absolute path of a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Same as [`fixture_path`] but as a `String` for argument lists.
#[allow(clippy::missing_panics_doc)]
pub fn fixture(name: &str) -> String {
    fixture_path(name)
        .to_str()
        .expect("non-UTF-8 fixture path")
        .to_string()
}

/// Stdout as UTF-8 text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as UTF-8 text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
