//! # Command-Line Behavior
//!
//! Run the `eatmemory` binary and verify exit status and diagnostics.

use std::process::{Command, Output, Stdio};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eatmemory"))
        .args(args)
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

fn stdout(v: &Output) -> String {
    String::from_utf8_lossy(&v.stdout).into_owned()
}

fn stderr(v: &Output) -> String {
    String::from_utf8_lossy(&v.stderr).into_owned()
}

#[test]
fn help() {
    for flag in ["-h", "--help", "-?"] {
        let o = run(&[flag]);

        assert_eq!(o.status.code(), Some(0));
        assert!(stdout(&o).contains("Usage: eatmemory [-t <seconds>] <size>"));
    }
}

#[test]
fn version() {
    let o = run(&["--version"]);

    assert_eq!(o.status.code(), Some(0));
    assert_eq!(stdout(&o).trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn missing_size() {
    let o = run(&[]);

    assert_eq!(o.status.code(), Some(1));
    assert!(stdout(&o).contains("Usage:"));
}

#[test]
fn invalid_timeout() {
    let o = run(&["-t", "abc", "1K"]);

    assert_eq!(o.status.code(), Some(1));
    assert_eq!(stderr(&o).trim(), "error: cannot parse 'abc' as an integer");
}

#[cfg(unix)]
#[test]
fn argument_not_utf8() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let o = Command::new(env!("CARGO_BIN_EXE_eatmemory"))
        .arg(OsStr::from_bytes(b"\xff"))
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(o.status.code(), Some(1));
    assert_eq!(stderr(&o).trim(), "error: argument is not valid UTF-8");
}

#[test]
fn unknown_option() {
    let o = run(&["--bogus", "1K"]);

    assert_eq!(o.status.code(), Some(1));
    assert_eq!(stderr(&o).trim(), "error: --bogus is not a recognised flag or option name");

    let o = run(&["-x", "1K"]);

    assert_eq!(o.status.code(), Some(1));
    assert_eq!(stderr(&o).trim(), "error: -x is not a recognised flag or option name");
}

#[test]
fn invalid_size() {
    let o = run(&["-t", "0", "12X"]);

    assert_eq!(o.status.code(), Some(1));
    assert!(stderr(&o).contains("error: invalid size format"));

    let o = run(&["-t", "0", "0"]);

    assert_eq!(o.status.code(), Some(1));
    assert!(stderr(&o).contains("error: size must be a positive integer"));
}

#[test]
fn eat() {
    let o = run(&["-t", "0", "2M"]);

    assert_eq!(o.status.code(), Some(0));

    let out = stdout(&o);
    assert!(out.contains("Eating 2M in chunks of 1M..."));
    assert!(out.contains("Done, sleeping for 0 seconds before exiting..."));
}

#[test]
fn timeout_after_size() {
    let o = run(&["1K", "--timeout=0"]);

    assert_eq!(o.status.code(), Some(0));
    assert!(stdout(&o).contains("Eating 1K in chunks of 1M..."));
}
