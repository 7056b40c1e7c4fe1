//! Integration tests for the command-line front end
//!
//! The CLI runs against the mock backend with captured stdout/stderr.
#![cfg(feature = "cli")]

use std::fs;
use suunto_csv::backend::mock::{MockDive, MockLibrary};
use suunto_csv::cli::run;
use suunto_csv::{DiveDateTime, ExportOptions};
use tempfile::TempDir;

struct Captured {
    code: i32,
    stdout: String,
    stderr: String,
}

fn run_cli(library: &MockLibrary, args: &[&str], options: &ExportOptions) -> Captured {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(library, args.iter().copied(), options, &mut stdout, &mut stderr);
    Captured {
        code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}

fn catalog() -> MockLibrary {
    MockLibrary::new()
        .with_model("Suunto", "Vyper")
        .with_model("Mares", "Nemo")
        .with_model("Suunto", "D4i")
        .with_dive(
            MockDive::new(b"dive", DiveDateTime::new(2024, 6, 15, 8, 41, 7))
                .with_profile(&[(0, 0.0), (10, 5.5), (20, 0.0)]),
        )
}

fn scratch() -> (TempDir, TempDir, ExportOptions) {
    let dev = TempDir::new().expect("Failed to create temp dev dir");
    let out = TempDir::new().expect("Failed to create temp output dir");
    let options = ExportOptions::default()
        .with_device_dir(dev.path())
        .with_output_dir(out.path());
    (dev, out, options)
}

#[test]
fn test_no_arguments_lists_models() {
    let library = catalog();
    let (_dev, out, options) = scratch();

    let result = run_cli(&library, &["suunto_csv"], &options);
    assert_eq!(result.code, 0);
    assert!(result.stdout.contains("Usage: suunto_csv"));
    assert!(result.stdout.contains("Supported Models: Vyper, D4i\n"));
    assert!(!result.stdout.contains("Nemo"));
    assert!(result.stderr.is_empty());

    assert_eq!(library.counters().opened(), 0);
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_help_anywhere_does_not_export() {
    let (dev, out, options) = scratch();
    fs::File::create(dev.path().join("tty.usbserial-1")).unwrap();

    for args in [
        vec!["suunto_csv", "-h"],
        vec!["suunto_csv", "D4i", "--help"],
        vec!["suunto_csv", "--help", "D4i"],
        vec!["suunto_csv", "--bogus", "-h"],
        vec!["suunto_csv", "-h", "-V"],
    ] {
        let library = catalog();
        let result = run_cli(&library, &args, &options);
        assert_eq!(result.code, 0, "{args:?}");
        assert!(result.stdout.contains("Supported Models: Vyper, D4i"));
        assert_eq!(library.counters().opened(), 0, "{args:?}");
    }
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_export_scenario() {
    let library = catalog();
    let (dev, out, options) = scratch();
    fs::File::create(dev.path().join("tty.usbserial-FTDI")).unwrap();

    let result = run_cli(&library, &["suunto_csv", "D4i"], &options);
    assert_eq!(result.code, 0, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("Exported 1 of 1 dives"));

    let content = fs::read_to_string(out.path().join("dive_6-15-2024::8:41:7")).unwrap();
    assert_eq!(content, "00, 0.00\n10, 5.50\n20, 0.00\n");
    assert_eq!(library.counters().closed(), 1);
}

#[test]
fn test_per_dive_lines_reach_cli_streams() {
    let library = catalog().with_dive(
        MockDive::new(b"undated", DiveDateTime::default()).without_datetime(),
    );
    let (dev, out, options) = scratch();
    fs::File::create(dev.path().join("tty.usbserial-FTDI")).unwrap();

    let result = run_cli(&library, &["suunto_csv", "D4i"], &options);
    assert_eq!(result.code, 0, "stderr: {}", result.stderr);

    let written = out.path().join("dive_6-15-2024::8:41:7");
    assert_eq!(
        result.stdout,
        format!(
            "Exported dive to: {}\nExported 1 of 2 dives\n",
            written.display()
        )
    );
    assert!(result.stderr.starts_with("Skipping dive 2: "), "{}", result.stderr);
}

#[test]
fn test_last_model_argument_wins() {
    let library = catalog();
    let (dev, _out, options) = scratch();
    fs::File::create(dev.path().join("tty.usbserial-FTDI")).unwrap();

    let result = run_cli(&library, &["suunto_csv", "Nope", "D4i"], &options);
    assert_eq!(result.code, 0, "stderr: {}", result.stderr);

    let result = run_cli(&library, &["suunto_csv", "D4i", "Nope"], &options);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("Unsupported Suunto model Nope"));
}

#[test]
fn test_unsupported_model_fails() {
    let library = catalog();
    let (_dev, out, options) = scratch();

    let result = run_cli(&library, &["suunto_csv", "d4i"], &options);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("Unsupported Suunto model d4i"));
    assert_eq!(library.counters().opened(), 0);
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_transport_fails() {
    let library = catalog();
    let (dev, out, options) = scratch();
    fs::File::create(dev.path().join("ttyACM0")).unwrap();

    let result = run_cli(&library, &["suunto_csv", "D4i"], &options);
    assert_eq!(result.code, 1);
    assert!(result.stderr.contains("No device named tty.usbserial*"));
    assert_eq!(library.counters().opened(), 0);
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_unknown_flag_is_a_usage_error() {
    let library = catalog();
    let (_dev, _out, options) = scratch();

    let result = run_cli(&library, &["suunto_csv", "--frobnicate"], &options);
    assert_eq!(result.code, 2);
    assert!(!result.stderr.is_empty());
}
