//! Integration tests for the export pipeline
//!
//! Drives resolve → locate → export against the mock backend:
//! - One CSV file per dive, rows in emission order
//! - Per-dive failures skip the dive and keep going
//! - Device-level failures abort and still close the device
//! - Timestamp collisions reuse the same file name

use std::fs;
use std::io;
use suunto_csv::backend::mock::{MockDive, MockLibrary};
use suunto_csv::backend::DescriptorInfo;
use suunto_csv::{
    export_model, locate, resolve, DiveDateTime, DiveError, ExportOptions, ExportReport, Result,
    Sample, SampleType, Status,
};
use tempfile::TempDir;

struct Workspace {
    dev: TempDir,
    out: TempDir,
}

impl Workspace {
    fn with_transport(name: &str) -> Self {
        let workspace = Self::without_transport();
        fs::File::create(workspace.dev.path().join(name)).expect("Failed to create fake tty");
        workspace
    }

    fn without_transport() -> Self {
        Self {
            dev: TempDir::new().expect("Failed to create temp dev dir"),
            out: TempDir::new().expect("Failed to create temp output dir"),
        }
    }

    fn options(&self) -> ExportOptions {
        ExportOptions::default()
            .with_device_dir(self.dev.path())
            .with_output_dir(self.out.path())
    }

    fn export(&self, library: &MockLibrary, model: &str) -> Result<ExportReport> {
        export_model(
            library,
            model,
            &self.options(),
            &mut io::sink(),
            &mut io::sink(),
        )
    }

    fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.out.path())
            .expect("Failed to list output dir")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[test]
fn test_d4i_single_dive_scenario() {
    let workspace = Workspace::with_transport("tty.usbserial-A1B2");
    let library = MockLibrary::new()
        .with_model("Suunto", "D4i")
        .with_dive(
            MockDive::new(b"dive-1", DiveDateTime::new(2024, 6, 15, 8, 41, 7))
                .with_profile(&[(0, 0.0), (10, 5.5), (20, 0.0)]),
        );

    let report = workspace.export(&library, "D4i").unwrap();
    assert_eq!(report.dives_seen, 1);
    assert_eq!(report.exported(), 1);

    assert_eq!(workspace.output_files(), vec!["dive_6-15-2024::8:41:7"]);
    let content =
        fs::read_to_string(workspace.out.path().join("dive_6-15-2024::8:41:7")).unwrap();
    assert_eq!(content, "00, 0.00\n10, 5.50\n20, 0.00\n");
}

#[test]
fn test_distinct_dives_get_distinct_files() {
    let workspace = Workspace::with_transport("tty.usbserial-1");
    let library = MockLibrary::new()
        .with_model("Suunto", "Vyper")
        .with_dive(
            MockDive::new(b"a", DiveDateTime::new(2023, 9, 1, 10, 0, 0))
                .with_profile(&[(0, 0.0), (20, 12.25)]),
        )
        .with_dive(
            MockDive::new(b"b", DiveDateTime::new(2023, 9, 1, 13, 15, 30)).with_samples(&[
                Sample::Time(0),
                Sample::Other(SampleType::Temperature),
                Sample::Depth(0.5),
                Sample::Time(30),
                Sample::Other(SampleType::Pressure),
                Sample::Depth(18.0),
            ]),
        )
        .with_dive(
            MockDive::new(b"c", DiveDateTime::new(2023, 9, 2, 9, 5, 0))
                .with_profile(&[(0, 1.0)]),
        );

    let report = workspace.export(&library, "Vyper").unwrap();
    assert_eq!(report.exported(), 3);
    assert_eq!(report.collisions, 0);
    assert_eq!(workspace.output_files().len(), 3);

    let second =
        fs::read_to_string(workspace.out.path().join("dive_9-1-2023::13:15:30")).unwrap();
    assert_eq!(second, "00, 0.50\n30, 18.00\n");
}

#[test]
fn test_bad_dive_does_not_stop_the_run() {
    let workspace = Workspace::with_transport("tty.usbserial-1");
    let library = MockLibrary::new()
        .with_model("Suunto", "D4i")
        .with_dive(
            MockDive::new(b"first", DiveDateTime::new(2024, 1, 1, 1, 1, 1))
                .with_profile(&[(0, 1.0)]),
        )
        .with_dive(MockDive::new(b"nodate", DiveDateTime::default()).without_datetime())
        .with_dive(
            MockDive::new(b"third", DiveDateTime::new(2024, 1, 3, 3, 3, 3))
                .with_profile(&[(0, 3.0)]),
        );
    let counters = library.counters();

    let report = workspace.export(&library, "D4i").unwrap();
    assert_eq!(counters.dives_visited(), 3);
    assert_eq!(report.dives_seen, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        workspace.output_files(),
        vec!["dive_1-1-2024::1:1:1", "dive_1-3-2024::3:3:3"]
    );
}

#[test]
fn test_same_second_dives_collide() {
    let workspace = Workspace::with_transport("tty.usbserial-1");
    let when = DiveDateTime::new(2020, 2, 29, 12, 0, 0);
    let library = MockLibrary::new()
        .with_model("Suunto", "D4i")
        .with_dive(MockDive::new(b"one", when).with_profile(&[(0, 1.0)]))
        .with_dive(MockDive::new(b"two", when).with_profile(&[(0, 2.0), (10, 2.5)]));

    let report = workspace.export(&library, "D4i").unwrap();
    assert_eq!(report.collisions, 1);
    assert_eq!(report.exported(), 1);
    assert_eq!(workspace.output_files(), vec!["dive_2-29-2020::12:0:0"]);
    let content =
        fs::read_to_string(workspace.out.path().join("dive_2-29-2020::12:0:0")).unwrap();
    assert_eq!(content, "00, 2.00\n10, 2.50\n");
}

#[test]
fn test_missing_transport_aborts_without_output() {
    let workspace = Workspace::without_transport();
    fs::File::create(workspace.dev.path().join("ttyS0")).unwrap();
    let library = MockLibrary::new()
        .with_model("Suunto", "D4i")
        .with_dive(MockDive::new(b"x", DiveDateTime::new(2024, 1, 1, 0, 0, 0)));
    let counters = library.counters();

    let err = workspace.export(&library, "D4i").unwrap_err();
    assert!(matches!(err, DiveError::NoTransport { .. }));
    assert_eq!(counters.opened(), 0);
    assert_eq!(counters.live_descriptors(), 0);
    assert!(workspace.output_files().is_empty());
}

#[test]
fn test_unknown_model_aborts_before_locating() {
    let workspace = Workspace::without_transport();
    let library = MockLibrary::new().with_model("Suunto", "D4i");

    let err = workspace.export(&library, "D9").unwrap_err();
    assert!(matches!(err, DiveError::UnsupportedModel { .. }));
}

#[test]
fn test_device_open_failure_aborts() {
    let workspace = Workspace::with_transport("tty.usbserial-1");
    let library = MockLibrary::new()
        .with_model("Suunto", "D4i")
        .failing_open(Status::Timeout);

    let err = workspace.export(&library, "D4i").unwrap_err();
    assert_eq!(err.to_string(), "dc_device_open failed: timeout");
    assert!(workspace.output_files().is_empty());
}

#[test]
fn test_foreach_failure_closes_device() {
    let workspace = Workspace::with_transport("tty.usbserial-1");
    let library = MockLibrary::new()
        .with_model("Suunto", "D4i")
        .failing_foreach(Status::Protocol);
    let counters = library.counters();

    assert!(workspace.export(&library, "D4i").is_err());
    assert_eq!(counters.opened(), 1);
    assert_eq!(counters.closed(), 1);
}

#[test]
fn test_every_listed_model_resolves_to_itself() {
    let library = MockLibrary::new()
        .with_model("Suunto", "Vyper")
        .with_model("Suunto", "D4i")
        .with_model("Oceanic", "VT4")
        .with_model("Suunto", "EON Steel");

    for model in suunto_csv::supported_models(&library, "Suunto").unwrap() {
        let descriptor = resolve(&library, "Suunto", &model).unwrap();
        assert_eq!(descriptor.product(), model.as_str());
    }
    assert!(resolve(&library, "Suunto", "VT4").is_err());
}

#[test]
fn test_locate_returns_path_inside_device_dir() {
    let workspace = Workspace::with_transport("tty.usbserial-XYZ");
    let path = locate(workspace.dev.path(), "tty.usbserial").unwrap();
    assert!(path.starts_with(workspace.dev.path()));
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("tty.usbserial"));
}
