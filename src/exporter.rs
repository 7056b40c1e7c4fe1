//! Device-level export: open, iterate every dive, close

use crate::backend::{DiveComputerLibrary, DiveDevice};
use crate::config::ExportOptions;
use crate::error::Result;
use crate::resolver::resolve;
use crate::transport::locate;
use crate::types::{DiveControl, ExportReport};
use crate::writer::export_dive_with;
use log::{debug, warn};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Export every dive on the device behind `transport`.
///
/// Each written dive is announced on `out`; a dive that fails is reported
/// on `err` and the run moves on. Failing to open the device, or to start
/// iteration, fails the run. The device is closed when this returns, on
/// every path.
pub fn export<L: DiveComputerLibrary>(
    library: &L,
    descriptor: L::Descriptor,
    transport: &Path,
    options: &ExportOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<ExportReport> {
    let device = library.open(descriptor, transport)?;
    debug!("Opened device on {}", transport.display());

    let mut report = ExportReport::new();
    // Names created this run, including files left behind by failed dives
    let mut created: HashSet<PathBuf> = HashSet::new();

    device.foreach(&mut |record| {
        report.dives_seen += 1;
        let index = report.dives_seen;

        let mut reused = false;
        let result = export_dive_with(&device, record, &options.output_dir, |path| {
            reused = !created.insert(path.to_path_buf());
        });
        if reused {
            report.collisions += 1;
        }

        match result {
            Ok(dive) => {
                if reused {
                    warn!(
                        "Dive {index} starts in the same second as an earlier dive; {} was overwritten",
                        dive.path.display()
                    );
                }
                debug!("Dive {index}: {} samples", dive.summary.rows);
                report.anomalies += dive.summary.anomalies;
                let _ = writeln!(out, "Exported dive to: {}", dive.path.display());
                if !report.files.contains(&dive.path) {
                    report.files.push(dive.path);
                }
            }
            Err(e) => {
                report.skipped += 1;
                let _ = writeln!(err, "Skipping dive {index}: {e}");
            }
        }

        DiveControl::Continue
    })?;

    debug!(
        "Device iteration finished: {} dives, {} skipped",
        report.dives_seen, report.skipped
    );
    Ok(report)
}

/// Resolve `model`, locate the transport and export every dive
pub fn export_model<L: DiveComputerLibrary>(
    library: &L,
    model: &str,
    options: &ExportOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<ExportReport> {
    let descriptor = resolve(library, &options.vendor, model)?;
    let transport = locate(&options.device_dir, &options.transport_prefix)?;
    export(library, descriptor, &transport, options, out, err)
}
