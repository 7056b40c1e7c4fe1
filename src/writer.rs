//! Per-dive CSV output
//!
//! [`export_dive`] runs one dive from parser creation to a closed file.
//! [`SampleWriter`] turns the parser's sample stream into rows.

use crate::backend::DiveDevice;
use crate::error::{DiveError, Result};
use crate::types::{DiveRecord, Sample};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Pairs time and depth samples into `<time>, <depth>` rows.
///
/// A time sample opens a row and the next depth sample completes it. A
/// second time sample before any depth replaces the first. A depth sample
/// with no open row is an anomaly: it is counted and not written.
pub struct SampleWriter<W: Write> {
    out: W,
    pending_time: Option<u32>,
    rows: usize,
    anomalies: usize,
    error: Option<io::Error>,
}

/// Rows written and anomalies seen for one dive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleSummary {
    pub rows: usize,
    pub anomalies: usize,
}

impl<W: Write> SampleWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            pending_time: None,
            rows: 0,
            anomalies: 0,
            error: None,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        match sample {
            Sample::Time(time) => {
                if let Some(previous) = self.pending_time.replace(time) {
                    debug!("Time sample {previous} has no depth, replaced by {time}");
                }
            }
            Sample::Depth(depth) => match self.pending_time.take() {
                Some(time) => self.write_row(time, depth),
                None => {
                    self.anomalies += 1;
                    warn!("Depth sample {depth:.2} has no preceding time sample, dropped");
                }
            },
            Sample::Other(_) => {}
        }
    }

    fn write_row(&mut self, time: u32, depth: f64) {
        // Keep decoding after a failed write; the error is reported by finish()
        if self.error.is_some() {
            return;
        }
        match writeln!(self.out, "{:02}, {:.2}", time, depth) {
            Ok(()) => self.rows += 1,
            Err(e) => self.error = Some(e),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn anomalies(&self) -> usize {
        self.anomalies
    }

    /// Flush the output and report the first write error, if any
    pub fn finish(mut self) -> io::Result<SampleSummary> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        if let Some(time) = self.pending_time {
            debug!("Trailing time sample {time} has no depth");
        }
        self.out.flush()?;
        Ok(SampleSummary {
            rows: self.rows,
            anomalies: self.anomalies,
        })
    }
}

/// A dive that made it to disk
#[derive(Debug, Clone, PartialEq)]
pub struct DiveExport {
    pub path: PathBuf,
    pub summary: SampleSummary,
}

/// Export one dive into `output_dir`.
///
/// Parser, file and writer are all dropped before this returns. A failure
/// while decoding samples still flushes the rows written so far; the
/// truncated file stays behind.
pub fn export_dive<D: DiveDevice + ?Sized>(
    device: &D,
    record: &DiveRecord<'_>,
    output_dir: &Path,
) -> Result<DiveExport> {
    export_dive_with(device, record, output_dir, |_| {})
}

/// Like [`export_dive`], calling `on_create` once the output file exists
/// and before any sample is decoded.
pub fn export_dive_with<D, F>(
    device: &D,
    record: &DiveRecord<'_>,
    output_dir: &Path,
    on_create: F,
) -> Result<DiveExport>
where
    D: DiveDevice + ?Sized,
    F: FnOnce(&Path),
{
    let mut parser = device.parser(record)?;
    let datetime = parser.datetime()?;

    let path = output_dir.join(datetime.file_name());
    let file = File::create(&path).map_err(|source| DiveError::CreateFile {
        path: path.clone(),
        source,
    })?;
    on_create(&path);
    debug!(
        "Writing dive {} ({} bytes) to {}",
        record.fingerprint_hex(),
        record.data.len(),
        path.display()
    );

    let mut writer = SampleWriter::new(BufWriter::new(file));
    let decoded = parser.samples(&mut |sample| writer.push(sample));
    let summary = writer.finish()?;
    decoded?;

    Ok(DiveExport { path, summary })
}
