use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of one export run over all dives on a device
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportReport {
    /// Dives the device handed to the callback
    pub dives_seen: usize,
    /// Distinct files written, in order of first write. A collided name appears once.
    pub files: Vec<PathBuf>,
    /// Dives that produced no complete output
    pub skipped: usize,
    /// Depth samples that arrived without a preceding time sample
    pub anomalies: usize,
    /// Dives whose file name was already written earlier in the run
    pub collisions: usize,
}

impl ExportReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct files some dive was fully written to
    pub fn exported(&self) -> usize {
        self.files.len()
    }

    /// True when every dive seen was written out
    pub fn is_complete(&self) -> bool {
        self.skipped == 0 && self.exported() == self.dives_seen
    }
}
