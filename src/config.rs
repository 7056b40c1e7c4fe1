//! Run configuration
//!
//! Every fixed value the exporter depends on lives here so tests can point
//! the resolver at a fake vendor and the locator at a scratch directory.

use std::path::PathBuf;

pub const DEFAULT_VENDOR: &str = "Suunto";
pub const DEFAULT_DEVICE_DIR: &str = "/dev";
pub const DEFAULT_TRANSPORT_PREFIX: &str = "tty.usbserial";

/// Export options shared by the resolver, locator and exporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Vendor name matched exactly against catalog descriptors
    pub vendor: String,
    /// Directory scanned for the serial transport
    pub device_dir: PathBuf,
    /// Literal file-name prefix of the transport entry
    pub transport_prefix: String,
    /// Directory receiving one file per dive
    pub output_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            vendor: DEFAULT_VENDOR.to_string(),
            device_dir: PathBuf::from(DEFAULT_DEVICE_DIR),
            transport_prefix: DEFAULT_TRANSPORT_PREFIX.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportOptions {
    pub fn with_device_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.device_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_vendor(mut self, vendor: &str) -> Self {
        self.vendor = vendor.to_string();
        self
    }
}
