//! Seam between the exporter and the dive-computer access library
//!
//! The exporter never touches libdivecomputer directly. It talks to a
//! [`DiveComputerLibrary`], which hands out descriptors and open devices;
//! devices drive dive iteration and hand out per-dive parsers. Every
//! handle is an owned value released on drop.

use crate::error::{DiveError, Result};
use crate::types::{DiveControl, DiveDateTime, DiveRecord, Sample};
use semver::{Version, VersionReq};
use std::borrow::Cow;
use std::path::Path;

pub mod mock;

#[cfg(feature = "libdivecomputer")]
pub mod ffi;
#[cfg(feature = "libdivecomputer")]
pub mod libdivecomputer;

/// libdivecomputer releases whose ABI matches the declarations in [`ffi`]
pub const SUPPORTED_LIBRARY: &str = ">=0.8.0, <0.9.0";

/// Per-dive visitor passed to [`DiveDevice::foreach`]
pub type DiveCallback<'f> = dyn FnMut(&DiveRecord<'_>) -> DiveControl + 'f;

/// Per-sample visitor passed to [`DiveParser::samples`]
pub type SampleCallback<'f> = dyn FnMut(Sample) + 'f;

/// Catalog entry naming one supported hardware model
pub trait DescriptorInfo {
    fn vendor(&self) -> Cow<'_, str>;
    fn product(&self) -> Cow<'_, str>;
}

pub trait DiveComputerLibrary {
    type Descriptor: DescriptorInfo;
    type Device: DiveDevice;

    /// Iterate the model catalog in the library's native order.
    /// Descriptors are created lazily; dropping one releases it.
    fn descriptors(&self) -> Result<Box<dyn Iterator<Item = Self::Descriptor> + '_>>;

    /// Open the device behind `transport`. The descriptor is only needed
    /// for the open call and is released before this returns.
    fn open(&self, descriptor: Self::Descriptor, transport: &Path) -> Result<Self::Device>;
}

/// An open connection to one dive computer. Closed on drop.
pub trait DiveDevice {
    /// Walk every dive stored on the device, in device order, until the
    /// callback returns [`DiveControl::Stop`] or the dives run out.
    fn foreach(&self, on_dive: &mut DiveCallback<'_>) -> Result<()>;

    /// Create a parser bound to one dive's bytes
    fn parser<'a>(&'a self, dive: &DiveRecord<'a>) -> Result<Box<dyn DiveParser + 'a>>;
}

pub trait DiveParser {
    fn datetime(&mut self) -> Result<DiveDateTime>;

    /// Decode every sample in emission order
    fn samples(&mut self, on_sample: &mut SampleCallback<'_>) -> Result<()>;
}

/// Check a libdivecomputer version string against [`SUPPORTED_LIBRARY`].
///
/// Development builds report versions such as `0.8.0-devel`; only the
/// numeric core takes part in the comparison.
pub fn check_library_version(version: &str) -> Result<Version> {
    let unsupported = || DiveError::UnsupportedLibrary {
        found: version.to_string(),
        required: SUPPORTED_LIBRARY.to_string(),
    };

    let parsed = Version::parse(version.trim()).map_err(|_| unsupported())?;
    let core = Version::new(parsed.major, parsed.minor, parsed.patch);
    let required = VersionReq::parse(SUPPORTED_LIBRARY).map_err(|_| unsupported())?;

    if required.matches(&core) {
        Ok(parsed)
    } else {
        Err(unsupported())
    }
}
