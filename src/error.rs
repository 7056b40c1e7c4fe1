use crate::types::Status;
use std::fmt;
use std::path::PathBuf;

/// Error types for dive export
#[derive(Debug)]
pub enum DiveError {
    /// I/O errors
    Io(std::io::Error),
    /// No descriptor in the catalog matches vendor and model
    UnsupportedModel { vendor: String, model: String },
    /// No entry in the device directory carries the transport prefix
    NoTransport { dir: PathBuf, prefix: String },
    /// The device directory could not be read
    DeviceDirectory {
        dir: PathBuf,
        source: std::io::Error,
    },
    /// A libdivecomputer call returned a failure status
    Library {
        operation: &'static str,
        status: Status,
    },
    /// An output file could not be created
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The linked libdivecomputer does not match the declared ABI
    UnsupportedLibrary { found: String, required: String },
}

impl DiveError {
    pub fn library(operation: &'static str, status: Status) -> Self {
        DiveError::Library { operation, status }
    }
}

impl fmt::Display for DiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiveError::Io(err) => write!(f, "I/O error: {}", err),
            DiveError::UnsupportedModel { vendor, model } => {
                write!(f, "Unsupported {} model {}", vendor, model)
            }
            DiveError::NoTransport { dir, prefix } => write!(
                f,
                "No device named {}* found in {}",
                prefix,
                dir.display()
            ),
            DiveError::DeviceDirectory { dir, source } => {
                write!(f, "Can't open {} for reading: {}", dir.display(), source)
            }
            DiveError::Library { operation, status } => {
                write!(f, "{} failed: {}", operation, status)
            }
            DiveError::CreateFile { path, source } => {
                write!(f, "Can't create {}: {}", path.display(), source)
            }
            DiveError::UnsupportedLibrary { found, required } => write!(
                f,
                "libdivecomputer {} is not supported (need {})",
                found, required
            ),
        }
    }
}

impl std::error::Error for DiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiveError::Io(err) => Some(err),
            DiveError::DeviceDirectory { source, .. } => Some(source),
            DiveError::CreateFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DiveError {
    fn from(err: std::io::Error) -> Self {
        DiveError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, DiveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unsupported_model_message() {
        let err = DiveError::UnsupportedModel {
            vendor: "Suunto".to_string(),
            model: "D9x".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported Suunto model D9x");
    }

    #[test]
    fn test_library_message() {
        let err = DiveError::library("dc_device_open", Status::NoAccess);
        assert_eq!(err.to_string(), "dc_device_open failed: access denied");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_source_is_kept() {
        let err: DiveError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "I/O error: boom");
    }
}
