//! Serial transport discovery

use crate::error::{DiveError, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Return the first entry of `dir` whose file name starts with `prefix`.
///
/// Entries are visited in the order the OS returns them. Nothing checks
/// that the match is a serial port, or that it is free.
pub fn locate(dir: &Path, prefix: &str) -> Result<PathBuf> {
    let entries = fs::read_dir(dir).map_err(|source| DiveError::DeviceDirectory {
        dir: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot read entry in '{}': {}", dir.display(), e);
                continue;
            }
        };

        if entry.file_name().to_string_lossy().starts_with(prefix) {
            let path = entry.path();
            debug!("Using transport {}", path.display());
            return Ok(path);
        }
    }

    Err(DiveError::NoTransport {
        dir: dir.to_path_buf(),
        prefix: prefix.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_locate_finds_prefixed_entry() {
        let dev = TempDir::new().unwrap();
        File::create(dev.path().join("ttyS0")).unwrap();
        File::create(dev.path().join("tty.usbserial-A600")).unwrap();

        let path = locate(dev.path(), "tty.usbserial").unwrap();
        assert_eq!(path, dev.path().join("tty.usbserial-A600"));
        assert!(path.starts_with(dev.path()));
    }

    #[test]
    fn test_locate_exact_name_matches() {
        let dev = TempDir::new().unwrap();
        File::create(dev.path().join("tty.usbserial")).unwrap();
        assert!(locate(dev.path(), "tty.usbserial").is_ok());
    }

    #[test]
    fn test_locate_prefix_is_literal() {
        let dev = TempDir::new().unwrap();
        File::create(dev.path().join("cu.tty.usbserial-1")).unwrap();
        File::create(dev.path().join("TTY.USBSERIAL-2")).unwrap();

        let err = locate(dev.path(), "tty.usbserial").unwrap_err();
        assert!(matches!(err, DiveError::NoTransport { .. }));
    }

    #[test]
    fn test_locate_matches_directories_too() {
        let dev = TempDir::new().unwrap();
        std::fs::create_dir(dev.path().join("tty.usbserial-dir")).unwrap();
        assert!(locate(dev.path(), "tty.usbserial").is_ok());
    }

    #[test]
    fn test_locate_missing_directory() {
        let dev = TempDir::new().unwrap();
        let missing = dev.path().join("nope");

        let err = locate(&missing, "tty.usbserial").unwrap_err();
        assert!(matches!(err, DiveError::DeviceDirectory { .. }));
    }
}
