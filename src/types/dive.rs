#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One dive as handed out by the device during iteration.
///
/// Both slices are owned by the library and are only valid for the
/// duration of the per-dive callback.
#[derive(Debug, Clone, Copy)]
pub struct DiveRecord<'a> {
    pub data: &'a [u8],
    pub fingerprint: &'a [u8],
}

impl<'a> DiveRecord<'a> {
    pub fn new(data: &'a [u8], fingerprint: &'a [u8]) -> Self {
        Self { data, fingerprint }
    }

    /// Fingerprint as lowercase hex, for diagnostics
    pub fn fingerprint_hex(&self) -> String {
        self.fingerprint
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

/// Whether the library should keep iterating after a dive callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiveControl {
    Continue,
    Stop,
}

/// Start time of a dive as decoded by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiveDateTime {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    /// UTC offset in seconds, when the device records one
    pub timezone: Option<i32>,
}

impl DiveDateTime {
    pub fn new(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            timezone: None,
        }
    }

    /// Output file name for a dive starting at this time.
    ///
    /// Plain integer formatting, no padding. Two dives starting in the same
    /// second map to the same name.
    pub fn file_name(&self) -> String {
        format!(
            "dive_{}-{}-{}::{}:{}:{}",
            self.month, self.day, self.year, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_pattern() {
        let dt = DiveDateTime::new(2024, 7, 14, 9, 5, 3);
        assert_eq!(dt.file_name(), "dive_7-14-2024::9:5:3");
    }

    #[test]
    fn test_file_name_ignores_timezone() {
        let mut dt = DiveDateTime::new(2023, 12, 31, 23, 59, 59);
        dt.timezone = Some(3600);
        assert_eq!(dt.file_name(), "dive_12-31-2023::23:59:59");
    }

    #[test]
    fn test_fingerprint_hex() {
        let record = DiveRecord::new(&[1, 2, 3], &[0xde, 0xad, 0x01]);
        assert_eq!(record.fingerprint_hex(), "dead01");
        assert_eq!(DiveRecord::new(&[], &[]).fingerprint_hex(), "");
    }
}
