use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Library status codes, numbered as `dc_status_t`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    Success,
    Done,
    Unsupported,
    InvalidArgs,
    NoMemory,
    NoDevice,
    NoAccess,
    Io,
    Timeout,
    Protocol,
    DataFormat,
    Cancelled,
    Unknown(i32),
}

impl Status {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Status::Success,
            1 => Status::Done,
            -1 => Status::Unsupported,
            -2 => Status::InvalidArgs,
            -3 => Status::NoMemory,
            -4 => Status::NoDevice,
            -5 => Status::NoAccess,
            -6 => Status::Io,
            -7 => Status::Timeout,
            -8 => Status::Protocol,
            -9 => Status::DataFormat,
            -10 => Status::Cancelled,
            other => Status::Unknown(other),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => write!(f, "success"),
            Status::Done => write!(f, "done"),
            Status::Unsupported => write!(f, "unsupported operation"),
            Status::InvalidArgs => write!(f, "invalid arguments"),
            Status::NoMemory => write!(f, "out of memory"),
            Status::NoDevice => write!(f, "no device found"),
            Status::NoAccess => write!(f, "access denied"),
            Status::Io => write!(f, "input/output error"),
            Status::Timeout => write!(f, "timeout"),
            Status::Protocol => write!(f, "protocol error"),
            Status::DataFormat => write!(f, "data format error"),
            Status::Cancelled => write!(f, "cancelled"),
            Status::Unknown(code) => write!(f, "unknown status {code}"),
        }
    }
}
