#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sample kinds reported by libdivecomputer, numbered as `dc_sample_type_t`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleType {
    Time,
    Depth,
    Pressure,
    Temperature,
    Event,
    Rbt,
    Heartbeat,
    Bearing,
    Vendor,
    Setpoint,
    Ppo2,
    Cns,
    Deco,
    Gasmix,
    Unknown(i32),
}

impl SampleType {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => SampleType::Time,
            1 => SampleType::Depth,
            2 => SampleType::Pressure,
            3 => SampleType::Temperature,
            4 => SampleType::Event,
            5 => SampleType::Rbt,
            6 => SampleType::Heartbeat,
            7 => SampleType::Bearing,
            8 => SampleType::Vendor,
            9 => SampleType::Setpoint,
            10 => SampleType::Ppo2,
            11 => SampleType::Cns,
            12 => SampleType::Deco,
            13 => SampleType::Gasmix,
            other => SampleType::Unknown(other),
        }
    }
}

/// A decoded data point. Only elapsed time and depth carry a value here;
/// everything else is reported by kind and dropped by the writer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sample {
    /// Elapsed dive time in seconds
    Time(u32),
    /// Depth in meters
    Depth(f64),
    Other(SampleType),
}

impl Sample {
    pub fn kind(&self) -> SampleType {
        match self {
            Sample::Time(_) => SampleType::Time,
            Sample::Depth(_) => SampleType::Depth,
            Sample::Other(kind) => *kind,
        }
    }
}
