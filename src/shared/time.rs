use serde::Serialize;
use std::fmt;

pub const NANOS_PER_SECOND: u64 = 1_000_000_000;
pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// Finest time unit a fragment carries after dedupe.
///
/// Ordered from coarse to fine so the finest of several resolutions is
/// simply their maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeResolution {
    #[default]
    Seconds,
    Millis,
    Nanos,
}

impl TimeResolution {
    pub fn finest(self, other: TimeResolution) -> TimeResolution {
        self.max(other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeResolution::Seconds => "seconds",
            TimeResolution::Millis => "millis",
            TimeResolution::Nanos => "nanos",
        }
    }

    /// Resolution implied by a nanosecond offset.
    pub fn of_offset_nanos(offset_nanos: u64) -> TimeResolution {
        if offset_nanos % NANOS_PER_SECOND == 0 {
            TimeResolution::Seconds
        } else if offset_nanos % NANOS_PER_MILLI == 0 {
            TimeResolution::Millis
        } else {
            TimeResolution::Nanos
        }
    }
}

impl fmt::Display for TimeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
