//! Time periods.
//!
//! Start times and durations are held in whole seconds from midnight, which
//! keeps period arithmetic exact.

use std::fmt;
use std::str::FromStr;

use tm_core::{EntityKind, TimePeriodId, impl_entity};

use crate::{DemandError, DemandResult};

#[derive(Clone, Debug, PartialEq)]
pub struct TimePeriod {
    pub id:            TimePeriodId,
    pub doc_id:        String,
    pub external_id:   Option<String>,
    pub name:          Option<String>,
    /// Seconds since midnight.
    pub start_secs:    u32,
    pub duration_secs: u32,
}

impl_entity!(TimePeriod, TimePeriodId, EntityKind::TimePeriod);

impl TimePeriod {
    pub fn end_secs(&self) -> u32 {
        self.start_secs + self.duration_secs
    }

    /// Duration in hours, the unit demand rates are expressed in.
    pub fn duration_hours(&self) -> f64 {
        self.duration_secs as f64 / 3_600.0
    }
}

/// Unit of a time period's duration in a document.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum DurationUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            DurationUnit::Seconds => "s",
            DurationUnit::Minutes => "min",
            DurationUnit::Hours   => "h",
        }
    }

    pub fn to_secs(self, value: f64) -> u32 {
        let factor = match self {
            DurationUnit::Seconds => 1.0,
            DurationUnit::Minutes => 60.0,
            DurationUnit::Hours   => 3_600.0,
        };
        (value * factor).round() as u32
    }
}

impl FromStr for DurationUnit {
    type Err = DemandError;

    fn from_str(s: &str) -> DemandResult<Self> {
        match s.trim() {
            "s" | "sec" | "secs"     => Ok(DurationUnit::Seconds),
            "min" | "mins" | "m"     => Ok(DurationUnit::Minutes),
            "h" | "hr" | "hours"     => Ok(DurationUnit::Hours),
            other => Err(DemandError::UnknownDurationUnit(other.to_owned())),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse `HH:MM` or `HH:MM:SS` into seconds since midnight.
///
/// Hours may exceed 23 for periods that run past midnight.
pub fn parse_clock_time(s: &str) -> DemandResult<u32> {
    let bad = || DemandError::TimeFormat(s.to_owned());
    let parts: Vec<&str> = s.trim().split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(bad());
    }
    let mut fields = [0u32; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| bad())?;
    }
    let [h, m, sec] = fields;
    if m >= 60 || sec >= 60 {
        return Err(bad());
    }
    Ok(h * 3_600 + m * 60 + sec)
}

/// Inverse of [`parse_clock_time`], always with seconds.
pub fn format_clock_time(secs: u32) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3_600, (secs % 3_600) / 60, secs % 60)
}
