//! Tick-resolution time ranges with gap accounting.
//!
//! Recording timelines are expressed in 90 kHz ticks since the Unix epoch. A
//! `TimeRange` is the half-open interval `[start, end)` plus the number of
//! ticks inside it actually covered by recorded video; any shortfall is gap.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};
use crate::helpers::{require_non_negative, Object};

pub const TICKS_PER_SECOND: i64 = 90_000;

/// Last tick of 9999-12-31, so every valid tick has a calendar timestamp.
pub const MAX_TICKS: i64 = 253_402_300_800 * TICKS_PER_SECOND - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    #[serde(rename = "startTime90k")]
    start_tick: i64,
    #[serde(rename = "endTime90k")]
    end_tick: i64,
    #[serde(rename = "totalDuration90k")]
    present_duration_ticks: i64,
}

/// Unchecked wire form; every deserialized range goes through `TimeRange::new`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeRange {
    start_time_90k: i64,
    end_time_90k: i64,
    total_duration_90k: i64,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = ViewError;

    fn try_from(raw: RawTimeRange) -> Result<Self> {
        TimeRange::new(raw.start_time_90k, raw.end_time_90k, raw.total_duration_90k)
    }
}

/// Payload field names for one flavor of range.
pub(crate) struct RangeFields {
    pub start: &'static str,
    pub end: &'static str,
    pub duration: &'static str,
}

/// Camera-level summary fields.
pub(crate) const CAMERA_RANGE_FIELDS: RangeFields = RangeFields {
    start: "minStartTime90k",
    end: "maxEndTime90k",
    duration: "totalDuration90k",
};

/// Per-day fields.
pub(crate) const DAY_RANGE_FIELDS: RangeFields = RangeFields {
    start: "startTime90k",
    end: "endTime90k",
    duration: "totalDuration90k",
};

impl TimeRange {
    pub fn new(start_tick: i64, end_tick: i64, present_duration_ticks: i64) -> Result<Self> {
        for (name, value) in [
            ("start", start_tick),
            ("end", end_tick),
            ("present duration", present_duration_ticks),
        ] {
            if value < 0 {
                return Err(ViewError::validation(format!(
                    "{name} tick {value} is negative"
                )));
            }
        }
        if end_tick > MAX_TICKS {
            return Err(ViewError::validation(format!(
                "end tick {end_tick} is past the last representable tick {MAX_TICKS}"
            )));
        }
        if start_tick > end_tick {
            return Err(ViewError::validation(format!(
                "start tick {start_tick} is after end tick {end_tick}"
            )));
        }
        let span = end_tick - start_tick;
        if present_duration_ticks > span {
            return Err(ViewError::validation(format!(
                "present duration {present_duration_ticks} exceeds span {span}"
            )));
        }
        Ok(Self {
            start_tick,
            end_tick,
            present_duration_ticks,
        })
    }

    /// A range fully covered by video.
    pub fn contiguous(start_tick: i64, end_tick: i64) -> Result<Self> {
        Self::new(start_tick, end_tick, end_tick.saturating_sub(start_tick).max(0))
    }

    pub(crate) fn from_object(obj: &Object, context: &str, fields: &RangeFields) -> Result<Self> {
        let start = require_non_negative(obj, fields.start, context)?;
        let end = require_non_negative(obj, fields.end, context)?;
        let duration = require_non_negative(obj, fields.duration, context)?;
        Self::new(start, end, duration).map_err(|e| e.in_context(context))
    }

    pub fn start_tick(&self) -> i64 {
        self.start_tick
    }

    pub fn end_tick(&self) -> i64 {
        self.end_tick
    }

    pub fn present_duration_ticks(&self) -> i64 {
        self.present_duration_ticks
    }

    pub fn span_ticks(&self) -> i64 {
        self.end_tick - self.start_tick
    }

    pub fn gap_ticks(&self) -> i64 {
        self.span_ticks() - self.present_duration_ticks
    }

    pub fn has_gaps(&self) -> bool {
        self.present_duration_ticks < self.span_ticks()
    }

    /// True when `other`'s span lies within this one's.
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start_tick <= other.start_tick && other.end_tick <= self.end_tick
    }

    pub fn as_start_timestamp(&self) -> DateTime<Utc> {
        ticks_to_datetime(self.start_tick)
    }

    pub fn as_end_timestamp(&self) -> DateTime<Utc> {
        ticks_to_datetime(self.end_tick)
    }

    pub fn span(&self) -> Duration {
        ticks_to_duration(self.span_ticks())
    }

    pub fn present_duration(&self) -> Duration {
        ticks_to_duration(self.present_duration_ticks)
    }
}

pub fn ticks_to_duration(ticks: i64) -> Duration {
    Duration::seconds(ticks / TICKS_PER_SECOND)
        + Duration::nanoseconds((ticks % TICKS_PER_SECOND) * 1_000_000_000 / TICKS_PER_SECOND)
}

pub(crate) fn ticks_to_datetime(ticks: i64) -> DateTime<Utc> {
    let secs = ticks.div_euclid(TICKS_PER_SECOND);
    let nanos = ticks.rem_euclid(TICKS_PER_SECOND) * 1_000_000_000 / TICKS_PER_SECOND;
    // Constructors cap ticks at MAX_TICKS, which chrono always represents.
    DateTime::from_timestamp(secs, nanos as u32).unwrap_or_default()
}
