//! Rendering ticks and ranges as strings in the server's time zone.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::config::ViewConfig;
use crate::error::{Result, ViewError};
use crate::models::time_range::{ticks_to_datetime, TimeRange, MAX_TICKS, TICKS_PER_SECOND};

#[derive(Debug, Clone, PartialEq)]
pub struct TimeFormatter {
    tz: Tz,
    format: String,
}

impl TimeFormatter {
    /// `time_zone_name` is an IANA name such as `America/Los_Angeles`.
    pub fn new(time_zone_name: &str, format: &str) -> Result<Self> {
        let tz: Tz = time_zone_name.parse().map_err(|_| {
            ViewError::validation(format!("unknown time zone {time_zone_name:?}"))
        })?;
        // chrono panics while rendering a bad pattern, so reject it here.
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(ViewError::validation(format!(
                "invalid time format {format:?}"
            )));
        }
        Ok(Self {
            tz,
            format: format.to_string(),
        })
    }

    pub fn from_config(time_zone_name: &str, config: &ViewConfig) -> Result<Self> {
        Self::new(time_zone_name, &config.time_format)
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    pub fn format_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        timestamp.with_timezone(&self.tz).format(&self.format).to_string()
    }

    /// Fails for ticks before the epoch or past `MAX_TICKS`.
    pub fn format_tick(&self, tick: i64) -> Result<String> {
        if !(0..=MAX_TICKS).contains(&tick) {
            return Err(ViewError::validation(format!(
                "tick {tick} is outside 0..={MAX_TICKS}"
            )));
        }
        Ok(self.format_timestamp(ticks_to_datetime(tick)))
    }

    pub fn format_range(&self, range: &TimeRange) -> String {
        format!(
            "{} to {}",
            self.format_timestamp(range.as_start_timestamp()),
            self.format_timestamp(range.as_end_timestamp())
        )
    }
}

/// Whole-second duration label such as `1h 02m 03s`, `4m 05s` or `7s`.
pub fn format_duration(ticks: i64) -> String {
    let total = ticks.max(0) / TICKS_PER_SECOND;
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
