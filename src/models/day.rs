//! Calendar-day keys and the ordered per-day range collection.

use std::fmt;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{Result, ViewError};
use crate::helpers::{as_object, field_path, Object};
use crate::models::time_range::{TimeRange, DAY_RANGE_FIELDS};

/// A `YYYY-MM-DD` key naming one day's bucket of recordings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey {
    date: NaiveDate,
    key: String,
}

impl DayKey {
    pub fn parse(key: &str) -> Result<Self> {
        let bytes = key.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(ViewError::malformed_day_key(key, "expected YYYY-MM-DD"));
        }
        let date = NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .map_err(|_| ViewError::malformed_day_key(key, "not a calendar date"))?;
        Ok(Self {
            date,
            key: key.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}

/// Day key to coverage, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Days {
    entries: Vec<(DayKey, TimeRange)>,
}

impl Days {
    /// Builds from the payload's `days` object. Each entry is validated on its
    /// own; nothing is checked across days.
    pub(crate) fn from_value(value: &serde_json::Value, context: &str) -> Result<Self> {
        let obj = as_object(value, context)?;
        Self::from_object(obj, context)
    }

    fn from_object(obj: &Object, context: &str) -> Result<Self> {
        let mut entries = Vec::with_capacity(obj.len());
        for (key, entry) in obj {
            let day = DayKey::parse(key).map_err(|e| e.in_context(context))?;
            let entry_context = field_path(context, key);
            let entry = as_object(entry, &entry_context)?;
            let range = TimeRange::from_object(entry, &entry_context, &DAY_RANGE_FIELDS)?;
            entries.push((day, range));
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&TimeRange> {
        self.entries
            .iter()
            .find(|(day, _)| day.as_str() == key)
            .map(|(_, range)| range)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &TimeRange)> {
        self.entries.iter().map(|(day, range)| (day, range))
    }

    pub fn keys(&self) -> impl Iterator<Item = &DayKey> {
        self.entries.iter().map(|(day, _)| day)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_present_ticks(&self) -> i64 {
        self.entries
            .iter()
            .map(|(_, range)| range.present_duration_ticks())
            .sum()
    }
}

impl Serialize for Days {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (day, range) in &self.entries {
            map.serialize_entry(day.as_str(), range)?;
        }
        map.end()
    }
}
