//! Views over a stream's `/recordings` listing.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, ViewError};
use crate::helpers::{
    as_object, optional_bool, optional_i64, require, require_non_negative, require_str,
};
use crate::models::json_view::JsonView;
use crate::models::time_range::TimeRange;

/// One (possibly aggregated) run of recordings. Recordings carry no gaps, so
/// `range()` is fully present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingView {
    start_id: i64,
    /// Inclusive; absent when the run is a single recording.
    #[serde(skip_serializing_if = "Option::is_none")]
    end_id: Option<i64>,
    open_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_uncommitted: Option<i64>,
    #[serde(flatten)]
    range: TimeRange,
    sample_file_bytes: i64,
    video_samples: i64,
    video_sample_entry_width: i64,
    video_sample_entry_height: i64,
    video_sample_entry_sha1: String,
    growing: bool,
}

/// Path of the MP4 initialization segment for a video sample entry.
pub fn init_segment_path(sha1: &str) -> Result<String> {
    if sha1.len() != 40 || !sha1.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ViewError::validation(format!(
            "{sha1:?} is not a 40-digit hex SHA-1"
        )));
    }
    Ok(format!("/api/init/{}.mp4", sha1.to_ascii_lowercase()))
}

impl RecordingView {
    fn from_value(value: &Value, context: &str) -> Result<Self> {
        let obj = as_object(value, context)?;
        let start_id = require_non_negative(obj, "startId", context)?;
        let end_id = optional_i64(obj, "endId", context)?;
        if let Some(end) = end_id {
            if end < start_id {
                return Err(ViewError::validation(format!(
                    "{context}: endId {end} is before startId {start_id}"
                )));
            }
        }
        let start = require_non_negative(obj, "startTime90k", context)?;
        let end = require_non_negative(obj, "endTime90k", context)?;
        let range = TimeRange::contiguous(start, end)
            .map_err(|e| e.in_context(context))?;

        Ok(Self {
            start_id,
            end_id,
            open_id: require_non_negative(obj, "openId", context)?,
            first_uncommitted: optional_i64(obj, "firstUncommitted", context)?,
            range,
            sample_file_bytes: require_non_negative(obj, "sampleFileBytes", context)?,
            video_samples: require_non_negative(obj, "videoSamples", context)?,
            video_sample_entry_width: require_non_negative(obj, "videoSampleEntryWidth", context)?,
            video_sample_entry_height: require_non_negative(
                obj,
                "videoSampleEntryHeight",
                context,
            )?,
            video_sample_entry_sha1: require_str(obj, "videoSampleEntrySha1", context)?,
            growing: optional_bool(obj, "growing", context)?,
        })
    }

    pub fn start_id(&self) -> i64 {
        self.start_id
    }

    pub fn end_id(&self) -> Option<i64> {
        self.end_id
    }

    pub fn open_id(&self) -> i64 {
        self.open_id
    }

    pub fn first_uncommitted(&self) -> Option<i64> {
        self.first_uncommitted
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn sample_file_bytes(&self) -> i64 {
        self.sample_file_bytes
    }

    pub fn video_samples(&self) -> i64 {
        self.video_samples
    }

    pub fn video_sample_entry_width(&self) -> i64 {
        self.video_sample_entry_width
    }

    pub fn video_sample_entry_height(&self) -> i64 {
        self.video_sample_entry_height
    }

    pub fn video_sample_entry_sha1(&self) -> &str {
        &self.video_sample_entry_sha1
    }

    pub fn growing(&self) -> bool {
        self.growing
    }

    pub fn init_segment_path(&self) -> Result<String> {
        init_segment_path(&self.video_sample_entry_sha1)
    }

    /// Builds the `s` parameter for `view.mp4`:
    /// `START_ID[-END_ID][@OPEN_ID][.[REL_START]-[REL_END]]`.
    ///
    /// Relative times are ticks from the start of this run and must stay within it.
    pub fn segment_param(&self, rel_start: Option<i64>, rel_end: Option<i64>) -> Result<String> {
        let span = self.range.span_ticks();
        let start = rel_start.unwrap_or(0);
        if start < 0 || start > span {
            return Err(ViewError::validation(format!(
                "relative start {start} is outside 0..={span}"
            )));
        }
        if let Some(end) = rel_end {
            if end <= start || end > span {
                return Err(ViewError::validation(format!(
                    "relative end {end} must be after {start} and at most {span}"
                )));
            }
        }

        let mut s = self.start_id.to_string();
        if let Some(end_id) = self.end_id {
            s.push_str(&format!("-{end_id}"));
        }
        s.push_str(&format!("@{}", self.open_id));
        if rel_start.is_some() || rel_end.is_some() {
            s.push('.');
            if let Some(start) = rel_start {
                s.push_str(&start.to_string());
            }
            s.push('-');
            if let Some(end) = rel_end {
                s.push_str(&end.to_string());
            }
        }
        Ok(s)
    }
}

/// The `{ "recordings": [...] }` document.
#[derive(Debug, Clone, Serialize)]
pub struct RecordingList {
    #[serde(skip)]
    raw: JsonView,
    recordings: Vec<RecordingView>,
}

impl RecordingList {
    pub fn new(payload: Value) -> Result<Self> {
        let raw = JsonView::new(payload);
        let obj = as_object(raw.json(), "")?;
        let items = require(obj, "recordings", "")?.as_array().ok_or_else(|| {
            ViewError::validation("recordings must be an array")
        })?;
        let recordings = items
            .iter()
            .enumerate()
            .map(|(i, item)| RecordingView::from_value(item, &format!("recordings[{i}]")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { raw, recordings })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::new(serde_json::from_str(text)?)
    }

    pub fn recordings(&self) -> &[RecordingView] {
        &self.recordings
    }

    pub fn json(&self) -> &Value {
        self.raw.json()
    }
}
