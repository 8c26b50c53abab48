//! Typed, read-only view over one camera's JSON.
//!
//! Everything is derived once, when the view is built; a refreshed payload
//! means a new `CameraView`, never an in-place update.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::ViewConfig;
use crate::error::{Result, ViewError};
use crate::helpers::{as_object, field_path, require_non_negative, require_str};
use crate::models::day::{DayKey, Days};
use crate::models::json_view::JsonView;
use crate::models::stream::StreamType;
use crate::models::time_range::{TimeRange, CAMERA_RANGE_FIELDS};
use crate::{log_debug, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraView {
    #[serde(skip)]
    raw: JsonView,
    id: String,
    short_name: String,
    description: String,
    retain_bytes: i64,
    #[serde(rename = "totalSampleFileBytes")]
    used_bytes: i64,
    overall_range: TimeRange,
    days: Days,
}

impl CameraView {
    pub fn new(payload: Value) -> Result<Self> {
        Self::with_config(payload, &ViewConfig::default())
    }

    pub fn with_config(payload: Value, config: &ViewConfig) -> Result<Self> {
        Self::build(JsonView::new(payload), "", config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::new(serde_json::from_str(text)?)
    }

    /// `context` locates the camera inside a larger document, e.g. `cameras[2]`.
    pub(crate) fn build(raw: JsonView, context: &str, config: &ViewConfig) -> Result<Self> {
        let result = Self::parse(raw, context, config);
        match &result {
            Ok(camera) => log_debug!(
                "loaded camera {} ({}) with {} day(s)",
                camera.short_name,
                camera.id,
                camera.days.len()
            ),
            Err(e) => log_warn!("rejected camera payload: {}", e),
        }
        result
    }

    fn parse(raw: JsonView, context: &str, config: &ViewConfig) -> Result<Self> {
        let obj = as_object(raw.json(), context)?;

        let id = require_str(obj, "id", context)?;
        let short_name = require_str(obj, "shortName", context)?;
        let description = require_str(obj, "description", context)?;
        let retain_bytes = require_non_negative(obj, "retainBytes", context)?;
        let used_bytes = require_non_negative(obj, "totalSampleFileBytes", context)?;
        let overall_range = TimeRange::from_object(obj, context, &CAMERA_RANGE_FIELDS)?;

        // Cameras listed without `?days=true` carry no day collection.
        let days = match obj.get("days") {
            None | Some(Value::Null) => Days::default(),
            Some(value) => Days::from_value(value, &field_path(context, "days"))?,
        };

        let camera = Self {
            raw,
            id,
            short_name,
            description,
            retain_bytes,
            used_bytes,
            overall_range,
            days,
        };

        let divergent = camera.divergent_days();
        if !divergent.is_empty() {
            let keys: Vec<&str> = divergent.iter().map(|d| d.as_str()).collect();
            if config.strict_day_containment {
                return Err(ViewError::validation(format!(
                    "{}: day(s) {} fall outside the overall range",
                    field_path(context, "days"),
                    keys.join(", ")
                )));
            }
            log_warn!(
                "camera {}: day(s) {} fall outside the overall range",
                camera.id,
                keys.join(", ")
            );
        }

        Ok(camera)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn retain_bytes(&self) -> i64 {
        self.retain_bytes
    }

    pub fn used_bytes(&self) -> i64 {
        self.used_bytes
    }

    pub fn overall_range(&self) -> TimeRange {
        self.overall_range
    }

    pub fn days(&self) -> &Days {
        &self.days
    }

    /// The payload this view was built from.
    pub fn json(&self) -> &Value {
        self.raw.json()
    }

    /// Days whose span is not inside `overall_range`. Upstream normally
    /// guarantees there are none.
    pub fn divergent_days(&self) -> Vec<&DayKey> {
        self.days
            .iter()
            .filter(|(_, range)| !self.overall_range.contains(range))
            .map(|(day, _)| day)
            .collect()
    }

    pub fn uuid(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.id)
            .map_err(|_| ViewError::validation(format!("camera id {:?} is not a UUID", self.id)))
    }

    pub fn camera_path(&self) -> Result<String> {
        Ok(format!("/api/cameras/{}/", self.uuid()?))
    }

    /// `range` limits the listing; `split_90k` asks the server to break runs
    /// longer than that many ticks.
    pub fn recordings_path(
        &self,
        stream: StreamType,
        range: Option<&TimeRange>,
        split_90k: Option<i64>,
    ) -> Result<String> {
        let mut query = Vec::new();
        if let Some(range) = range {
            query.push(format!("startTime90k={}", range.start_tick()));
            query.push(format!("endTime90k={}", range.end_tick()));
        }
        if let Some(split) = split_90k {
            if split <= 0 {
                return Err(ViewError::validation(format!(
                    "split90k must be positive, got {split}"
                )));
            }
            query.push(format!("split90k={split}"));
        }

        let mut path = format!("{}{}/recordings", self.camera_path()?, stream.as_str());
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }
        Ok(path)
    }

    /// `segment` is a value built by `RecordingView::segment_param`.
    pub fn view_mp4_path(&self, stream: StreamType, segment: &str) -> Result<String> {
        self.view_path(stream, "view.mp4", segment)
    }

    /// Media segment for Media Source Extensions playback; pair it with
    /// `RecordingView::init_segment_path`.
    pub fn view_m4s_path(&self, stream: StreamType, segment: &str) -> Result<String> {
        self.view_path(stream, "view.m4s", segment)
    }

    fn view_path(&self, stream: StreamType, file: &str, segment: &str) -> Result<String> {
        Ok(format!(
            "{}{}/{}?s={}",
            self.camera_path()?,
            stream.as_str(),
            file,
            segment
        ))
    }
}
