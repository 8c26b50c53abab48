use serde::Serialize;
use serde_json::Value;

use crate::config::ViewConfig;
use crate::error::{Result, ViewError};
use crate::format::TimeFormatter;
use crate::helpers::{as_object, require, require_str};
use crate::models::camera::CameraView;
use crate::models::json_view::JsonView;

/// The server's top-level document: its time zone and every camera.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLevelView {
    #[serde(skip)]
    raw: JsonView,
    time_zone_name: String,
    #[serde(skip)]
    formatter: TimeFormatter,
    cameras: Vec<CameraView>,
}

impl TopLevelView {
    pub fn new(payload: Value) -> Result<Self> {
        Self::with_config(payload, &ViewConfig::default())
    }

    pub fn with_config(payload: Value, config: &ViewConfig) -> Result<Self> {
        let raw = JsonView::new(payload);
        let obj = as_object(raw.json(), "")?;
        let time_zone_name = require_str(obj, "timeZoneName", "")?;
        let formatter = TimeFormatter::from_config(&time_zone_name, config)?;

        let items = require(obj, "cameras", "")?
            .as_array()
            .ok_or_else(|| ViewError::validation("cameras must be an array"))?;
        // Each camera view shares this document rather than copying its slice.
        let cameras = (0..items.len())
            .map(|i| {
                let camera = raw.child(&format!("/cameras/{i}")).ok_or_else(|| {
                    ViewError::validation(format!("cameras[{i}] is missing"))
                })?;
                CameraView::build(camera, &format!("cameras[{i}]"), config)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw,
            time_zone_name,
            formatter,
            cameras,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::new(serde_json::from_str(text)?)
    }

    pub fn time_zone_name(&self) -> &str {
        &self.time_zone_name
    }

    /// Formatter bound to the server's zone and the configured pattern.
    pub fn time_formatter(&self) -> &TimeFormatter {
        &self.formatter
    }

    pub fn cameras(&self) -> &[CameraView] {
        &self.cameras
    }

    pub fn camera(&self, id: &str) -> Option<&CameraView> {
        self.cameras.iter().find(|c| c.id() == id)
    }

    pub fn json(&self) -> &Value {
        self.raw.json()
    }
}
