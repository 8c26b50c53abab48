use serde::{Deserialize, Serialize};

/// Knobs for building views from server payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    /// Fail when a day's span falls outside the camera's overall range
    /// (otherwise the divergence is only logged)
    pub strict_day_containment: bool,

    /// strftime pattern used by `TimeFormatter`
    pub time_format: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            strict_day_containment: false,
            time_format: "%Y-%m-%d %H:%M:%S".into(),
        }
    }
}
