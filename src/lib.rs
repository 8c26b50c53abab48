//! Typed, range-aware views over the JSON a recording server hands its web UI.
//!
//! Recording timelines are kept in 90 kHz ticks. A [`CameraView`] validates one
//! camera's payload up front and exposes its summary [`TimeRange`] plus the
//! per-day ranges in the order the server sent them.

pub mod config;
pub mod error;
pub mod format;
mod helpers;
pub mod models;
mod utils;

pub use config::ViewConfig;
pub use error::{Result, ViewError};
pub use format::{format_duration, TimeFormatter};
pub use models::{
    init_segment_path, CameraView, DayKey, Days, JsonView, RecordingList, RecordingView,
    StreamType, TimeRange, TopLevelView, MAX_TICKS, TICKS_PER_SECOND,
};
pub use utils::logging::init_logging;
