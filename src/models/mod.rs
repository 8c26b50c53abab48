pub mod camera;
pub mod day;
pub mod json_view;
pub mod recording;
pub mod stream;
pub mod time_range;
pub mod top_level;

pub use camera::CameraView;
pub use day::{DayKey, Days};
pub use json_view::JsonView;
pub use recording::{init_segment_path, RecordingList, RecordingView};
pub use stream::StreamType;
pub use time_range::{TimeRange, MAX_TICKS, TICKS_PER_SECOND};
pub use top_level::TopLevelView;
