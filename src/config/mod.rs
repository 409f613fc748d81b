pub mod file_type;
pub mod load;
pub mod types;

pub use file_type::{VIDEO_EXTENSIONS, is_video_file};
pub use types::{
    Config, Credentials, DEFAULT_CRON, DEFAULT_SERVICE_URL, RunMode, ToolPaths,
};
