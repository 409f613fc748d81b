mod caption;
mod directory_list;
mod ffprobe_info;
mod frame_extractor;
mod guessit;
mod path_validator;
mod random_pick;
mod video_scanner;

pub use caption::{alt_text, build_caption, format_time};
pub use directory_list::{DirectoryList, DirectoryListError};
pub use ffprobe_info::probe_duration;
pub use frame_extractor::extract_frame;
pub use guessit::{EpisodeMetadata, guess_metadata};
pub use path_validator::ensure_directory_exists;
pub use random_pick::{pick_one, random_timestamp};
pub use video_scanner::scan_video_files;
