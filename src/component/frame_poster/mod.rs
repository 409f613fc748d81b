//! 隨機截圖發文元件
//!
//! 挑選影片、擷取截圖、組合文字並發佈

mod capabilities;
mod error;
mod main;

pub use capabilities::{FfmpegMedia, Guessit, MediaTool, MetadataGuesser, SocialPublisher};
pub use error::PipelineError;
pub use main::{FramePoster, MetadataOutcome, PosterSettings, RunReport};
