//! 管線所依賴的外部能力
//!
//! 每項能力以 trait 表示，實際實作呼叫 ffmpeg / guessit / Bluesky，
//! 測試時可換成假物件

use crate::component::publisher::{BlobRef, PostDraft, PostRef, Session};
use crate::config::{Credentials, ToolPaths};
use crate::tools::{EpisodeMetadata, extract_frame, guess_metadata, probe_duration};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// 影片探測與擷取
pub trait MediaTool {
    fn probe_duration(&self, video: &Path) -> Result<f64>;
    fn extract_frame(&self, video: &Path, timestamp: f64, output: &Path) -> Result<()>;
}

/// 檔名資訊推測
pub trait MetadataGuesser {
    fn guess(&self, video: &Path) -> Result<EpisodeMetadata>;
}

/// 社群平台發佈
pub trait SocialPublisher {
    fn login(&self, credentials: &Credentials) -> Result<Session>;
    fn upload_image(&self, session: &Session, bytes: Vec<u8>) -> Result<BlobRef>;
    fn create_post(&self, session: &Session, draft: &PostDraft) -> Result<PostRef>;
}

/// 以 ffprobe / ffmpeg 命令列實作 [`MediaTool`]
#[derive(Debug, Clone)]
pub struct FfmpegMedia {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegMedia {
    #[must_use]
    pub fn new(tools: &ToolPaths) -> Self {
        Self {
            ffmpeg: tools.ffmpeg.clone(),
            ffprobe: tools.ffprobe.clone(),
        }
    }
}

impl MediaTool for FfmpegMedia {
    fn probe_duration(&self, video: &Path) -> Result<f64> {
        probe_duration(&self.ffprobe, video)
    }

    fn extract_frame(&self, video: &Path, timestamp: f64, output: &Path) -> Result<()> {
        extract_frame(&self.ffmpeg, video, timestamp, output)
    }
}

/// 以 guessit 命令列實作 [`MetadataGuesser`]
#[derive(Debug, Clone)]
pub struct Guessit {
    program: PathBuf,
}

impl Guessit {
    #[must_use]
    pub fn new(tools: &ToolPaths) -> Self {
        Self {
            program: tools.guessit.clone(),
        }
    }
}

impl MetadataGuesser for Guessit {
    fn guess(&self, video: &Path) -> Result<EpisodeMetadata> {
        guess_metadata(&self.program, video)
    }
}
