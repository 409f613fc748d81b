use super::capabilities::{MediaTool, MetadataGuesser, SocialPublisher};
use super::error::PipelineError;
use crate::component::publisher::{PostDraft, PostRef};
use crate::config::{Config, Credentials};
use crate::tools::{
    DirectoryList, EpisodeMetadata, alt_text, build_caption, ensure_directory_exists, pick_one,
    random_timestamp, scan_video_files,
};
use log::{error, info, warn};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// 檔名資訊推測的結果
///
/// 推測失敗不會中止流程，只會退化為空白資訊
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOutcome {
    Inferred(EpisodeMetadata),
    Degraded { reason: String },
}

impl MetadataOutcome {
    #[must_use]
    pub fn metadata(&self) -> EpisodeMetadata {
        match self {
            Self::Inferred(metadata) => metadata.clone(),
            Self::Degraded { .. } => EpisodeMetadata::default(),
        }
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// 管線執行時需要的設定
#[derive(Debug, Clone)]
pub struct PosterSettings {
    pub credentials: Option<Credentials>,
    pub frame_dir: PathBuf,
}

impl From<&Config> for PosterSettings {
    fn from(config: &Config) -> Self {
        Self {
            credentials: config.credentials.clone(),
            frame_dir: config.frame_dir.clone(),
        }
    }
}

/// 單次執行的結果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub directory: PathBuf,
    pub video: PathBuf,
    pub metadata: MetadataOutcome,
    pub timestamp: f64,
    pub caption: String,
    pub post: PostRef,
}

/// 隨機截圖發文器
///
/// 流程：
/// 1. 隨機挑選根目錄並掃描影片
/// 2. 隨機挑選一部影片並推測劇集資訊（失敗不中止）
/// 3. 取得影片長度並隨機選取時間點
/// 4. 擷取截圖、組合文字
/// 5. 登入、上傳圖片、發文，成功後刪除暫存截圖
pub struct FramePoster<M, G, P> {
    settings: PosterSettings,
    media: M,
    guesser: G,
    publisher: P,
}

impl<M, G, P> FramePoster<M, G, P>
where
    M: MediaTool,
    G: MetadataGuesser,
    P: SocialPublisher,
{
    pub const fn new(settings: PosterSettings, media: M, guesser: G, publisher: P) -> Self {
        Self {
            settings,
            media,
            guesser,
            publisher,
        }
    }

    pub fn run(&self, directories: &DirectoryList) -> Result<RunReport, PipelineError> {
        self.run_with_rng(directories, &mut rand::rng())
    }

    pub fn run_with_rng<R>(
        &self,
        directories: &DirectoryList,
        rng: &mut R,
    ) -> Result<RunReport, PipelineError>
    where
        R: Rng + ?Sized,
    {
        let directory = directories.choose(rng).to_path_buf();
        info!("Selected directory: {}", directory.display());

        let videos = scan_video_files(&directory);
        let Some(video) = pick_one(&videos, rng).cloned() else {
            return Err(PipelineError::NoVideoFiles { directory });
        };
        info!(
            "Randomly selected video file: {} (out of {})",
            video.display(),
            videos.len()
        );

        let metadata = self.infer_metadata(&video);

        let duration =
            self.media
                .probe_duration(&video)
                .map_err(|source| PipelineError::Probe {
                    video: video.clone(),
                    source,
                })?;
        let timestamp =
            random_timestamp(duration, rng).ok_or_else(|| PipelineError::InvalidDuration {
                video: video.clone(),
                duration,
            })?;
        info!("Duration {duration:.2}s, extracting frame at {timestamp:.3}s");

        let frame_path = self.extract_to_temp(&video, timestamp)?;
        let caption = build_caption(&metadata.metadata(), &video, timestamp);
        info!("Caption: {caption}");

        let post = self.publish(&frame_path, &caption)?;

        if let Err(e) = fs::remove_file(&frame_path) {
            warn!(
                "Failed to remove temporary frame {}: {e}",
                frame_path.display()
            );
        }

        Ok(RunReport {
            directory,
            video,
            metadata,
            timestamp,
            caption,
            post,
        })
    }

    fn infer_metadata(&self, video: &Path) -> MetadataOutcome {
        match self.guesser.guess(video) {
            Ok(metadata) => {
                info!("GuessIt metadata: {metadata:?}");
                MetadataOutcome::Inferred(metadata)
            }
            Err(e) => {
                error!("GuessIt failed, proceeding without metadata: {e:#}");
                MetadataOutcome::Degraded {
                    reason: format!("{e:#}"),
                }
            }
        }
    }

    /// 每次執行使用獨立的暫存檔名，避免與其他執行互相覆寫
    fn extract_to_temp(&self, video: &Path, timestamp: f64) -> Result<PathBuf, PipelineError> {
        let extract_error = |source| PipelineError::Extract {
            video: video.to_path_buf(),
            source,
        };

        ensure_directory_exists(&self.settings.frame_dir).map_err(extract_error)?;
        let frame_path = self
            .settings
            .frame_dir
            .join(format!("random_frame_{}.jpg", Uuid::new_v4()));

        self.media
            .extract_frame(video, timestamp, &frame_path)
            .map_err(extract_error)?;
        Ok(frame_path)
    }

    fn publish(&self, frame_path: &Path, caption: &str) -> Result<PostRef, PipelineError> {
        let credentials = self
            .settings
            .credentials
            .as_ref()
            .ok_or(PipelineError::MissingCredentials)?;

        let session = self
            .publisher
            .login(credentials)
            .map_err(PipelineError::Login)?;

        let bytes = fs::read(frame_path).map_err(|source| PipelineError::ReadFrame {
            path: frame_path.to_path_buf(),
            source,
        })?;

        let image = self
            .publisher
            .upload_image(&session, bytes)
            .map_err(PipelineError::Upload)?;

        let draft = PostDraft {
            text: caption.to_string(),
            image,
            alt: alt_text(caption),
        };
        self.publisher
            .create_post(&session, &draft)
            .map_err(PipelineError::Post)
    }
}
