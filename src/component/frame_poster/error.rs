use std::path::PathBuf;
use thiserror::Error;

/// 會中止本次執行的錯誤
///
/// 檔名資訊推測失敗不在此列，見 [`super::MetadataOutcome`]
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no video files found under {}", directory.display())]
    NoVideoFiles { directory: PathBuf },
    #[error("failed to probe duration of {}", video.display())]
    Probe {
        video: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("invalid duration {duration} for {}", video.display())]
    InvalidDuration { video: PathBuf, duration: f64 },
    #[error("failed to extract frame from {}", video.display())]
    Extract {
        video: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("BSKY_IDENTIFIER and BSKY_PASSWORD must be set to publish")]
    MissingCredentials,
    #[error("authentication failed")]
    Login(#[source] anyhow::Error),
    #[error("failed to read extracted frame {}", path.display())]
    ReadFrame {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image upload failed")]
    Upload(#[source] anyhow::Error),
    #[error("post creation failed")]
    Post(#[source] anyhow::Error),
}
