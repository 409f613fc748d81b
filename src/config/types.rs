use std::fmt;
use std::path::PathBuf;

/// 預設的 Bluesky 服務位址
pub const DEFAULT_SERVICE_URL: &str = "https://bsky.social";

/// 未指定 `cron` 時的預設排程（每天中午 12 點）
pub const DEFAULT_CRON: &str = "0 12 * * *";

/// 登入用的帳號密碼
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// 執行模式：單次執行或依排程重複執行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    OneShot,
    Recurring { cron: String },
}

/// 外部工具的執行檔路徑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub guessit: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            guessit: PathBuf::from("guessit"),
        }
    }
}

/// 程式設定
///
/// 啟動時建立一次，之後以參照的方式傳入各元件
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Option<Credentials>,
    pub service_url: String,
    pub mode: RunMode,
    /// 暫存截圖的資料夾
    pub frame_dir: PathBuf,
    pub tools: ToolPaths,
    pub log_file: Option<PathBuf>,
}
