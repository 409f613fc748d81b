use crate::config::types::{
    Config, Credentials, DEFAULT_CRON, DEFAULT_SERVICE_URL, RunMode, ToolPaths,
};
use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

impl Config {
    /// 從 `.env`（若存在）與環境變數載入設定
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(dotenvy::Error::Io(_)) => {}
            Err(e) => return Err(e).context("Failed to parse .env file"),
        }

        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// 以指定的查詢函式建立設定，方便測試時不動到行程環境變數
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| lookup(*key))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let credentials = match (get(&["BSKY_IDENTIFIER"]), get(&["BSKY_PASSWORD"])) {
            (Some(identifier), Some(password)) => Some(Credentials {
                identifier,
                password,
            }),
            _ => None,
        };

        let mode = if get(&["scheduled", "SCHEDULED"]).is_some_and(|v| parse_flag(&v)) {
            RunMode::Recurring {
                cron: get(&["cron", "CRON"]).unwrap_or_else(|| DEFAULT_CRON.to_string()),
            }
        } else {
            RunMode::OneShot
        };

        let defaults = ToolPaths::default();
        let tools = ToolPaths {
            ffmpeg: get(&["FFMPEG_BIN"]).map_or(defaults.ffmpeg, PathBuf::from),
            ffprobe: get(&["FFPROBE_BIN"]).map_or(defaults.ffprobe, PathBuf::from),
            guessit: get(&["GUESSIT_BIN"]).map_or(defaults.guessit, PathBuf::from),
        };

        Self {
            credentials,
            service_url: get(&["BSKY_SERVICE"])
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string()),
            mode,
            frame_dir: get(&["FRAME_DIR"]).map_or_else(std::env::temp_dir, PathBuf::from),
            tools,
            log_file: get(&["LOG_FILE"]).map(PathBuf::from),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
