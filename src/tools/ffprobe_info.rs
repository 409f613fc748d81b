use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    duration: Option<String>,
}

/// 使用 ffprobe 取得影片長度（秒）
pub fn probe_duration(ffprobe: &Path, path: &Path) -> Result<f64> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .with_context(|| format!("Failed to run ffprobe on {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe exited with {}: {}", output.status, stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_duration(&stdout).with_context(|| format!("No usable duration for {}", path.display()))
}

/// 解析 ffprobe 的 JSON 輸出
///
/// 優先使用 format 的長度，其次取最長的串流長度
fn parse_duration(json: &str) -> Result<f64> {
    let probe: FfprobeOutput =
        serde_json::from_str(json).context("Failed to parse ffprobe output")?;

    let format_duration = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok());

    let stream_duration = || {
        probe
            .streams
            .iter()
            .flatten()
            .filter_map(|s| s.duration.as_deref())
            .filter_map(|d| d.parse::<f64>().ok())
            .reduce(f64::max)
    };

    format_duration
        .or_else(stream_duration)
        .ok_or_else(|| anyhow::anyhow!("ffprobe reported no duration"))
}
