use crate::tools::EpisodeMetadata;
use std::path::Path;

/// 組合貼文文字
///
/// 名稱依序取 title、series，都沒有時使用檔名；缺少的欄位整段省略
#[must_use]
pub fn build_caption(metadata: &EpisodeMetadata, video_path: &Path, timestamp: f64) -> String {
    let name = metadata
        .title
        .clone()
        .or_else(|| metadata.series.clone())
        .unwrap_or_else(|| {
            video_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| video_path.to_string_lossy().to_string())
        });

    let mut head = name;
    if let Some(year) = metadata.year {
        head.push_str(&format!(" ({year})"));
    }

    let mut segments = vec![head];
    segments.extend(numbered("S", &metadata.season));
    segments.extend(numbered("E", &metadata.episode));
    if let Some(episode_title) = &metadata.episode_title {
        segments.push(format!("- {episode_title}"));
    }
    segments.push(format!("at {}", format_time(timestamp)));

    segments.join(" ")
}

/// 替代文字（alt text）
#[must_use]
pub fn alt_text(caption: &str) -> String {
    format!("Randomly extracted frame from {caption}")
}

/// `S01`、`E03`；多個值時以首尾組成範圍，如 `E01-E02`
fn numbered(prefix: &str, values: &[u32]) -> Option<String> {
    match values {
        [] => None,
        [single] => Some(format!("{prefix}{single:02}")),
        [first, .., last] => Some(format!("{prefix}{first:02}-{prefix}{last:02}")),
    }
}

/// 將秒數格式化為 `MM:SS`，分鐘不以 60 為上限
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
