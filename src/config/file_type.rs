use std::path::Path;

/// 可被挑選的影片副檔名（小寫、不含前導點）
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "mkv"];

/// 判斷是否為可挑選的影片檔案
///
/// 副檔名不分大小寫，以 `.` 開頭的隱藏檔一律排除
#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}
