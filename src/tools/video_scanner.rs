use crate::config::is_video_file;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 掃描資料夾（含所有子資料夾）下可挑選的影片
///
/// 依檔名排序走訪，結果順序固定；無法讀取的項目記錄後略過
#[must_use]
pub fn scan_video_files(directory: &Path) -> Vec<PathBuf> {
    let video_files: Vec<PathBuf> = WalkDir::new(directory)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {e}", directory.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_video_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();

    debug!(
        "Found {} video files under {}",
        video_files.len(),
        directory.display()
    );
    video_files
}
