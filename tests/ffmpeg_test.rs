//! 以真實的 ffmpeg / ffprobe 驗證影片長度與截圖
//!
//! 系統未安裝 ffmpeg 時略過

use std::fs;
use std::path::Path;
use std::process::Command;

use random_frame_bot::component::frame_poster::{FfmpegMedia, MediaTool};
use random_frame_bot::config::ToolPaths;
use tempfile::TempDir;

fn ffmpeg_available() -> bool {
    ["ffmpeg", "ffprobe"].iter().all(|tool| {
        Command::new(tool)
            .arg("-version")
            .output()
            .is_ok_and(|o| o.status.success())
    })
}

fn generate_test_video(path: &Path) {
    let status = Command::new("ffmpeg")
        .args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=3:size=320x240:rate=10",
            "-pix_fmt",
            "yuv420p",
            "-y",
        ])
        .arg(path)
        .status()
        .unwrap();
    assert!(status.success(), "failed to generate test video");
}

#[test]
fn test_probe_and_extract_real_video() {
    if !ffmpeg_available() {
        println!("跳過測試：找不到 ffmpeg / ffprobe");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let video = temp_dir.path().join("Test.Show.S01E02.mp4");
    generate_test_video(&video);

    let media = FfmpegMedia::new(&ToolPaths::default());

    let duration = media.probe_duration(&video).unwrap();
    assert!((duration - 3.0).abs() < 0.5, "unexpected duration {duration}");

    let frame = temp_dir.path().join("frame.jpg");
    media.extract_frame(&video, 2.5, &frame).unwrap();

    let bytes = fs::read(&frame).unwrap();
    assert!(bytes.starts_with(&[0xFF, 0xD8]), "output is not a JPEG");
}

#[test]
fn test_extract_after_last_frame_falls_back_to_final_frame() {
    if !ffmpeg_available() {
        println!("跳過測試：找不到 ffmpeg / ffprobe");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let video = temp_dir.path().join("Tail.mp4");
    generate_test_video(&video);

    let media = FfmpegMedia::new(&ToolPaths::default());
    let duration = media.probe_duration(&video).unwrap();

    // 10 fps 的最後一幀從 2.9 秒開始，結尾前一點點已沒有可解碼的畫面
    let frame = temp_dir.path().join("tail.jpg");
    media.extract_frame(&video, duration - 0.01, &frame).unwrap();

    let bytes = fs::read(&frame).unwrap();
    assert!(bytes.starts_with(&[0xFF, 0xD8]), "output is not a JPEG");
}

#[test]
fn test_probe_rejects_non_video() {
    if !ffmpeg_available() {
        println!("跳過測試：找不到 ffmpeg / ffprobe");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let fake = temp_dir.path().join("broken.mp4");
    fs::write(&fake, "definitely not a video").unwrap();

    let media = FfmpegMedia::new(&ToolPaths::default());
    assert!(media.probe_duration(&fake).is_err());
    assert!(
        media
            .extract_frame(&fake, 0.0, &temp_dir.path().join("frame.jpg"))
            .is_err()
    );
}
