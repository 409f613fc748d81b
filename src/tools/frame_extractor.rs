use anyhow::{Context, Result, bail};
use log::{debug, warn};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// 兩段式 seek 的前置緩衝時間（秒）
const SEEK_MARGIN: f64 = 2.0;

/// 目標時間點落在最後一幀之後時，從片尾往前解碼的範圍（秒）
const TAIL_WINDOW: f64 = 5.0;

const OUTPUT_ARGS: [&str; 10] = [
    "-an", "-sn", "-dn", "-f", "image2", "-c:v", "mjpeg", "-q:v", "2", "-y",
];

/// 使用 ffmpeg 在指定時間點擷取單張 JPEG
///
/// 兩段式 seek：
/// 1. `-ss` 在 `-i` 前：快速跳轉到最近的關鍵幀
/// 2. `-ss` 在 `-i` 後：精準解碼到目標時間點
///
/// 時間點介於最後一幀與影片結尾之間時不會有任何輸出，改取片尾最後一幀
pub fn extract_frame(ffmpeg: &Path, video: &Path, timestamp: f64, output: &Path) -> Result<()> {
    run_ffmpeg(ffmpeg, video, &build_args(video, timestamp, output))
        .with_context(|| format!("ffmpeg failed to extract frame at {timestamp:.3}s"))?;

    if !output.exists() && timestamp > 0.0 {
        warn!(
            "No frame decoded at {timestamp:.3}s in {}, using the last frame instead",
            video.display()
        );
        run_ffmpeg(ffmpeg, video, &build_tail_args(video, output))
            .context("ffmpeg failed to extract the last frame")?;
    }

    if !output.exists() {
        bail!("ffmpeg did not produce {}", output.display());
    }

    Ok(())
}

fn run_ffmpeg(ffmpeg: &Path, video: &Path, args: &[OsString]) -> Result<()> {
    debug!("Running {} {:?}", ffmpeg.display(), args);

    let result = Command::new(ffmpeg)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run ffmpeg on {}", video.display()))?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        bail!("{}", stderr.trim());
    }
    Ok(())
}

fn base_args() -> Vec<OsString> {
    ["-hide_banner", "-nostdin", "-loglevel", "error"]
        .into_iter()
        .map(OsString::from)
        .collect()
}

fn build_args(video: &Path, timestamp: f64, output: &Path) -> Vec<OsString> {
    let t0 = (timestamp - SEEK_MARGIN).max(0.0);
    let delta = timestamp - t0;

    let mut args = base_args();

    if t0 > 0.0 {
        args.push("-ss".into());
        args.push(format!("{t0:.3}").into());
    }

    args.push("-i".into());
    args.push(video.as_os_str().to_owned());

    if delta > 0.0 {
        args.push("-ss".into());
        args.push(format!("{delta:.3}").into());
    }

    args.push("-frames:v".into());
    args.push("1".into());
    args.extend(OUTPUT_ARGS.into_iter().map(OsString::from));
    args.push(output.as_os_str().to_owned());
    args
}

/// 解碼片尾一段並持續覆寫同一個檔案，留下的就是最後一幀
fn build_tail_args(video: &Path, output: &Path) -> Vec<OsString> {
    let mut args = base_args();
    args.push("-sseof".into());
    args.push(format!("-{TAIL_WINDOW:.3}").into());
    args.push("-i".into());
    args.push(video.as_os_str().to_owned());
    args.push("-update".into());
    args.push("1".into());
    args.extend(OUTPUT_ARGS.into_iter().map(OsString::from));
    args.push(output.as_os_str().to_owned());
    args
}
