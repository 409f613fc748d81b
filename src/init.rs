use anyhow::{Context, Result};
use env_logger::{Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

/// 初始化日誌
///
/// 預設等級為 `info`，可用 `RUST_LOG` 調整；指定檔案時改為附加寫入該檔案
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .context("Logger was already initialized")?;
    Ok(())
}
