use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::path::Path;
use std::process::Command;

/// 從檔名推測出的劇集資訊
///
/// 所有欄位皆為選填；季數與集數可能有多個值（例如一個檔案包含兩集）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeMetadata {
    pub title: Option<String>,
    pub series: Option<String>,
    pub season: Vec<u32>,
    pub episode: Vec<u32>,
    pub episode_title: Option<String>,
    pub year: Option<u32>,
}

impl EpisodeMetadata {
    /// 解析 `guessit -j` 的輸出
    pub fn from_guessit_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("Failed to parse guessit output")?;
        let Value::Object(fields) = value else {
            bail!("guessit output is not a JSON object");
        };

        Ok(Self {
            title: text_field(&fields, "title"),
            series: text_field(&fields, "series"),
            season: number_list(&fields, "season"),
            episode: number_list(&fields, "episode"),
            episode_title: text_field(&fields, "episode_title"),
            year: number_list(&fields, "year").first().copied(),
        })
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match fields.get(key)? {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn number_list(fields: &Map<String, Value>, key: &str) -> Vec<u32> {
    let as_number = |value: &Value| match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    match fields.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(as_number).collect(),
        Some(value) => as_number(value).into_iter().collect(),
        None => Vec::new(),
    }
}

/// 以 guessit 命令列工具解析檔名
pub fn guess_metadata(guessit: &Path, path: &Path) -> Result<EpisodeMetadata> {
    let output = Command::new(guessit)
        .arg("-j")
        .arg(path)
        .output()
        .with_context(|| format!("Failed to run guessit on {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("guessit exited with {}: {}", output.status, stderr.trim());
    }

    EpisodeMetadata::from_guessit_json(&String::from_utf8_lossy(&output.stdout))
}
