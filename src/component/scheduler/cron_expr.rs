use anyhow::{Context, Result, bail};
use cron::Schedule;
use std::str::FromStr;

const WEEKDAY_NAMES: [&str; 8] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// 解析排程運算式
///
/// 接受傳統 5 欄位（分 時 日 月 週）寫法，以及 `cron` crate 的 6/7 欄位（含秒、年）寫法
pub fn parse_schedule(expression: &str) -> Result<Schedule> {
    let normalized = normalize(expression)?;
    Schedule::from_str(&normalized)
        .with_context(|| format!("Invalid cron expression '{expression}'"))
}

/// 將 5 欄位轉為 6 欄位
///
/// 5 欄位寫法的星期以 0/7 表示週日，轉為英文縮寫以免與 `cron` crate 的 1-7 編號混淆
fn normalize(expression: &str) -> Result<String> {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    match fields.len() {
        5 => {
            let weekday = weekday_names(fields[4])
                .with_context(|| format!("Invalid day-of-week field '{}'", fields[4]))?;
            Ok(format!("0 {} {weekday}", fields[..4].join(" ")))
        }
        6 | 7 => Ok(fields.join(" ")),
        n => bail!("Cron expression must have 5, 6 or 7 fields, got {n}: '{expression}'"),
    }
}

fn weekday_names(field: &str) -> Result<String> {
    let mut names: Vec<String> = Vec::new();
    for part in field.split(',') {
        for name in expand_weekday_part(part)? {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    Ok(names.join(","))
}

/// 將數字寫法的範圍與間隔展開為逐日名稱（`5-7` → `FRI,SAT,SUN`）
///
/// `*`、`?` 與英文縮寫寫法原樣保留；`6-0` 這類跨週日的範圍會繞回週初
fn expand_weekday_part(part: &str) -> Result<Vec<String>> {
    let (range, step) = match part.split_once('/') {
        Some((range, step)) => {
            let step: usize = step
                .parse()
                .with_context(|| format!("invalid step '{step}'"))?;
            if step == 0 {
                bail!("step must be greater than 0");
            }
            (range, Some(step))
        }
        None => (part, None),
    };

    let is_number = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    let days: Vec<usize> = match range.split_once('-') {
        _ if range == "*" || range == "?" => {
            if step.is_none() {
                return Ok(vec![part.to_string()]);
            }
            (0..=6).collect()
        }
        Some((lo, hi)) if is_number(lo) && is_number(hi) => {
            let (lo, hi) = (day_number(lo)?, day_number(hi)?);
            if lo <= hi {
                (lo..=hi).collect()
            } else {
                (lo..=6).chain(0..=hi).collect()
            }
        }
        None if is_number(range) => {
            let day = day_number(range)?;
            match step {
                Some(_) => (day..=day.max(6)).collect(),
                None => vec![day],
            }
        }
        _ => return Ok(vec![part.to_string()]),
    };

    Ok(days
        .into_iter()
        .step_by(step.unwrap_or(1))
        .map(|day| WEEKDAY_NAMES[day].to_string())
        .collect())
}

fn day_number(token: &str) -> Result<usize> {
    let day: usize = token.parse()?;
    if day >= WEEKDAY_NAMES.len() {
        bail!("day {day} out of range 0-7");
    }
    Ok(day)
}
