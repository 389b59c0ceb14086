//! PyPI 适配器 (pypi.org/pypi/{name}/json)
//!
//! 最新版本与元数据在 `info` 记录下；发布时间在 `releases` 的
//! 按版本上传文件列表里；关键字是一个逗号/空白分隔的字符串；
//! 仓库地址靠探测 `project_urls` 的一组常见标签恢复。

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::errors::RegistryError;
use crate::models::{Deprecation, DownloadStats, PackageSummary, ReleaseEntry};
use crate::normalize::normalize_repository_url;
use crate::prerelease::is_prerelease;

/// project_urls 里按优先级探测的标签，先命中者生效
const REPOSITORY_LABELS: [&str; 4] = ["Repository", "Source", "GitHub", "Source Code"];

/// 表示"不再维护"的生命周期分类器。只认这两个值，覆盖面有限是
/// 既定行为，不做静默扩大。
const INACTIVE_CLASSIFIERS: [&str; 2] = [
    "Development Status :: 7 - Inactive",
    "Development Status :: 1 - Planning",
];

pub fn parse_summary(doc: &Value) -> Result<PackageSummary, RegistryError> {
    let info = doc["info"]
        .as_object()
        .ok_or_else(|| RegistryError::Parse("PyPI 响应缺少 info 记录".to_string()))?;

    let name = info
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RegistryError::Parse("PyPI 响应缺少包名".to_string()))?;

    let version = info
        .get("version")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown");

    let text_field = |key: &str| -> Option<String> {
        info.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Ok(PackageSummary {
        name: name.to_string(),
        version: version.to_string(),
        description: text_field("summary"),
        homepage: text_field("home_page"),
        repository: probe_repository(&doc["info"]["project_urls"])
            .and_then(|raw| normalize_repository_url(&raw)),
        license: text_field("license"),
        keywords: tokenize_keywords(info.get("keywords").and_then(Value::as_str).unwrap_or("")),
        downloads: download_stats(&doc["info"]["downloads"]),
    })
}

pub fn parse_releases(doc: &Value) -> Result<Vec<ReleaseEntry>, RegistryError> {
    let releases = doc["releases"]
        .as_object()
        .ok_or_else(|| RegistryError::Parse("PyPI 响应缺少 releases 映射".to_string()))?;

    let mut entries = Vec::with_capacity(releases.len());
    for (version, files) in releases {
        let Some(files) = files.as_array() else {
            continue;
        };
        // 同一版本多个上传产物时取字典序最小的ISO时间戳
        let Some(raw) = files
            .iter()
            .filter_map(|f| {
                f["upload_time_iso_8601"]
                    .as_str()
                    .or_else(|| f["upload_time"].as_str())
            })
            .min()
        else {
            continue;
        };
        match parse_upload_time(raw) {
            Some(date) => entries.push(ReleaseEntry {
                version: version.clone(),
                date,
                is_prerelease: is_prerelease(version),
            }),
            None => warn!(%version, %raw, "PyPI 上传时间无法解析，跳过该条目"),
        }
    }
    Ok(entries)
}

/// 生命周期分类器命中 Inactive/Planning 即视为弃用
pub fn parse_deprecation(doc: &Value) -> Deprecation {
    let Some(classifiers) = doc["info"]["classifiers"].as_array() else {
        return Deprecation::default();
    };
    for classifier in classifiers.iter().filter_map(Value::as_str) {
        if INACTIVE_CLASSIFIERS.contains(&classifier) {
            return Deprecation {
                is_deprecated: true,
                message: Some(classifier.to_string()),
            };
        }
    }
    Deprecation::default()
}

/// 逗号和/或空白分隔的关键字串切分为有序列表，丢弃空token
fn tokenize_keywords(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn probe_repository(project_urls: &Value) -> Option<String> {
    let urls = project_urls.as_object()?;
    for label in REPOSITORY_LABELS {
        if let Some(url) = urls.get(label).and_then(Value::as_str) {
            if !url.trim().is_empty() {
                return Some(url.trim().to_string());
            }
        }
    }
    None
}

/// PyPI 的历史下载计数字段，负值表示不可用
fn download_stats(downloads: &Value) -> Option<DownloadStats> {
    let non_negative = |key: &str| downloads[key].as_i64().filter(|n| *n >= 0).map(|n| n as u64);
    let stats = DownloadStats {
        weekly: non_negative("last_week"),
        monthly: non_negative("last_month"),
        total: None,
    };
    if stats.is_empty() {
        None
    } else {
        Some(stats)
    }
}

/// 上传时间既有带时区的ISO-8601，也有裸的 "2023-10-20T14:30:15"
fn parse_upload_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(&format!("{}Z", raw)))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
