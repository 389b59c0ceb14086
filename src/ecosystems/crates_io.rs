//! crates.io 适配器 (crates.io/api/v1/crates/{name})
//!
//! 权威的 crate 记录携带聚合下载量与最大版本号，`versions` 数组
//! 内嵌在同一份文档里，每个条目带显式的 yanked 标记。被撤回的
//! 版本默认排除在时间线与弃用判定之外。

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::errors::RegistryError;
use crate::models::{Deprecation, DownloadStats, PackageSummary, ReleaseEntry};
use crate::normalize::normalize_repository_url;
use crate::prerelease::is_prerelease;

pub fn parse_summary(doc: &Value) -> Result<PackageSummary, RegistryError> {
    let krate = doc["crate"]
        .as_object()
        .ok_or_else(|| RegistryError::Parse("crates.io 响应缺少 crate 记录".to_string()))?;

    let name = krate
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RegistryError::Parse("crates.io 响应缺少包名".to_string()))?;

    // 摘要版本优先取最新稳定版标记，没有稳定版时退回原始最大版本
    let version = krate
        .get("max_stable_version")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| krate.get("max_version").and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown");

    let text_field = |key: &str| -> Option<String> {
        krate
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Ok(PackageSummary {
        name: name.to_string(),
        version: version.to_string(),
        description: text_field("description"),
        homepage: text_field("homepage"),
        repository: text_field("repository").and_then(|raw| normalize_repository_url(&raw)),
        license: license_of(doc, version),
        keywords: krate
            .get("keywords")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|k| k.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        downloads: krate
            .get("downloads")
            .and_then(Value::as_u64)
            .map(|total| DownloadStats {
                weekly: None,
                monthly: None,
                total: Some(total),
            }),
    })
}

pub fn parse_releases(doc: &Value) -> Result<Vec<ReleaseEntry>, RegistryError> {
    let versions = doc["versions"]
        .as_array()
        .ok_or_else(|| RegistryError::Parse("crates.io 响应缺少 versions 数组".to_string()))?;

    let mut entries = Vec::with_capacity(versions.len());
    for entry in versions {
        if entry["yanked"].as_bool().unwrap_or(false) {
            continue;
        }
        let Some(version) = entry["num"].as_str() else {
            continue;
        };
        let Some(raw) = entry["created_at"].as_str() else {
            continue;
        };
        match DateTime::parse_from_rfc3339(raw) {
            Ok(date) => entries.push(ReleaseEntry {
                version: version.to_string(),
                date: date.with_timezone(&Utc),
                is_prerelease: is_prerelease(version),
            }),
            Err(e) => warn!(%version, %raw, error = %e, "crates.io 版本时间戳无法解析，跳过该条目"),
        }
    }
    Ok(entries)
}

/// 所有已知版本都被撤回时视为弃用：没有任何可用版本
pub fn parse_deprecation(doc: &Value) -> Deprecation {
    let Some(versions) = doc["versions"].as_array() else {
        return Deprecation::default();
    };
    if versions.is_empty() {
        return Deprecation::default();
    }
    let all_yanked = versions
        .iter()
        .all(|v| v["yanked"].as_bool().unwrap_or(false));
    if all_yanked {
        Deprecation {
            is_deprecated: true,
            message: Some("所有已发布版本均已被撤回".to_string()),
        }
    } else {
        Deprecation::default()
    }
}

/// 许可证在版本条目上而不是 crate 记录上，取摘要版本对应条目
fn license_of(doc: &Value, version: &str) -> Option<String> {
    let versions = doc["versions"].as_array()?;
    versions
        .iter()
        .find(|v| v["num"].as_str() == Some(version))
        .or_else(|| versions.first())
        .and_then(|v| v["license"].as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "crate": {
                "name": "serde",
                "max_version": "1.0.219-rc1",
                "max_stable_version": "1.0.218",
                "description": "A serialization framework",
                "homepage": "https://serde.rs",
                "repository": "https://github.com/serde-rs/serde",
                "keywords": ["serde", "serialization"],
                "downloads": 500000000u64
            },
            "versions": [
                { "num": "1.0.219-rc1", "created_at": "2025-02-20T10:00:00Z", "yanked": false, "license": "MIT OR Apache-2.0" },
                { "num": "1.0.218", "created_at": "2025-01-10T09:30:00Z", "yanked": false, "license": "MIT OR Apache-2.0" },
                { "num": "1.0.217", "created_at": "2024-12-27T14:20:00Z", "yanked": true, "license": "MIT OR Apache-2.0" }
            ]
        })
    }

    #[test]
    fn test_summary_prefers_max_stable_version() {
        let summary = parse_summary(&doc()).unwrap();
        assert_eq!(summary.name, "serde");
        assert_eq!(summary.version, "1.0.218");
        assert_eq!(summary.license.as_deref(), Some("MIT OR Apache-2.0"));
        assert_eq!(summary.downloads.unwrap().total, Some(500000000));
    }

    #[test]
    fn test_summary_falls_back_to_max_version() {
        let mut doc = doc();
        doc["crate"]["max_stable_version"] = json!(null);
        let summary = parse_summary(&doc).unwrap();
        assert_eq!(summary.version, "1.0.219-rc1");
    }

    #[test]
    fn test_missing_crate_record_is_parse_error() {
        let err = parse_summary(&json!({ "versions": [] })).unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_releases_exclude_yanked() {
        let releases = parse_releases(&doc()).unwrap();
        assert_eq!(releases.len(), 2);
        assert!(releases.iter().all(|r| r.version != "1.0.217"));
        let rc = releases.iter().find(|r| r.version == "1.0.219-rc1").unwrap();
        assert!(rc.is_prerelease);
    }

    #[test]
    fn test_deprecated_when_everything_yanked() {
        let mut doc = doc();
        for entry in doc["versions"].as_array_mut().unwrap() {
            entry["yanked"] = json!(true);
        }
        assert!(parse_deprecation(&doc).is_deprecated);

        assert!(!parse_deprecation(&self::doc()).is_deprecated);
        assert!(!parse_deprecation(&json!({ "versions": [] })).is_deprecated);
    }
}
