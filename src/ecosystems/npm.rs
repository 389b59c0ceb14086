//! npm 适配器 (registry.npmjs.org)
//!
//! 最新版本取自 `dist-tags.latest`；版本级元数据覆盖包级元数据；
//! 全部版本时间戳都在 `time` 映射里，其中 `created`/`modified`
//! 是保留键而不是版本号。

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::errors::RegistryError;
use crate::models::{Deprecation, PackageSummary, ReleaseEntry};
use crate::normalize::normalize_repository_url;
use crate::prerelease::is_prerelease;

/// time 映射中的保留键
const RESERVED_TIME_KEYS: [&str; 2] = ["created", "modified"];

pub fn parse_summary(doc: &Value) -> Result<PackageSummary, RegistryError> {
    let name = doc["name"]
        .as_str()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RegistryError::Parse("npm 响应缺少 name 字段".to_string()))?;

    let latest = doc["dist-tags"]["latest"].as_str().filter(|s| !s.is_empty());
    let version_meta = latest.map(|v| &doc["versions"][v]);

    Ok(PackageSummary {
        name: name.to_string(),
        version: latest.unwrap_or("unknown").to_string(),
        description: field(version_meta, doc, "description")
            .as_str()
            .map(str::to_string),
        homepage: field(version_meta, doc, "homepage").as_str().map(str::to_string),
        repository: repository_field(field(version_meta, doc, "repository"))
            .and_then(|raw| normalize_repository_url(&raw)),
        license: license_field(field(version_meta, doc, "license")),
        keywords: field(version_meta, doc, "keywords")
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|k| k.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        // npm 文档本身不携带下载量，计数在独立的下载API上
        downloads: None,
    })
}

/// 版本级字段优先，缺失时回落到包级字段
fn field<'a>(version_meta: Option<&'a Value>, doc: &'a Value, key: &str) -> &'a Value {
    if let Some(meta) = version_meta {
        if !meta[key].is_null() {
            return &meta[key];
        }
    }
    &doc[key]
}

pub fn parse_releases(doc: &Value) -> Result<Vec<ReleaseEntry>, RegistryError> {
    let time = doc["time"]
        .as_object()
        .ok_or_else(|| RegistryError::Parse("npm 响应缺少 time 映射".to_string()))?;

    let mut entries = Vec::with_capacity(time.len());
    for (version, stamp) in time {
        if RESERVED_TIME_KEYS.contains(&version.as_str()) {
            continue;
        }
        let Some(raw) = stamp.as_str() else {
            continue;
        };
        match DateTime::parse_from_rfc3339(raw) {
            Ok(date) => entries.push(ReleaseEntry {
                version: version.clone(),
                date: date.with_timezone(&Utc),
                is_prerelease: is_prerelease(version),
            }),
            Err(e) => warn!(%version, %raw, error = %e, "npm 版本时间戳无法解析，跳过该条目"),
        }
    }
    Ok(entries)
}

/// 最新发布版本上的 deprecated 标记。npm 用空串表示撤销弃用。
pub fn parse_deprecation(doc: &Value) -> Deprecation {
    let Some(latest) = doc["dist-tags"]["latest"].as_str() else {
        return Deprecation::default();
    };
    match &doc["versions"][latest]["deprecated"] {
        Value::String(message) if !message.trim().is_empty() => Deprecation {
            is_deprecated: true,
            message: Some(message.trim().to_string()),
        },
        Value::Bool(true) => Deprecation {
            is_deprecated: true,
            message: None,
        },
        _ => Deprecation::default(),
    }
}

/// repository 字段可能是裸字符串，也可能是 {type, url} 结构
fn repository_field(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::to_string)
        .or_else(|| value["url"].as_str().map(str::to_string))
}

/// license 字段可能是裸字符串，也可能是 {type} 结构
fn license_field(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::to_string)
        .or_else(|| value["type"].as_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "name": "left-pad",
            "description": "包级描述",
            "license": { "type": "MIT" },
            "homepage": "https://example.com",
            "keywords": ["pad", "string"],
            "dist-tags": { "latest": "1.3.0" },
            "versions": {
                "1.3.0": {
                    "description": "版本级描述",
                    "repository": { "type": "git", "url": "git+https://github.com/stevemao/left-pad.git" }
                },
                "1.0.0-beta1": {}
            },
            "time": {
                "created": "2014-03-09T20:01:33.580Z",
                "modified": "2018-04-16T05:53:29.675Z",
                "1.0.0-beta1": "2014-03-09T20:01:33.580Z",
                "1.3.0": "2018-04-16T05:53:29.675Z"
            }
        })
    }

    #[test]
    fn test_summary_prefers_version_level_metadata() {
        let summary = parse_summary(&doc()).unwrap();
        assert_eq!(summary.name, "left-pad");
        assert_eq!(summary.version, "1.3.0");
        assert_eq!(summary.description.as_deref(), Some("版本级描述"));
        assert_eq!(summary.license.as_deref(), Some("MIT"));
        assert_eq!(
            summary.repository.as_deref(),
            Some("https://github.com/stevemao/left-pad")
        );
        assert_eq!(summary.keywords, vec!["pad", "string"]);
        assert!(summary.downloads.is_none());
    }

    #[test]
    fn test_summary_string_repository_and_license() {
        let doc = json!({
            "name": "demo",
            "dist-tags": { "latest": "2.0.0" },
            "versions": { "2.0.0": {} },
            "repository": "git://github.com/demo/demo.git",
            "license": "ISC"
        });
        let summary = parse_summary(&doc).unwrap();
        assert_eq!(summary.repository.as_deref(), Some("https://github.com/demo/demo"));
        assert_eq!(summary.license.as_deref(), Some("ISC"));
    }

    #[test]
    fn test_summary_without_latest_tag_falls_back_to_unknown() {
        let doc = json!({ "name": "ghost", "versions": {} });
        let summary = parse_summary(&doc).unwrap();
        assert_eq!(summary.version, "unknown");
    }

    #[test]
    fn test_summary_missing_name_is_parse_error() {
        let err = parse_summary(&json!({ "dist-tags": {} })).unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_releases_exclude_reserved_keys() {
        let releases = parse_releases(&doc()).unwrap();
        assert_eq!(releases.len(), 2);
        assert!(releases.iter().all(|r| r.version != "created" && r.version != "modified"));
        let beta = releases.iter().find(|r| r.version == "1.0.0-beta1").unwrap();
        assert!(beta.is_prerelease);
    }

    #[test]
    fn test_releases_missing_time_map_is_parse_error() {
        let err = parse_releases(&json!({ "name": "x" })).unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_deprecation_marker_on_latest() {
        let mut doc = doc();
        doc["versions"]["1.3.0"]["deprecated"] = json!("use padStart instead");
        let deprecation = parse_deprecation(&doc);
        assert!(deprecation.is_deprecated);
        assert_eq!(deprecation.message.as_deref(), Some("use padStart instead"));

        // 空串代表撤销弃用
        doc["versions"]["1.3.0"]["deprecated"] = json!("");
        assert!(!parse_deprecation(&doc).is_deprecated);

        assert!(!parse_deprecation(&self::doc()).is_deprecated);
    }
}
