use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ecosystems::Ecosystem;

/// 单个发布版本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseEntry {
    /// 版本号
    pub version: String,
    /// 发布时间。同一版本有多个上传时间时取最早的一个
    pub date: DateTime<Utc>,
    /// 是否为预发布版本（启发式判定）
    pub is_prerelease: bool,
}

/// 发布时间线
///
/// `releases` 按发布时间降序排列；`total_versions` 始终统计全部已知
/// 版本数，不受截断限制影响。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseTimeline {
    /// 包名称
    pub package_name: String,
    /// 所属生态
    pub ecosystem: Ecosystem,
    /// 发布列表，时间降序
    pub releases: Vec<ReleaseEntry>,
    /// 全部已知版本数
    pub total_versions: usize,
}

/// 弃用信号
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deprecation {
    /// 是否已弃用
    pub is_deprecated: bool,
    /// 弃用说明（如上游提供）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
