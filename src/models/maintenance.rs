use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ecosystems::Ecosystem;

/// 维护状态评级
///
/// 对外只暴露这三档，内部的加权分值不出引擎。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// 维护不佳
    Poor,
    /// 维护一般
    Fair,
    /// 维护良好
    Good,
}

impl Rating {
    /// 加权求和时的映射值: good=2, fair=1, poor=0
    pub fn weight(&self) -> f64 {
        match self {
            Rating::Good => 2.0,
            Rating::Fair => 1.0,
            Rating::Poor => 0.0,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Good => write!(f, "good"),
            Rating::Fair => write!(f, "fair"),
            Rating::Poor => write!(f, "poor"),
        }
    }
}

/// 三个子评级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFactors {
    /// 最近一次发布距今多久
    pub recency: Rating,
    /// 年均发布频率
    pub frequency: Rating,
    /// 已知版本总数反映的成熟度
    pub maturity: Rating,
}

/// 维护健康信号
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceSignals {
    /// 包名称
    pub package_name: String,
    /// 所属生态
    pub ecosystem: Ecosystem,
    /// 距最近一次发布的天数，未知时为 -1
    pub days_since_last_release: i64,
    /// 最近一次发布时间
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_release_date: Option<DateTime<Utc>>,
    /// 年均发布次数，保留两位小数
    pub releases_per_year: f64,
    /// 全部已知版本数
    pub total_versions: usize,
    /// 是否已弃用
    pub is_deprecated: bool,
    /// 弃用说明
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    /// 综合评级
    pub maintenance_score: Rating,
    /// 子评级明细
    pub score_factors: ScoreFactors,
}
