use serde::{Deserialize, Serialize};

/// 包摘要
///
/// 三个生态的原始schema归一化后的规范表示，按请求构造、响应后即丢弃。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSummary {
    /// 包名称
    pub name: String,
    /// 最新版本，无法确定时为 "unknown"
    pub version: String,
    /// 包的描述
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 包的主页
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// 代码仓库（已归一化的URL）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// 许可证
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// 关键字列表，保持上游顺序
    pub keywords: Vec<String>,
    /// 下载量，各生态可用性不同
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<DownloadStats>,
}

/// 下载量统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadStats {
    /// 周下载量
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<u64>,
    /// 月下载量
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<u64>,
    /// 总下载量
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl DownloadStats {
    /// 是否没有任何可用的计数
    pub fn is_empty(&self) -> bool {
        self.weekly.is_none() && self.monthly.is_none() && self.total.is_none()
    }
}
