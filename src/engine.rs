use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::client::{JsonSource, RegistryClient};
use crate::config::EngineConfig;
use crate::ecosystems::{validate_package_name, Ecosystem};
use crate::errors::RegistryError;
use crate::models::{
    MaintenanceSignals, PackageSummary, ReleaseTimeline, ResponseEnvelope, ResponseMeta,
};
use crate::{scoring, timeline};

/// 查询描述：生态 + 包名，时间线查询可带limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageQuery {
    /// 目标生态
    pub ecosystem: Ecosystem,
    /// 包名，去除首尾空白后必须非空
    pub package: String,
    /// 时间线条数上限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// 注册表情报引擎
///
/// 三种查询（摘要/时间线/维护信号）各自独立无状态，之间不共享
/// 可变状态。每次查询恰好发起一次出站请求，超时即取消并快速失败，
/// 不做重试也不返回部分结果。
pub struct RegistryIntelEngine<C = RegistryClient> {
    config: EngineConfig,
    source: C,
}

impl RegistryIntelEngine<RegistryClient> {
    /// 用默认HTTP客户端构造引擎
    pub fn new(config: EngineConfig) -> Result<Self, RegistryError> {
        let source = RegistryClient::new(&config)?;
        Ok(Self { config, source })
    }
}

impl<C: JsonSource> RegistryIntelEngine<C> {
    /// 注入自定义的JSON获取原语（测试或带缓存的宿主客户端）
    pub fn with_source(config: EngineConfig, source: C) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 查询包摘要
    pub async fn package_summary(
        &self,
        ecosystem: Ecosystem,
        package: &str,
    ) -> ResponseEnvelope<PackageSummary> {
        match self.summary_inner(ecosystem, package).await {
            Ok((data, meta)) => ResponseEnvelope::success(data, meta),
            Err(e) => ResponseEnvelope::failure(&e, error_details(ecosystem, package)),
        }
    }

    /// 查询发布时间线
    pub async fn release_timeline(
        &self,
        ecosystem: Ecosystem,
        package: &str,
        limit: Option<i64>,
    ) -> ResponseEnvelope<ReleaseTimeline> {
        match self.timeline_inner(ecosystem, package, limit).await {
            Ok((data, meta)) => ResponseEnvelope::success(data, meta),
            Err(e) => ResponseEnvelope::failure(&e, error_details(ecosystem, package)),
        }
    }

    /// 查询维护健康信号
    pub async fn maintenance_signals(
        &self,
        ecosystem: Ecosystem,
        package: &str,
    ) -> ResponseEnvelope<MaintenanceSignals> {
        match self.maintenance_inner(ecosystem, package).await {
            Ok((data, meta)) => ResponseEnvelope::success(data, meta),
            Err(e) => ResponseEnvelope::failure(&e, error_details(ecosystem, package)),
        }
    }

    /// 按查询描述分发
    pub async fn query_summary(&self, query: &PackageQuery) -> ResponseEnvelope<PackageSummary> {
        self.package_summary(query.ecosystem, &query.package).await
    }

    pub async fn query_timeline(&self, query: &PackageQuery) -> ResponseEnvelope<ReleaseTimeline> {
        self.release_timeline(query.ecosystem, &query.package, query.limit)
            .await
    }

    pub async fn query_maintenance(
        &self,
        query: &PackageQuery,
    ) -> ResponseEnvelope<MaintenanceSignals> {
        self.maintenance_signals(query.ecosystem, &query.package).await
    }

    async fn summary_inner(
        &self,
        ecosystem: Ecosystem,
        package: &str,
    ) -> Result<(PackageSummary, ResponseMeta), RegistryError> {
        let (doc, source_url) = self.fetch_document(ecosystem, package).await?;
        let summary = ecosystem.parse_summary(&doc)?;

        let mut warnings = Vec::new();
        if summary.version == "unknown" {
            warnings.push("无法从上游确定最新版本，version 回落为 unknown".to_string());
        }
        Ok((
            summary,
            ResponseMeta {
                source_url,
                retrieved_at: Utc::now(),
                cursor: None,
                warnings,
            },
        ))
    }

    async fn timeline_inner(
        &self,
        ecosystem: Ecosystem,
        package: &str,
        limit: Option<i64>,
    ) -> Result<(ReleaseTimeline, ResponseMeta), RegistryError> {
        let name = validate_package_name(package)?.to_string();
        let (doc, source_url) = self.fetch_document(ecosystem, &name).await?;
        let entries = ecosystem.parse_releases(&doc)?;
        let assembled = timeline::assemble(entries, limit, true);

        let mut warnings = Vec::new();
        if assembled.total_versions == 0 {
            warnings.push("未找到任何带时间戳的发布记录".to_string());
        }
        Ok((
            ReleaseTimeline {
                package_name: name,
                ecosystem,
                releases: assembled.releases,
                total_versions: assembled.total_versions,
            },
            ResponseMeta {
                source_url,
                retrieved_at: Utc::now(),
                cursor: assembled.cursor,
                warnings,
            },
        ))
    }

    async fn maintenance_inner(
        &self,
        ecosystem: Ecosystem,
        package: &str,
    ) -> Result<(MaintenanceSignals, ResponseMeta), RegistryError> {
        let name = validate_package_name(package)?.to_string();
        let (doc, source_url) = self.fetch_document(ecosystem, &name).await?;
        // 评分基于完整（未截断）的发布集合
        let releases = ecosystem.parse_releases(&doc)?;
        let deprecation = ecosystem.parse_deprecation(&doc);

        let dates: Vec<_> = releases.iter().map(|r| r.date).collect();
        let computed = scoring::evaluate(&dates, deprecation.is_deprecated, Utc::now());
        info!(
            package = %name,
            %ecosystem,
            score = %computed.score,
            "维护信号查询完成"
        );

        Ok((
            MaintenanceSignals {
                package_name: name,
                ecosystem,
                days_since_last_release: computed.days_since_last_release,
                last_release_date: computed.last_release_date,
                releases_per_year: computed.releases_per_year,
                total_versions: computed.total_versions,
                is_deprecated: deprecation.is_deprecated,
                deprecation_message: deprecation.message,
                maintenance_score: computed.score,
                score_factors: computed.factors,
            },
            ResponseMeta {
                source_url,
                retrieved_at: Utc::now(),
                cursor: None,
                warnings: Vec::new(),
            },
        ))
    }

    /// 校验包名、拼URL、发起唯一一次出站请求
    async fn fetch_document(
        &self,
        ecosystem: Ecosystem,
        package: &str,
    ) -> Result<(Value, String), RegistryError> {
        let name = validate_package_name(package)?;
        let url = ecosystem.package_url(self.config.base_url(ecosystem), name);
        let doc = self.source.get_json(&url).await.map_err(|e| match e {
            // 未知包名对调用方来说是可纠正的输入错误
            RegistryError::NotFound(_) => RegistryError::NotFound(format!(
                "包 {} 在 {} 上不存在",
                name, ecosystem
            )),
            other => other,
        })?;
        Ok((doc, url))
    }
}

/// 失败时的结构化细节：始终回显出错的包与生态
fn error_details(ecosystem: Ecosystem, package: &str) -> Value {
    json!({
        "package": package.trim(),
        "ecosystem": ecosystem.to_string(),
    })
}
