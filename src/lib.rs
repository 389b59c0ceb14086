//! # Registry Intel
//!
//! 多生态包注册表情报引擎：把 npm / PyPI / crates.io 三套互不兼容的
//! 注册表schema归一化为同一套规范表示，并回答三类查询。
//!
//! ## 特性
//!
//! - 📦 **包摘要** - 名称、最新版本、仓库地址、许可证、关键字、下载量
//! - 🕒 **发布时间线** - 按时间降序排列、可分页的版本发布历史
//! - 🩺 **维护评分** - 基于近期性/频率/成熟度三项子评级的健康评级
//! - ✉️ **统一信封** - 成功与失败都包装为带元数据的标准响应形态
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use registry_intel::{Ecosystem, EngineConfig, RegistryIntelEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = RegistryIntelEngine::new(EngineConfig::from_env())?;
//!
//!     let envelope = engine.package_summary(Ecosystem::CratesIo, "serde").await;
//!     if let Some(summary) = envelope.data() {
//!         println!("{} {}", summary.name, summary.version);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod ecosystems;
pub mod engine;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod prerelease;
pub mod scoring;
pub mod timeline;

pub use client::{JsonSource, RegistryClient};
pub use config::EngineConfig;
pub use ecosystems::Ecosystem;
pub use engine::{PackageQuery, RegistryIntelEngine};
pub use errors::{RegistryError, Result};
pub use models::{
    Deprecation, DownloadStats, ErrorBody, MaintenanceSignals, PackageSummary, Rating,
    ReleaseEntry, ReleaseTimeline, ResponseEnvelope, ResponseMeta, ScoreFactors,
};
