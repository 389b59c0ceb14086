use std::time::Duration;

use crate::ecosystems::Ecosystem;

/// 引擎配置
///
/// 基础URL、User-Agent、超时时间均由调用方显式注入，引擎自身不读取
/// 进程级环境变量，保证测试时无需修改环境。`from_env` 仅是给宿主进程
/// 准备配置用的便捷构造器。
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// npm 注册表基础URL
    pub npm_base_url: String,
    /// PyPI 注册表基础URL
    pub pypi_base_url: String,
    /// crates.io 注册表基础URL
    pub crates_base_url: String,
    /// 对上游标识自身的 User-Agent
    pub user_agent: String,
    /// 单次请求的超时时间
    pub timeout: Duration,
    /// 声明的缓存TTL（秒）。引擎本身不做缓存，该值只是暴露给外部
    /// 缓存协作方的配置项。
    pub cache_ttl_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            npm_base_url: "https://registry.npmjs.org".to_string(),
            pypi_base_url: "https://pypi.org/pypi".to_string(),
            crates_base_url: "https://crates.io/api/v1".to_string(),
            user_agent: format!("registry-intel/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(10),
            cache_ttl_secs: 3600,
        }
    }
}

impl EngineConfig {
    /// 从环境变量构造配置，未设置的项回落到默认值
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = std::env::var("REGISTRY_INTEL_NPM_BASE_URL") {
            config.npm_base_url = url;
        }
        if let Ok(url) = std::env::var("REGISTRY_INTEL_PYPI_BASE_URL") {
            config.pypi_base_url = url;
        }
        if let Ok(url) = std::env::var("REGISTRY_INTEL_CRATES_BASE_URL") {
            config.crates_base_url = url;
        }
        if let Ok(agent) = std::env::var("REGISTRY_INTEL_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Ok(secs) = std::env::var("REGISTRY_INTEL_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.timeout = Duration::from_secs(secs);
            }
        }
        if let Ok(secs) = std::env::var("REGISTRY_INTEL_CACHE_TTL_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.cache_ttl_secs = secs;
            }
        }
        config
    }

    /// 获取指定生态对应的基础URL
    pub fn base_url(&self, ecosystem: Ecosystem) -> &str {
        match ecosystem {
            Ecosystem::Npm => &self.npm_base_url,
            Ecosystem::PyPI => &self.pypi_base_url,
            Ecosystem::CratesIo => &self.crates_base_url,
        }
    }
}
