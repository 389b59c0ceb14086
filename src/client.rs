use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::errors::RegistryError;

/// 出站JSON获取原语
///
/// 引擎消费的唯一网络能力。宿主可以注入自己的实现（例如带缓存的
/// 客户端），测试则可以指向本地mock服务。
#[async_trait]
pub trait JsonSource: Send + Sync {
    /// 对URL执行一次GET并解析JSON响应体
    async fn get_json(&self, url: &str) -> Result<Value, RegistryError>;
}

/// 注册表HTTP客户端
///
/// 单次尝试、有界超时的GET。不做重试：任何一次上游失败都立即分类
/// 上抛。超时到期时 reqwest 会取消在途请求，不会返回部分结果。
pub struct RegistryClient {
    client: reqwest::Client,
}

impl RegistryClient {
    pub fn new(config: &EngineConfig) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| RegistryError::Internal(format!("构建HTTP客户端失败: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonSource for RegistryClient {
    async fn get_json(&self, url: &str) -> Result<Value, RegistryError> {
        debug!(%url, "请求上游注册表");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::Timeout(format!("请求 {} 超出时限", url))
            } else {
                RegistryError::Upstream(format!("请求 {} 失败: {}", url, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "上游返回非2xx状态");
            return Err(match status.as_u16() {
                404 => RegistryError::NotFound(format!("上游对 {} 返回404", url)),
                429 => RegistryError::RateLimited(format!("上游对 {} 返回429", url)),
                code => RegistryError::Upstream(format!("上游对 {} 返回状态 {}", url, code)),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::Timeout(format!("读取 {} 响应体超出时限", url))
            } else {
                RegistryError::Upstream(format!("解析 {} 响应体失败: {}", url, e))
            }
        })
    }
}
