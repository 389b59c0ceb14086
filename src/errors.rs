use thiserror::Error;

pub type Result<T> = anyhow::Result<T>;

/// 注册表查询错误
///
/// 固定的错误分类法，三种查询（摘要/时间线/维护信号）共用同一套分类。
/// `NotFound` 仅在引擎内部流转：适配器把未知包名视为用户输入错误，
/// 在离开引擎之前统一映射为 `InvalidInput`。
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("输入无效: {0}")]
    InvalidInput(String),

    #[error("包未找到: {0}")]
    NotFound(String),

    #[error("上游注册表错误: {0}")]
    Upstream(String),

    #[error("请求被限流: {0}")]
    RateLimited(String),

    #[error("请求超时: {0}")]
    Timeout(String),

    #[error("响应解析失败: {0}")]
    Parse(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl RegistryError {
    /// 稳定的机器可读错误码，调用方据此分支而不必匹配错误消息文本
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistryError::InvalidInput(_) => "INVALID_INPUT",
            // 未知包名同样属于调用方可纠正的输入错误
            RegistryError::NotFound(_) => "INVALID_INPUT",
            RegistryError::Upstream(_) => "UPSTREAM_ERROR",
            RegistryError::RateLimited(_) => "RATE_LIMITED",
            RegistryError::Timeout(_) => "TIMEOUT",
            RegistryError::Parse(_) => "PARSE_ERROR",
            RegistryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 检查错误是否可通过重试恢复
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RegistryError::Upstream(_)
                | RegistryError::RateLimited(_)
                | RegistryError::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_stable() {
        assert_eq!(RegistryError::InvalidInput("x".into()).error_code(), "INVALID_INPUT");
        assert_eq!(RegistryError::NotFound("x".into()).error_code(), "INVALID_INPUT");
        assert_eq!(RegistryError::Upstream("x".into()).error_code(), "UPSTREAM_ERROR");
        assert_eq!(RegistryError::RateLimited("x".into()).error_code(), "RATE_LIMITED");
        assert_eq!(RegistryError::Timeout("x".into()).error_code(), "TIMEOUT");
        assert_eq!(RegistryError::Parse("x".into()).error_code(), "PARSE_ERROR");
        assert_eq!(RegistryError::Internal("x".into()).error_code(), "INTERNAL_ERROR");
    }
}
