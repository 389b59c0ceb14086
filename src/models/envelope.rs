use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RegistryError;

/// 统一响应信封
///
/// 每个查询要么完整成功、要么完整失败，不存在部分成功的形态。
/// 信封按请求新建，构造后不再修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResponseEnvelope<T> {
    /// 成功响应
    Ok {
        /// 查询结果
        data: T,
        /// 响应元数据
        meta: ResponseMeta,
    },
    /// 失败响应
    Error {
        /// 错误正文
        error: ErrorBody,
        /// 失败时只携带最小元数据
        meta: ErrorMeta,
    },
}

/// 成功响应的元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// 数据来源URL
    pub source_url: String,
    /// 获取时间
    pub retrieved_at: DateTime<Utc>,
    /// 分页游标，无更多数据时缺省
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// 非致命告警
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
}

/// 失败响应的元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMeta {
    /// 获取时间
    pub retrieved_at: DateTime<Utc>,
}

/// 标准错误正文
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 稳定的机器可读错误码
    pub code: String,
    /// 人类可读的错误消息
    pub message: String,
    /// 结构化细节，至少回显出错的包名与生态
    pub details: Value,
}

impl<T> ResponseEnvelope<T> {
    /// 构造成功信封
    pub fn success(data: T, meta: ResponseMeta) -> Self {
        ResponseEnvelope::Ok { data, meta }
    }

    /// 构造失败信封。这里是错误序列化为标准形态的唯一入口。
    pub fn failure(error: &RegistryError, details: Value) -> Self {
        ResponseEnvelope::Error {
            error: ErrorBody {
                code: error.error_code().to_string(),
                message: error.to_string(),
                details,
            },
            meta: ErrorMeta {
                retrieved_at: Utc::now(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ResponseEnvelope::Ok { .. })
    }

    /// 成功时的数据引用
    pub fn data(&self) -> Option<&T> {
        match self {
            ResponseEnvelope::Ok { data, .. } => Some(data),
            ResponseEnvelope::Error { .. } => None,
        }
    }

    /// 失败时的错误正文引用
    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            ResponseEnvelope::Ok { .. } => None,
            ResponseEnvelope::Error { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_envelope_shape() {
        let err = RegistryError::NotFound("包 left-pad 在 npm 上不存在".to_string());
        let envelope: ResponseEnvelope<()> =
            ResponseEnvelope::failure(&err, json!({ "package": "left-pad", "ecosystem": "npm" }));

        assert!(!envelope.is_ok());
        let body = envelope.error().unwrap();
        assert_eq!(body.code, "INVALID_INPUT");
        assert_eq!(body.details["package"], "left-pad");
        assert_eq!(body.details["ecosystem"], "npm");

        let serialized = serde_json::to_value(&envelope).unwrap();
        assert_eq!(serialized["status"], "error");
        assert_eq!(serialized["error"]["code"], "INVALID_INPUT");
        assert!(serialized["meta"]["retrieved_at"].is_string());
    }

    #[test]
    fn test_success_envelope_omits_empty_cursor_and_warnings() {
        let envelope = ResponseEnvelope::success(
            json!({ "name": "serde" }),
            ResponseMeta {
                source_url: "https://crates.io/api/v1/crates/serde".to_string(),
                retrieved_at: Utc::now(),
                cursor: None,
                warnings: Vec::new(),
            },
        );

        let serialized = serde_json::to_value(&envelope).unwrap();
        assert_eq!(serialized["status"], "ok");
        assert!(serialized["meta"].get("cursor").is_none());
        assert!(serialized["meta"].get("warnings").is_none());
    }
}
