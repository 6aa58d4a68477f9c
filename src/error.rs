//! 定义了整个网关的错误类型 `GatewayError`。

use std::io;
use thiserror::Error;

/// 网关的通用错误枚举。
///
/// 每个变体都对应一个固定的 HTTP 状态码，由 [`GatewayError::status_code`] 给出，
/// 服务端在唯一的出口处把它转换为 `{success: false, message}` 信封。
#[derive(Error, Debug)]
pub enum GatewayError {
    /// 通用的 anyhow 错误
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    /// 调用方输入缺失或不合法，例如空的 keyword 或 id
    #[error("{0}")]
    Validation(String),

    /// 不支持的音乐源或功能
    #[error("{0}")]
    Unsupported(String),

    /// 请求方法不被该路径接受
    #[error("仅支持 {0} 请求")]
    MethodNotAllowed(String),

    /// 客户端请求过于频繁
    #[error("请求过于频繁，请稍后再试")]
    RateLimited,

    /// 上游接口返回非 2xx 或无法解析的数据
    #[error("{message}")]
    Upstream {
        /// 上游返回的 HTTP 状态码（解析失败时为空）。
        status: Option<u16>,
        /// 面向调用方的通用错误描述。
        message: String,
    },

    /// 方法配置服务返回了错误信封
    #[error("{0}")]
    Hub(String),

    /// 方法配置本身无法组装成请求（非法 URL、请求方法或请求头）
    #[error("方法配置无效: {0}")]
    InvalidMethodConfig(String),

    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// 缺少运行所必需的配置，例如 API Key
    #[error("{0}")]
    Config(String),

    /// 接口不存在
    #[error("{0}")]
    NotFound(String),

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

/// `GatewayError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    /// 构造一个携带上游状态码的 `Upstream` 错误。
    pub fn upstream_status(status: u16) -> Self {
        Self::Upstream {
            status: Some(status),
            message: format!("上游接口失败：{status}"),
        }
    }

    /// 构造一个表示上游数据无法解析的 `Upstream` 错误。
    pub fn upstream_unparsable() -> Self {
        Self::Upstream {
            status: None,
            message: "上游返回数据无法解析".to_string(),
        }
    }

    /// 返回该错误对应的 HTTP 状态码。
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Unsupported(_) => 400,
            Self::NotFound(_) => 404,
            Self::MethodNotAllowed(_) => 405,
            Self::RateLimited => 429,
            Self::Upstream { .. }
            | Self::Hub(_)
            | Self::InvalidMethodConfig(_)
            | Self::Reqwest(_)
            | Self::JsonParse(_) => 502,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) | Self::Anyhow(_) => 500,
        }
    }

    /// 返回可以直接展示给调用方的错误信息。
    ///
    /// 网络层与解析层的细节只写入日志，不暴露给调用方。
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Reqwest(_) => "上游接口请求失败".to_string(),
            Self::JsonParse(_) => "上游返回数据无法解析".to_string(),
            Self::Io(_) | Self::Internal(_) | Self::Anyhow(_) => "服务器错误".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(GatewayError::Validation("keyword 不能为空".into()).status_code(), 400);
        assert_eq!(GatewayError::Unsupported("x".into()).status_code(), 400);
        assert_eq!(GatewayError::MethodNotAllowed("GET".into()).status_code(), 405);
        assert_eq!(GatewayError::RateLimited.status_code(), 429);
        assert_eq!(GatewayError::upstream_status(503).status_code(), 502);
        assert_eq!(GatewayError::Config("缺少 key".into()).status_code(), 500);
        assert_eq!(GatewayError::NotFound("接口不存在".into()).status_code(), 404);
    }

    #[test]
    fn test_upstream_message_is_generic() {
        let err = GatewayError::upstream_status(418);
        assert_eq!(err.public_message(), "上游接口失败：418");

        let err = GatewayError::upstream_unparsable();
        assert_eq!(err.public_message(), "上游返回数据无法解析");

        let err = GatewayError::Internal("锁中毒".into());
        assert_eq!(err.public_message(), "服务器错误");
    }
}
