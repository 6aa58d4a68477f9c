//! 统一的 `{success, message, data}` 响应信封，以及错误到响应的转换。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};

use crate::error::GatewayError;

/// 所有接口共用的响应信封。
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T> {
    /// 请求是否成功。
    pub success: bool,
    /// 提示信息，失败时必定存在。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 业务数据。存在但为 `null` 时会原样输出 `null`。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiEnvelope<T> {
    /// 成功并携带数据。
    pub fn data(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data: Some(data),
        })
    }
}

impl ApiEnvelope<()> {
    /// 成功且只携带提示信息。
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data: None,
        })
    }

    /// 失败信封。
    pub fn failure(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            message: Some(message.into()),
            data: None,
        })
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("请求失败 ({}): {}", status.as_u16(), self);
        } else {
            debug!("请求被拒绝 ({}): {}", status.as_u16(), self);
        }
        (status, ApiEnvelope::failure(self.public_message())).into_response()
    }
}
