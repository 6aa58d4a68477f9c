//! 执行上游请求，并以宽容的方式解析响应。

use reqwest::{
    Client, Method,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{GatewayError, Result},
    upstream::request::RequestDescriptor,
};

/// 负责真正发出上游 HTTP 请求的执行器。
#[derive(Debug, Clone)]
pub struct UpstreamExecutor {
    http_client: Client,
}

impl UpstreamExecutor {
    /// 使用给定的 HTTP 客户端创建执行器。超时等策略由客户端本身携带。
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    /// 执行请求并返回解析后的 JSON。
    ///
    /// GET 请求永远不携带请求体。非 2xx 状态，或者响应体在宽容解析后仍然不是
    /// JSON，都会得到 `GatewayError::Upstream`。
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let method = Method::from_bytes(descriptor.method.as_bytes()).map_err(|e| {
            GatewayError::InvalidMethodConfig(format!("非法的请求方法 '{}': {e}", descriptor.method))
        })?;
        let headers = to_header_map(descriptor)?;

        debug!("{} {}", method, descriptor.url);

        let mut request = self
            .http_client
            .request(method.clone(), &descriptor.url)
            .headers(headers);
        if method != Method::GET
            && let Some(body) = &descriptor.body
        {
            request = request.body(body.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("上游 {} 返回状态码 {}", descriptor.url, status);
            return Err(GatewayError::upstream_status(status.as_u16()));
        }

        parse_maybe_json(&text).ok_or_else(|| {
            warn!("上游 {} 返回了无法解析的数据，长度 {}", descriptor.url, text.len());
            GatewayError::upstream_unparsable()
        })
    }
}

fn to_header_map(descriptor: &RequestDescriptor) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(descriptor.headers.len());
    for (name, value) in &descriptor.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            GatewayError::InvalidMethodConfig(format!("非法的请求头名 '{name}': {e}"))
        })?;
        let header_value = HeaderValue::from_bytes(value.as_bytes()).map_err(|e| {
            GatewayError::InvalidMethodConfig(format!("请求头 '{name}' 的值非法: {e}"))
        })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// 宽容地解析 JSON 文本。
///
/// 先按严格 JSON 解析；失败时截取第一个 `{` 到最后一个 `}` 之间的内容再试一次，
/// 以应对部分接口在 JSON 前后包裹回调函数名之类的文本。空文本或 `null` 视为解析失败。
pub fn parse_maybe_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<Value>(trimmed).ok().or_else(|| {
        let start = trimmed.find('{')?;
        let end = trimmed.rfind('}')?;
        if end <= start {
            return None;
        }
        serde_json::from_str::<Value>(&trimmed[start..=end]).ok()
    })?;

    (!parsed.is_null()).then_some(parsed)
}
