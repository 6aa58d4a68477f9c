//! TuneHub 方法配置服务的客户端。
//!
//! 方法配置描述了如何向某个平台的某个功能发起请求，网关每次调用都会实时获取，
//! 不做缓存。同一个服务还提供歌曲链接解析与方法配置的查看接口。

use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{
    error::{GatewayError, Result},
    model::source::{Function, Source},
    upstream::{MethodConfig, parse_maybe_json},
};

/// TuneHub 的默认地址。
pub const DEFAULT_HUB_BASE_URL: &str = "https://tunehub.sayqz.com/api";

const API_KEY_HEADER: &str = "X-API-Key";
const MISSING_KEY_MESSAGE: &str =
    "缺少 music_parser_key，请设置环境变量 MUSIC_PARSER_KEY 或在 config.json 中配置 api_key";

/// TuneHub 统一的响应信封。
#[derive(Debug, Deserialize)]
struct HubEnvelope {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Value,
}

impl HubEnvelope {
    fn is_ok(&self) -> bool {
        let code_is_zero = self.code.as_ref().and_then(Value::as_i64) == Some(0);
        self.success != Some(false) && code_is_zero
    }
}

/// 方法配置服务客户端。
#[derive(Debug, Clone)]
pub struct HubClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HubClient {
    /// 创建客户端。`base_url` 末尾的 `/` 会被去掉。
    pub fn new(http_client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Self {
            http_client,
            base_url,
            api_key,
        }
    }

    /// 获取 `(平台, 功能)` 对应的方法配置。
    pub async fn method_config(&self, source: Source, function: Function) -> Result<MethodConfig> {
        let data = self
            .request(Method::GET, &format!("/v1/methods/{source}/{function}"), None)
            .await?;
        serde_json::from_value(data).map_err(|e| {
            warn!("{source}/{function} 的方法配置无法解析: {e}");
            GatewayError::InvalidMethodConfig(format!("{source}/{function} 的方法配置无法解析"))
        })
    }

    /// 原样返回方法配置的目录，可以按平台和功能逐级收窄。
    ///
    /// 指定功能时必须同时指定平台。
    pub async fn methods(&self, source: Option<Source>, function: Option<Function>) -> Result<Value> {
        let path = match (source, function) {
            (None, _) => "/v1/methods".to_string(),
            (Some(source), None) => format!("/v1/methods/{source}"),
            (Some(source), Some(function)) => format!("/v1/methods/{source}/{function}"),
        };
        self.request(Method::GET, &path, None).await
    }

    /// 解析歌曲的播放链接，结果原样返回。
    pub async fn parse(&self, platform: Source, ids: &str, quality: &str) -> Result<Value> {
        let body = json!({
            "platform": platform,
            "ids": ids,
            "quality": quality,
        });
        self.request(Method::POST, "/v1/parse", Some(body)).await
    }

    /// 返回已配置的 API Key，未配置时返回 `GatewayError::Config`。
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| GatewayError::Config(MISSING_KEY_MESSAGE.to_string()))
    }

    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let api_key = self.api_key()?;

        let url = format!("{}{}", self.base_url, path);
        debug!("TuneHub {} {}", method, url);

        let mut request = self
            .http_client
            .request(method, &url)
            .header(API_KEY_HEADER, api_key);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("TuneHub {} 返回状态码 {}", url, status);
            return Err(GatewayError::Hub(format!(
                "TuneHub 请求失败：{}",
                status.as_u16()
            )));
        }

        let envelope = parse_maybe_json(&text)
            .and_then(|value| serde_json::from_value::<HubEnvelope>(value).ok());
        match envelope {
            Some(envelope) if envelope.is_ok() => Ok(envelope.data),
            Some(envelope) => {
                let message = envelope
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "TuneHub 返回错误".to_string());
                warn!("TuneHub {} 返回错误: {}", url, message);
                Err(GatewayError::Hub(message))
            }
            None => Err(GatewayError::Hub("TuneHub 返回错误".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    fn client(server: &MockServer, api_key: Option<&str>) -> HubClient {
        HubClient::new(
            Client::new(),
            format!("{}/", server.uri()),
            api_key.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn test_method_config_is_unwrapped_from_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/methods/qq/search"))
            .and(header("X-API-Key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "success": true,
                "data": { "url": "https://u.y.qq.com/cgi-bin/musicu.fcg", "method": "post" }
            })))
            .mount(&server)
            .await;

        let config = client(&server, Some("secret"))
            .method_config(Source::Qq, Function::Search)
            .await
            .unwrap();
        assert_eq!(config.url, "https://u.y.qq.com/cgi-bin/musicu.fcg");
        assert_eq!(config.method.as_deref(), Some("post"));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server, Some("   "))
            .methods(None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), MISSING_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn test_envelope_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/methods/netease"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 401, "success": false, "message": "API Key 无效"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/methods/kuwo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 1 })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/methods"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let hub = client(&server, Some("k"));

        let err = hub.methods(Some(Source::Netease), None).await.unwrap_err();
        assert_eq!(err.to_string(), "API Key 无效");
        assert_eq!(err.status_code(), 502);

        let err = hub.methods(Some(Source::Kuwo), None).await.unwrap_err();
        assert_eq!(err.to_string(), "TuneHub 返回错误");

        let err = hub.methods(None, None).await.unwrap_err();
        assert_eq!(err.to_string(), "TuneHub 请求失败：503");
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_parse_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/parse"))
            .and(body_json(json!({ "platform": "kuwo", "ids": "1,2", "quality": "flac" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "data": [{ "id": "1", "url": "https://example.com/1.flac" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let data = client(&server, Some("k"))
            .parse(Source::Kuwo, "1,2", "flac")
            .await
            .unwrap();
        assert_eq!(data[0]["url"], "https://example.com/1.flac");
    }
}
