//! `/api` 路由的前置中间件：跨域、预检请求、限流，以及每个请求的追踪 span。

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use crate::{error::GatewayError, limiter::RateDecision, server::AppState};

const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// 所有 `/api` 请求都会经过这里。
///
/// `OPTIONS` 请求直接返回 204，不计入限流。其余请求先做准入判断，
/// 无论结果如何，响应上都会带上跨域头和限流头。
pub async fn api_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "api",
        %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        if request.method() == Method::OPTIONS {
            let mut response = StatusCode::NO_CONTENT.into_response();
            apply_cors(response.headers_mut());
            return response;
        }

        let identity = client_identity(request.headers());
        let decision = state.limiter.admit(&identity);

        let mut response = if decision.allowed {
            next.run(request).await
        } else {
            warn!("调用方 {} 请求过于频繁", identity);
            GatewayError::RateLimited.into_response()
        };

        apply_cors(response.headers_mut());
        apply_rate_headers(response.headers_mut(), &decision);
        debug!("响应状态码 {}", response.status().as_u16());
        response
    }
    .instrument(span)
    .await
}

/// 识别调用方：优先使用 `CF-Connecting-IP`，其次是 `X-Forwarded-For` 的第一项。
pub fn client_identity(headers: &HeaderMap) -> String {
    if let Some(ip) = header_text(headers, "cf-connecting-ip")
        && !ip.is_empty()
    {
        return ip.to_string();
    }

    if let Some(forwarded) = header_text(headers, "x-forwarded-for")
        && !forwarded.is_empty()
    {
        return forwarded
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
    }

    "unknown".to_string()
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, X-API-Key"),
    );
}

fn apply_rate_headers(headers: &mut HeaderMap, decision: &RateDecision) {
    headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(decision.remaining));
    headers.insert(RATE_LIMIT_RESET, HeaderValue::from(decision.reset_at_secs()));
}
