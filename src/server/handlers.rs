//! `/api` 下各个接口的处理函数。

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::Value;

use crate::{
    error::{GatewayError, Result},
    model::{
        generic::{Playlist, Song, ToplistEntry},
        source::{Function, Source},
    },
    server::{
        AppState,
        envelope::ApiEnvelope,
        params::{ApiQuery, parse_request_from_body},
    },
};

type ApiResult<T> = Result<Json<ApiEnvelope<T>>>;

fn query_or_reject(query: std::result::Result<Query<ApiQuery>, QueryRejection>) -> Result<ApiQuery> {
    query
        .map(|Query(query)| query)
        .map_err(|e| GatewayError::Validation(format!("查询参数格式错误: {e}")))
}

/// `/api/health`，接受任意请求方法。
pub async fn health() -> Json<ApiEnvelope<()>> {
    ApiEnvelope::message("ok")
}

/// `GET /api/search`
pub async fn search(
    State(state): State<AppState>,
    query: std::result::Result<Query<ApiQuery>, QueryRejection>,
) -> ApiResult<Vec<Song>> {
    let query = query_or_reject(query)?;
    let source = query.source()?;
    let outcome = state
        .gateway
        .search(source, query.keyword(), query.page(), query.limit())
        .await?;
    Ok(ApiEnvelope::data(outcome.results))
}

/// `GET /api/toplists`
pub async fn toplists(
    State(state): State<AppState>,
    query: std::result::Result<Query<ApiQuery>, QueryRejection>,
) -> ApiResult<Vec<ToplistEntry>> {
    let source = query_or_reject(query)?.source()?;
    Ok(ApiEnvelope::data(state.gateway.toplists(source).await?))
}

/// `GET /api/toplist`
pub async fn toplist(
    State(state): State<AppState>,
    query: std::result::Result<Query<ApiQuery>, QueryRejection>,
) -> ApiResult<Vec<Song>> {
    let query = query_or_reject(query)?;
    let source = query.source()?;
    Ok(ApiEnvelope::data(
        state.gateway.toplist(source, query.id()).await?,
    ))
}

/// `GET /api/playlist`，歌单不存在时 `data` 为 `null`。
pub async fn playlist(
    State(state): State<AppState>,
    query: std::result::Result<Query<ApiQuery>, QueryRejection>,
) -> ApiResult<Option<Playlist>> {
    let query = query_or_reject(query)?;
    let source = query.source()?;
    Ok(ApiEnvelope::data(
        state.gateway.playlist(source, query.id()).await?,
    ))
}

/// `GET /api/parse`
pub async fn parse_get(
    State(state): State<AppState>,
    query: std::result::Result<Query<ApiQuery>, QueryRejection>,
) -> ApiResult<Value> {
    let request = query_or_reject(query)?.parse_request()?;
    Ok(ApiEnvelope::data(state.gateway.parse(&request).await?))
}

/// `POST /api/parse`，请求体为 JSON。
pub async fn parse_post(State(state): State<AppState>, body: Bytes) -> ApiResult<Value> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|_| GatewayError::Validation("请求体必须是合法的 JSON".to_string()))?;
    let request = parse_request_from_body(&body)?;
    Ok(ApiEnvelope::data(state.gateway.parse(&request).await?))
}

/// `GET /api/methods`
pub async fn methods(State(state): State<AppState>) -> ApiResult<Value> {
    Ok(ApiEnvelope::data(state.gateway.methods(None, None).await?))
}

/// `GET /api/methods/{source}`
pub async fn source_methods(
    State(state): State<AppState>,
    Path(source): Path<String>,
) -> ApiResult<Value> {
    let source = Source::parse_param(Some(&source))?;
    Ok(ApiEnvelope::data(
        state.gateway.methods(Some(source), None).await?,
    ))
}

/// `GET /api/methods/{source}/{function}`
pub async fn function_method(
    State(state): State<AppState>,
    Path((source, function)): Path<(String, String)>,
) -> ApiResult<Value> {
    let source = Source::parse_param(Some(&source))?;
    let function = Function::parse_param(&function)?;
    Ok(ApiEnvelope::data(
        state.gateway.methods(Some(source), Some(function)).await?,
    ))
}

/// 未匹配任何接口。
pub async fn not_found() -> GatewayError {
    GatewayError::NotFound("接口不存在".to_string())
}

/// 只接受 GET 的接口收到了其他方法。
pub async fn only_get() -> GatewayError {
    GatewayError::MethodNotAllowed("GET".to_string())
}

/// 只接受 GET 与 POST 的接口收到了其他方法。
pub async fn only_get_or_post() -> GatewayError {
    GatewayError::MethodNotAllowed("GET, POST".to_string())
}
