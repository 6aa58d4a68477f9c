//! 查询参数与请求体的宽容解析。

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::Result,
    model::{source::Source, vars::ParseRequest},
    template::{parse_leading_int, value_to_text},
};

/// 所有 `/api` 接口可能用到的查询参数，一律先按字符串接收。
#[derive(Debug, Default, Deserialize)]
pub struct ApiQuery {
    /// 平台。
    pub source: Option<String>,
    /// 搜索关键词。
    pub keyword: Option<String>,
    /// 资源 ID。
    pub id: Option<String>,
    /// 逗号分隔的歌曲 ID。
    pub ids: Option<String>,
    /// 页码。
    pub page: Option<String>,
    /// 每页条数。
    pub limit: Option<String>,
    /// 音质。
    pub quality: Option<String>,
}

impl ApiQuery {
    /// 校验后的平台，缺省为网易云音乐。
    pub fn source(&self) -> Result<Source> {
        Source::parse_param(self.source.as_deref())
    }

    /// 原始关键词，未去除空白。
    pub fn keyword(&self) -> &str {
        self.keyword.as_deref().unwrap_or_default()
    }

    /// 原始资源 ID，未去除空白。
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// 页码，缺省为 1，范围 1 到 1000。
    pub fn page(&self) -> u32 {
        clamp_int(self.page.as_deref(), 1, 1, 1000)
    }

    /// 每页条数，缺省为 10，范围 1 到 50。
    pub fn limit(&self) -> u32 {
        clamp_int(self.limit.as_deref(), 10, 1, 50)
    }

    /// 由查询参数构造解析请求，`ids` 为空时使用 `id`。
    pub fn parse_request(&self) -> Result<ParseRequest> {
        let source = self.source()?;
        let ids = [self.ids.as_deref(), self.id.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .unwrap_or_default();
        Ok(ParseRequest::new(source, ids, self.quality.as_deref()))
    }
}

/// 由 POST 请求体构造解析请求。
///
/// 平台取 `source` 或 `platform`，ID 取 `ids` 或 `id`。ID 可以是字符串、数字或数组，
/// 数组会以逗号连接。
pub fn parse_request_from_body(body: &Value) -> Result<ParseRequest> {
    let source = first_present(body, &["source", "platform"]);
    let ids = first_present(body, &["ids", "id"]).unwrap_or_default();
    let quality = first_present(body, &["quality"]);
    Ok(ParseRequest::new(
        Source::parse_param(source.as_deref())?,
        ids,
        quality.as_deref(),
    ))
}

/// 返回第一个有实际内容的字段的文本形式。空字符串、`0`、`false`、`null` 视为缺失。
fn first_present(body: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match body.get(*key)? {
        Value::Null | Value::Bool(false) | Value::Object(_) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) => Some(
            items
                .iter()
                .map(value_to_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(value_to_text(other)),
    })
}

/// 按 `parseInt` 的方式解析整数并限制在 `[min, max]` 之间，无法解析时返回 `fallback`。
pub fn clamp_int(raw: Option<&str>, fallback: u32, min: u32, max: u32) -> u32 {
    match raw.and_then(parse_leading_int) {
        Some(n) => n.clamp(i64::from(min), i64::from(max)) as u32,
        None => fallback,
    }
}
