//! 把方法配置组装成具体的 HTTP 请求描述。此过程不做任何网络 I/O。

use std::collections::BTreeMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{GatewayError, Result},
    model::vars::CallVars,
    template::{self, value_to_text},
};

/// 描述一次上游调用形状的声明式配置，由方法配置服务下发。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    /// 上游接口地址，可以已经带有查询参数。
    pub url: String,
    /// 请求方法，缺省为 GET。
    #[serde(default)]
    pub method: Option<String>,
    /// 固定的请求头。
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    /// 需要合并到查询字符串中的参数模板。
    #[serde(default)]
    pub params: Option<Value>,
    /// 需要序列化为 JSON 请求体的模板。
    #[serde(default)]
    pub body: Option<Value>,
}

/// 一个已经完全确定的上游请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// 合并了查询参数之后的完整 URL。
    pub url: String,
    /// 大写的请求方法。
    pub method: String,
    /// 请求头。
    pub headers: BTreeMap<String, String>,
    /// 序列化后的 JSON 请求体。
    pub body: Option<String>,
}

/// 用调用变量填充方法配置，得到请求描述。
///
/// * 请求方法转为大写，缺省为 `GET`。
/// * 解析后的 `params` 逐个写入查询字符串（覆盖同名参数），跳过 `null` 与空字符串。
/// * 存在 `body` 时将其解析并序列化为 JSON，若配置中没有任何大小写形式的
///   `Content-Type` 请求头，则补上 `application/json`。
pub fn build(config: &MethodConfig, vars: &CallVars) -> Result<RequestDescriptor> {
    let method = config
        .method
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or("GET")
        .to_ascii_uppercase();

    let mut headers = config.headers.clone().unwrap_or_default();

    let mut url = Url::parse(&config.url).map_err(|e| {
        GatewayError::InvalidMethodConfig(format!("非法的上游地址 '{}': {e}", config.url))
    })?;

    if let Some(params) = &config.params
        && let Value::Object(resolved) = template::resolve(params, vars)
    {
        for (key, value) in &resolved {
            if let Some(text) = query_value(value) {
                set_query_param(&mut url, key, &text);
            }
        }
    }

    let body = match &config.body {
        Some(template_body) if !template_body.is_null() => {
            let resolved = template::resolve(template_body, vars);
            if !headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case("content-type"))
            {
                headers.insert("Content-Type".to_string(), "application/json".to_string());
            }
            Some(serde_json::to_string(&resolved)?)
        }
        _ => None,
    };

    Ok(RequestDescriptor {
        url: url.to_string(),
        method,
        headers,
        body,
    })
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(value_to_text(other)),
    }
}

/// 设置查询参数，已存在的同名参数会被替换。
fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != key)
        .map(|(name, val)| (name.into_owned(), val.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (name, val) in &retained {
        pairs.append_pair(name, val);
    }
    pairs.append_pair(key, value);
}
