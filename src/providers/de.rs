//! 宽容的反序列化辅助函数。
//!
//! 各平台返回的字段类型并不稳定（ID 时而是数字时而是字符串，列表字段偶尔是
//! `null`），这里的函数保证结构不匹配时退化为默认值，而不是让整个响应解析失败。

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// 将原始响应反序列化为模型，结构完全不匹配时返回默认值。
pub fn from_raw<T: DeserializeOwned + Default>(raw: Value) -> T {
    serde_json::from_value(raw).unwrap_or_default()
}

/// 字符串原样保留，数字与布尔值转为文本，其余情况为空字符串。
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// 只接受真正的字符串，其余情况为 `None`。
pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// 数字或数字字符串转为 `u64`，其余情况为 0。
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// 结构不匹配时使用默认值。
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(from_raw(Value::deserialize(deserializer)?))
}

/// 非数组视为空列表；数组中无法解析的元素会被跳过。
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(opt_list(deserializer)?.unwrap_or_default())
}

/// 与 [`list`] 相同，但能区分“字段不是数组”（`None`）与“空数组”。
pub fn opt_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}
