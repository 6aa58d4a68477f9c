//! 方法配置模板的求值。
//!
//! 方法配置中的 `params` 与 `body` 可以包含 `{{expr}}` 占位符。这里的表达式
//! 不是一门语言，而是一个封闭的访问器集合 [`TemplateExpr`]：识别不了的表达式一律
//! 求值为空字符串，永远不会被当作代码执行。

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::model::vars::CallVars;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 20;

static WHOLE_PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\{([^{}]+)\}\}$").unwrap());

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").unwrap());

/// 模板中允许出现的全部表达式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateExpr {
    /// `keyword`
    Keyword,
    /// `id`
    Id,
    /// `ids`
    Ids,
    /// `page` 或 `page||1`
    Page,
    /// `limit` 或 `limit||20`
    Limit,
    /// `pageSize`
    PageSize,
    /// `(page||1)-1`，从 0 开始的页码
    PageIndex,
    /// `((page||1)-1)*(limit||20)`，分页偏移量
    Offset,
    /// `parseInt(id)`
    IdAsInt,
}

impl TemplateExpr {
    /// 识别一个表达式。表达式中的空白会被忽略。
    pub fn parse(expr: &str) -> Option<Self> {
        let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
        let parsed = match compact.as_str() {
            "keyword" => Self::Keyword,
            "id" => Self::Id,
            "ids" => Self::Ids,
            "page" | "page||1" => Self::Page,
            "limit" | "limit||20" => Self::Limit,
            "pageSize" => Self::PageSize,
            "(page||1)-1" => Self::PageIndex,
            "((page||1)-1)*(limit||20)" => Self::Offset,
            "parseInt(id)" => Self::IdAsInt,
            _ => return None,
        };
        Some(parsed)
    }

    /// 以调用变量为输入求值。字符串变量保持字符串，数值表达式产出数字。
    pub fn eval(self, vars: &CallVars) -> Value {
        let page = vars.page.map_or(DEFAULT_PAGE, i64::from);
        let limit = vars.limit.map_or(DEFAULT_LIMIT, i64::from);
        match self {
            Self::Keyword => Value::String(vars.keyword.clone().unwrap_or_default()),
            Self::Id => Value::String(vars.id.clone().unwrap_or_default()),
            Self::Ids => Value::String(vars.ids.clone().unwrap_or_default()),
            Self::Page => Value::from(page),
            Self::Limit => Value::from(limit),
            Self::PageSize => Value::from(vars.page_size.map_or(DEFAULT_LIMIT, i64::from)),
            Self::PageIndex => Value::from(page - 1),
            Self::Offset => Value::from((page - 1) * limit),
            Self::IdAsInt => Value::from(
                vars.id
                    .as_deref()
                    .and_then(parse_leading_int)
                    .unwrap_or(0),
            ),
        }
    }
}

/// 求值单个表达式；不认识的表达式得到空字符串。
pub fn evaluate(expr: &str, vars: &CallVars) -> Value {
    TemplateExpr::parse(expr).map_or_else(|| Value::String(String::new()), |e| e.eval(vars))
}

/// 递归地解析一个模板值。
///
/// * 对象与数组逐项解析，非字符串的叶子原样保留。
/// * 整个字符串恰好是一个占位符时，返回表达式的原生值（数字仍是数字）。
/// * 其余字符串把每个占位符替换为其字符串形式后拼接。
pub fn resolve(value: &Value, vars: &CallVars) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), resolve(item, vars)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|item| resolve(item, vars)).collect()),
        Value::String(text) => resolve_str(text, vars),
        other => other.clone(),
    }
}

fn resolve_str(text: &str, vars: &CallVars) -> Value {
    if let Some(caps) = WHOLE_PLACEHOLDER_RE.captures(text) {
        return evaluate(&caps[1], vars);
    }

    let replaced = PLACEHOLDER_RE.replace_all(text, |caps: &Captures<'_>| {
        value_to_text(&evaluate(&caps[1], vars))
    });
    Value::String(replaced.into_owned())
}

/// 把一个 JSON 值转换成拼接到字符串中时的文本形式。
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 按 `parseInt` 的方式解析开头的整数部分，例如 `" 42abc"` 得到 `42`。
pub(crate) fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // 超出范围的数字按饱和处理，后续的范围限制会把它拉回合法区间。
    let magnitude: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
