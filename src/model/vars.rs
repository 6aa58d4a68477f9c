//! 模板可以引用的调用变量，以及歌曲链接解析请求。

use crate::model::source::Source;

/// 调用方提供、可被方法配置模板引用的全部变量。
///
/// 这是一个封闭集合：模板表达式只能读取这里列出的字段。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallVars {
    /// 搜索关键词。
    pub keyword: Option<String>,
    /// 单个资源 ID（榜单、歌单或歌曲）。
    pub id: Option<String>,
    /// 多个歌曲 ID，逗号分隔。
    pub ids: Option<String>,
    /// 页码，从 1 开始。
    pub page: Option<u32>,
    /// 每页条数。
    pub limit: Option<u32>,
    /// 每页条数（部分平台的方法配置使用这个名字）。
    pub page_size: Option<u32>,
}

impl CallVars {
    /// 构造一次搜索调用的变量。`pageSize` 与 `limit` 取同一个值。
    pub fn for_search(keyword: impl Into<String>, page: u32, limit: u32) -> Self {
        Self {
            keyword: Some(keyword.into()),
            page: Some(page),
            limit: Some(limit),
            page_size: Some(limit),
            ..Default::default()
        }
    }

    /// 构造一次按 ID 查询的调用变量。
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }
}

/// 未指定音质时使用的默认值。
pub const DEFAULT_QUALITY: &str = "320k";

/// 一次歌曲链接解析请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRequest {
    /// 歌曲所在平台。
    pub source: Source,
    /// 逗号分隔的歌曲 ID。
    pub ids: String,
    /// 期望的音质，例如 `128k`、`320k`、`flac`。
    pub quality: String,
}

impl ParseRequest {
    /// 构造解析请求，`quality` 为空时使用默认音质。
    pub fn new(source: Source, ids: impl Into<String>, quality: Option<&str>) -> Self {
        let quality = quality
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_QUALITY);
        Self {
            source,
            ids: ids.into().trim().to_string(),
            quality: quality.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_vars_share_limit_and_page_size() {
        let vars = CallVars::for_search("晴天", 2, 30);
        assert_eq!(vars.page, Some(2));
        assert_eq!(vars.limit, Some(30));
        assert_eq!(vars.page_size, Some(30));
        assert_eq!(vars.id, None);
    }

    #[test]
    fn test_parse_request_default_quality() {
        let request = ParseRequest::new(Source::Qq, " 001,002 ", None);
        assert_eq!(request.ids, "001,002");
        assert_eq!(request.quality, "320k");
        assert_eq!(ParseRequest::new(Source::Qq, "1", Some("flac")).quality, "flac");
        assert_eq!(ParseRequest::new(Source::Qq, "1", Some("")).quality, "320k");
    }
}
