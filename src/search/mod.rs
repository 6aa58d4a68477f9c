//! 搜索模块
//!
//! 按固定的回退顺序依次在各平台上搜索，第一个返回非空结果的平台胜出。

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    model::{
        generic::{Song, attach_source},
        source::{Function, Source},
        vars::CallVars,
    },
    providers::Normalized,
};

/// 能够对某个平台执行某个功能的对象。
///
/// 生产环境中由 [`crate::MusicGateway`] 实现（获取方法配置 → 组装请求 → 执行 → 规范化），
/// 测试中可以替换为固定返回值的实现。
#[async_trait]
pub trait MethodRunner: Send + Sync {
    /// 对 `source` 执行 `function`，返回规范化之后的结果。
    async fn run_method(
        &self,
        source: Source,
        function: Function,
        vars: &CallVars,
    ) -> Result<Normalized>;
}

/// 回退搜索的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// 已附加来源标记的歌曲。
    pub results: Vec<Song>,
    /// 实际产出结果的平台；所有平台都没有结果时为被请求的平台。
    pub actual_source: Source,
}

/// 带回退的搜索。
///
/// 候选平台严格按顺序逐个尝试。某个平台出错时只记录日志并继续尝试下一个，
/// 因此这个函数本身永远不会因为上游故障而失败。
pub async fn search_with_fallback(
    runner: &dyn MethodRunner,
    requested: Source,
    vars: &CallVars,
) -> SearchOutcome {
    info!(
        "开始搜索 '{}'，首选平台: {}",
        vars.keyword.as_deref().unwrap_or_default(),
        requested
    );

    for candidate in requested.fallback_order() {
        let songs = match runner
            .run_method(candidate, Function::Search, vars)
            .await
            .and_then(Normalized::into_songs)
        {
            Ok(songs) => songs,
            Err(e) => {
                warn!("平台 '{}' 搜索失败: {}，尝试下一个平台。", candidate, e);
                continue;
            }
        };

        if songs.is_empty() {
            debug!("平台 '{}' 没有搜索结果。", candidate);
            continue;
        }

        info!("平台 '{}' 返回 {} 条结果。", candidate, songs.len());
        return SearchOutcome {
            results: attach_source(songs, candidate),
            actual_source: candidate,
        };
    }

    info!("所有平台都没有搜索结果。");
    SearchOutcome {
        results: Vec::new(),
        actual_source: requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use std::{collections::HashMap, sync::Mutex};

    enum Canned {
        Songs(usize),
        Fail,
    }

    struct MockRunner {
        responses: HashMap<Source, Canned>,
        attempts: Mutex<Vec<Source>>,
    }

    impl MockRunner {
        fn new(responses: impl IntoIterator<Item = (Source, Canned)>) -> Self {
            Self {
                responses: responses.into_iter().collect(),
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn attempts(&self) -> Vec<Source> {
            self.attempts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MethodRunner for MockRunner {
        async fn run_method(
            &self,
            source: Source,
            function: Function,
            _vars: &CallVars,
        ) -> Result<Normalized> {
            assert_eq!(function, Function::Search);
            self.attempts.lock().unwrap().push(source);
            match self.responses.get(&source) {
                Some(Canned::Songs(n)) => Ok(Normalized::Songs(
                    (0..*n)
                        .map(|i| Song {
                            id: format!("{source}-{i}"),
                            ..Default::default()
                        })
                        .collect(),
                )),
                Some(Canned::Fail) => Err(GatewayError::upstream_status(500)),
                None => Ok(Normalized::Songs(Vec::new())),
            }
        }
    }

    fn vars() -> CallVars {
        CallVars::for_search("晴天", 1, 10)
    }

    #[test_log::test(tokio::test)]
    async fn test_first_non_empty_source_wins() {
        let runner = MockRunner::new([(Source::Kuwo, Canned::Songs(3))]);

        let outcome = search_with_fallback(&runner, Source::Netease, &vars()).await;

        assert_eq!(outcome.actual_source, Source::Kuwo);
        assert_eq!(outcome.results.len(), 3);
        assert!(outcome.results.iter().all(|s| s.source == Some(Source::Kuwo)));
        assert_eq!(runner.attempts(), vec![Source::Netease, Source::Kuwo]);
    }

    #[test_log::test(tokio::test)]
    async fn test_requested_source_short_circuits() {
        let runner = MockRunner::new([
            (Source::Qq, Canned::Songs(1)),
            (Source::Kuwo, Canned::Songs(5)),
        ]);

        let outcome = search_with_fallback(&runner, Source::Qq, &vars()).await;

        assert_eq!(outcome.actual_source, Source::Qq);
        assert_eq!(outcome.results[0].id, "qq-0");
        assert_eq!(runner.attempts(), vec![Source::Qq]);
    }

    #[test_log::test(tokio::test)]
    async fn test_errors_are_skipped() {
        let runner = MockRunner::new([
            (Source::Kuwo, Canned::Fail),
            (Source::Netease, Canned::Fail),
            (Source::Qq, Canned::Songs(2)),
        ]);

        let outcome = search_with_fallback(&runner, Source::Kuwo, &vars()).await;

        assert_eq!(outcome.actual_source, Source::Qq);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(
            runner.attempts(),
            vec![Source::Kuwo, Source::Netease, Source::Qq]
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_exhaustion_returns_requested_source() {
        let runner = MockRunner::new([(Source::Netease, Canned::Fail)]);

        let outcome = search_with_fallback(&runner, Source::Qq, &vars()).await;

        assert!(outcome.results.is_empty());
        assert_eq!(outcome.actual_source, Source::Qq);
        assert_eq!(
            runner.attempts(),
            vec![Source::Qq, Source::Kuwo, Source::Netease]
        );
    }
}
