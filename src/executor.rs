//! 批量执行器 - 核心引擎
//!
//! ## 职责
//!
//! 对一批输入条目并发地执行 worker 函数，并发数由 Semaphore 限制。
//!
//! ## 核心契约
//!
//! 1. **顺序保证**：返回的结果序列按原始输入顺序排列，
//!    与各个 worker 的完成先后无关（收集后按 `index` 重新排序）
//! 2. **失败隔离**：单个条目失败（错误返回或 panic）只记录在该条目的
//!    `ItemResult` 中，绝不取消或中断其余条目
//! 3. **无状态**：执行器不跨调用持有任何状态，唯一的共享资源是
//!    本次调用内部的 Semaphore
//!
//! ## 不保证的事情
//!
//! - 不保证两个 worker 副作用的相对时序（并发调用可能以任意顺序到达远端）
//! - 不自动重试，重试策略属于 worker 函数自身
//! - 不支持中途取消，已派发的 worker 会运行至完成或失败

use crate::error::WorkerFailure;
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::warn;

/// 默认并发数
pub const DEFAULT_CONCURRENCY: usize = 25;

/// 单个条目的执行结果
///
/// `outcome` 中 `Ok` 与 `Err` 恰好二选一：
/// 要么有输出，要么有失败记录，不存在两者皆空的状态。
/// 创建后不再修改。
#[derive(Debug, Clone)]
pub struct ItemResult<I, O> {
    /// 条目在原始输入序列中的位置（从 0 开始）
    pub index: usize,
    /// 原始输入
    pub input: I,
    /// worker 的输出或失败记录
    pub outcome: Result<O, WorkerFailure>,
}

impl<I, O> ItemResult<I, O> {
    /// 输出（成功时）
    pub fn output(&self) -> Option<&O> {
        self.outcome.as_ref().ok()
    }

    /// 失败记录（失败时）
    pub fn error(&self) -> Option<&WorkerFailure> {
        self.outcome.as_ref().err()
    }

    /// 是否成功
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// 并发执行一批条目
///
/// # 参数
/// - `items`: 输入条目序列，可以为空（返回空序列，不报错）
/// - `worker`: 对单个条目的处理函数，执行器不关心其内部逻辑
/// - `concurrency`: 最大并发数，0 会被提升为 1；大于条目数是合法的
///
/// # 返回
/// 每个条目一条 `ItemResult`，按输入顺序排列
pub async fn execute<I, O, F, Fut>(
    items: Vec<I>,
    worker: F,
    concurrency: usize,
) -> Vec<ItemResult<I, O>>
where
    I: Clone + Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
{
    if items.is_empty() {
        return Vec::new();
    }

    let concurrency = if concurrency == 0 {
        warn!("⚠️ 并发数不能为 0，已调整为 1");
        1
    } else {
        concurrency
    };

    let semaphore = Arc::new(Semaphore::new(concurrency));
    let worker = Arc::new(worker);
    let mut handles = Vec::with_capacity(items.len());

    // 按输入顺序派发任务，完成顺序不受约束
    for (index, input) in items.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        let worker = worker.clone();
        let record_input = input.clone();

        let handle = tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => anyhow::bail!("并发许可获取失败: {}", e),
            };
            worker(input).await
        });
        handles.push((index, record_input, handle));
    }

    // 等待所有任务完成，逐个归档为 ItemResult
    let gathered = handles.into_iter().map(|(index, input, handle)| async move {
        let outcome = match handle.await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(WorkerFailure::new(format!("{e:#}"))),
            // 任务 panic 也算该条目失败，不影响其余条目
            Err(e) => Err(WorkerFailure::new(format!("任务执行失败: {}", e))),
        };
        ItemResult {
            index,
            input,
            outcome,
        }
    });

    let mut results: Vec<ItemResult<I, O>> = join_all(gathered).await;

    // 关键契约：无论完成顺序如何，返回前必须按 index 恢复输入顺序
    results.sort_by_key(|r| r.index);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// 反向延迟：越靠前的条目睡得越久，强制完成顺序与输入顺序相反
    #[tokio::test]
    async fn test_output_order_matches_input_order() {
        let items: Vec<usize> = (0..8).collect();
        let n = items.len();

        let results = execute(
            items,
            move |i: usize| async move {
                tokio::time::sleep(Duration::from_millis(((n - i) * 10) as u64)).await;
                Ok(i * 2)
            },
            8,
        )
        .await;

        assert_eq!(results.len(), 8);
        for (expected, record) in results.iter().enumerate() {
            assert_eq!(record.index, expected);
            assert_eq!(record.input, expected);
            assert_eq!(*record.output().unwrap(), expected * 2);
        }
    }

    /// 并发数为 1 时顺序保证同样成立
    #[tokio::test]
    async fn test_order_with_concurrency_one() {
        let items: Vec<usize> = (0..5).collect();
        let results = execute(items, |i: usize| async move { Ok(i + 100) }, 1).await;

        let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    /// 第 3 个条目（index 2）失败，其余 4 个必须照常完成
    #[tokio::test]
    async fn test_failure_isolation() {
        let items: Vec<usize> = (0..5).collect();
        let results = execute(
            items,
            |i: usize| async move {
                if i == 2 {
                    anyhow::bail!("模拟失败")
                }
                Ok(i)
            },
            4,
        )
        .await;

        assert_eq!(results.len(), 5);
        for record in &results {
            if record.index == 2 {
                assert!(record.output().is_none());
                let failure = record.error().expect("index 2 应该有失败记录");
                assert!(failure.message.contains("模拟失败"));
            } else {
                assert!(record.is_success());
                assert!(record.error().is_none());
            }
        }
    }

    /// worker panic 同样被隔离为该条目的失败
    #[tokio::test]
    async fn test_panic_isolation() {
        let items: Vec<usize> = (0..3).collect();
        let results = execute(
            items,
            |i: usize| async move {
                if i == 1 {
                    panic!("worker panic");
                }
                Ok(i)
            },
            3,
        )
        .await;

        assert_eq!(results.len(), 3);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
        assert!(results[2].is_success());
    }

    /// 空输入直接返回空序列，不调用 worker
    #[tokio::test]
    async fn test_empty_input() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let results: Vec<ItemResult<String, String>> = execute(
            Vec::new(),
            move |input: String| {
                let calls = calls_clone.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(input)
                }
            },
            4,
        )
        .await;

        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    /// 并发数大于条目数是合法的
    #[tokio::test]
    async fn test_concurrency_larger_than_items() {
        let items = vec!["a".to_string(), "b".to_string()];
        let results = execute(
            items,
            |s: String| async move { Ok(s.to_uppercase()) },
            100,
        )
        .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].output().unwrap(), "A");
        assert_eq!(results[1].output().unwrap(), "B");
    }

    /// 重复条目各自独立处理，可以产生相同输出
    #[tokio::test]
    async fn test_duplicate_items() {
        let items = vec![7usize, 7, 7];
        let results = execute(items, |i: usize| async move { Ok(i * 10) }, 2).await;

        assert_eq!(results.len(), 3);
        for record in &results {
            assert_eq!(*record.output().unwrap(), 70);
        }
    }

    /// 并发数 0 被提升为 1，批次照常完成
    #[tokio::test]
    async fn test_zero_concurrency_clamped() {
        let items: Vec<usize> = (0..3).collect();
        let results = execute(items, |i: usize| async move { Ok(i) }, 0).await;
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_success()));
    }

    /// 同时运行的 worker 数量不超过并发上限
    #[tokio::test]
    async fn test_concurrency_bound_respected() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let in_flight_clone = in_flight.clone();
        let max_seen_clone = max_seen.clone();

        let items: Vec<usize> = (0..20).collect();
        let results = execute(
            items,
            move |i: usize| {
                let in_flight = in_flight_clone.clone();
                let max_seen = max_seen_clone.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok(i)
                }
            },
            3,
        )
        .await;

        assert_eq!(results.len(), 20);
        assert!(max_seen.load(Ordering::SeqCst) <= 3);
    }
}
