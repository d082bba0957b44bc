//! 错误类型定义
//!
//! ## 错误分类
//!
//! - `WorkerFailure` - 单个条目的 worker 调用失败，记录在该条目的结果中，
//!   不会中断整个批次
//! - `StatsError` - 统计前置条件不满足（样本太少），直接向调用方抛出，
//!   绝不静默返回 0 或 NaN

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 单个条目的 worker 调用失败
///
/// 由批量执行器捕获并写入对应条目的 `ItemResult`，
/// 其余条目不受影响。会随结果记录一起序列化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct WorkerFailure {
    /// 失败原因描述
    pub message: String,
}

impl WorkerFailure {
    /// 创建新的失败记录
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 统计计算错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    /// 样本数量不足
    ///
    /// 摘要统计需要至少 1 个样本，T 检验每组需要至少 2 个样本
    #[error("样本数量不足: 需要至少 {needed} 个样本, 实际只有 {actual} 个")]
    InsufficientData {
        /// 所需的最少样本数
        needed: usize,
        /// 实际样本数
        actual: usize,
    },
}
