//! 描述性统计
//!
//! 对单个分数样本序列计算 count / mean / median / stddev。
//! 空样本是错误而不是 0：对 0 个样本的摘要没有意义，必须显式报告。

use crate::error::StatsError;
use serde::Serialize;

/// 一组样本的描述性统计摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// 样本数量
    pub count: usize,
    /// 算术平均值
    pub mean: f64,
    /// 中位数（偶数个样本时取中间两个的平均）
    pub median: f64,
    /// 样本标准差（Bessel 校正，除以 n-1；单样本时定义为 0）
    pub stddev: f64,
}

/// 计算描述性统计摘要
///
/// # 错误
/// 样本为空时返回 `StatsError::InsufficientData`，
/// 绝不静默返回 0 或 NaN。
pub fn summarize(samples: &[f64]) -> Result<Summary, StatsError> {
    let count = samples.len();
    if count == 0 {
        return Err(StatsError::InsufficientData {
            needed: 1,
            actual: 0,
        });
    }

    let mean = samples.iter().sum::<f64>() / count as f64;

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = if count % 2 == 0 {
        let mid = count / 2;
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[count / 2]
    };

    // 单样本没有自由度估计离散程度，但 count/mean/median 仍然有意义
    let stddev = if count < 2 {
        0.0
    } else {
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    };

    Ok(Summary {
        count,
        mean,
        median,
        stddev,
    })
}
