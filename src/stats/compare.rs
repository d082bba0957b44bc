//! 双样本显著性比较
//!
//! 采用 Welch T 检验（不假设两组总体方差相等）：
//! 两组 prompt 配置产生的分数分布完全可能离散程度不同。
//! p 值为双侧。

use crate::error::StatsError;
use crate::stats::distribution::students_t_two_sided;
use crate::stats::summary::{summarize, Summary};
use serde::Serialize;

/// 默认显著性阈值
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// 两组样本的比较结果
///
/// 同时携带检验结果和两组各自的描述性统计，
/// 调用方做比较时不需要再单独调用 `summarize`。
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    /// T 统计量（group1 - group2 方向；交换两组只翻转符号）
    pub statistic: f64,
    /// 双侧 p 值
    pub p_value: f64,
    /// p 值是否低于显著性阈值
    pub significant: bool,
    /// 第一组的描述性统计
    pub group1: Summary,
    /// 第二组的描述性统计
    pub group2: Summary,
}

/// Welch 双样本 T 检验
///
/// # 错误
/// 任一组样本数少于 2 时返回 `StatsError::InsufficientData`：
/// 方差估计至少需要 2 个点，此时 T 检验没有定义。
pub fn compare(
    samples1: &[f64],
    samples2: &[f64],
    significance_threshold: f64,
) -> Result<Comparison, StatsError> {
    for samples in [samples1, samples2] {
        if samples.len() < 2 {
            return Err(StatsError::InsufficientData {
                needed: 2,
                actual: samples.len(),
            });
        }
    }

    let group1 = summarize(samples1)?;
    let group2 = summarize(samples2)?;

    let n1 = group1.count as f64;
    let n2 = group2.count as f64;
    let var1 = group1.stddev * group1.stddev;
    let var2 = group2.stddev * group2.stddev;

    // 标准误的平方：v1/n1 + v2/n2
    let se_sq = var1 / n1 + var2 / n2;
    let mean_diff = group1.mean - group2.mean;

    let (statistic, p_value) = if se_sq == 0.0 {
        // 两组都零方差：均值相同则毫无差异，不同则差异必然显著
        if mean_diff == 0.0 {
            (0.0, 1.0)
        } else if mean_diff > 0.0 {
            (f64::INFINITY, 0.0)
        } else {
            (f64::NEG_INFINITY, 0.0)
        }
    } else {
        let statistic = mean_diff / se_sq.sqrt();

        // Welch–Satterthwaite 自由度
        let df = se_sq * se_sq
            / ((var1 / n1).powi(2) / (n1 - 1.0) + (var2 / n2).powi(2) / (n2 - 1.0));

        (statistic, students_t_two_sided(statistic, df))
    };

    Ok(Comparison {
        statistic,
        p_value,
        significant: p_value < significance_threshold,
        group1,
        group2,
    })
}
