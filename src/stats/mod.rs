//! 统计分析引擎
//!
//! ## 模块划分
//!
//! - `summary` - 描述性统计（count / mean / median / stddev）
//! - `compare` - Welch 双样本 T 检验与显著性判定
//! - `extract` - 从结果记录中提取分数样本
//! - `distribution` - t 分布尾概率的数值计算
//!
//! 所有计算都是纯函数，每次分析从头重新计算，不持久化任何中间状态。

pub mod compare;
pub mod distribution;
pub mod extract;
pub mod summary;

pub use compare::{compare, Comparison, DEFAULT_SIGNIFICANCE_THRESHOLD};
pub use extract::{collect_samples, extract_scores, ScoreSampleSet};
pub use summary::{summarize, Summary};
