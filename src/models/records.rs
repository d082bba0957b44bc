//! 结果记录的数据模型
//!
//! 生成阶段写 `result_<N>.json`（input + response），
//! 评审阶段写 `judgment_<N>.json`（评分字段 + input + response）。

use serde::{Deserialize, Serialize};

/// 生成阶段的单条结果：输入与 LLM 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub input: String,
    pub response: String,
}

/// LLM 评审结论
///
/// 三个问题各给一段评语和一个 0-5 的分数。
/// `total_score` 由本地重新计算（三项分数之和），不信任模型自己给的总分。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeVerdict {
    pub q1: String,
    pub q1_score: i64,
    pub q2: String,
    pub q2_score: i64,
    pub q3: String,
    pub q3_score: i64,
    #[serde(default)]
    pub total_score: i64,
}

impl JudgeVerdict {
    /// 用三项分数之和覆盖 total_score
    pub fn with_recomputed_total(mut self) -> Self {
        self.total_score = self.q1_score + self.q2_score + self.q3_score;
        self
    }
}

/// 评审阶段的单条持久化记录：评分字段平铺 + 原始输入和响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgmentRecord {
    #[serde(flatten)]
    pub verdict: JudgeVerdict,
    pub input: String,
    pub response: String,
}
