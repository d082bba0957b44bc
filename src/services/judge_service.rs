//! 评审服务 - 业务能力层
//!
//! 让 LLM 充当评委，对"输入 + 响应"给出三项评分
//!
//! ## 职责
//! - 构建评审 prompt（系统消息里列出三个评审问题）
//! - 调用 LLM 并把响应解析成结构化的 `JudgeVerdict`
//! - 总分在本地重新计算，不信任模型自己给的总分
//! - 只处理单条记录，不关心批次和流程

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

use crate::models::JudgeVerdict;
use crate::services::LlmService;

/// 评审用的系统消息：定义任务、三个评审问题和输出格式
const JUDGE_SYSTEM_PROMPT: &str = r#"Your task is to evaluate the quality of a response from an LLM.
You will be given a user input and the LLM's response to that input.
To accomplish your task, ask and answer the following questions about the response to the input.
Then score the response on a scale from 0 to 5 where 0 is the worst and 5 is the best.
1. Is the response factually accurate and free of errors?
2. Does the response fully address everything the input asked for?
3. Is the response clear, well-organized and easy to follow?
Respond in JSON with the keys q1, q1_score, q2, q2_score, q3, q3_score, total_score."#;

/// 评审服务
pub struct JudgeService {
    llm: Arc<LlmService>,
}

impl JudgeService {
    pub fn new(llm: Arc<LlmService>) -> Self {
        Self { llm }
    }

    /// 评审单条"输入 + 响应"记录
    pub async fn judge(&self, input: &str, llm_response: &str) -> Result<JudgeVerdict> {
        let user_message = format!(
            r#"Here is the user input:
<user_input>
{input}
</user_input>

Here is the LLM's response:
<llm_response>
{llm_response}
</llm_response>

How well did the LLM respond to the input?"#
        );

        let response = self
            .llm
            .send_to_llm(&user_message, Some(JUDGE_SYSTEM_PROMPT))
            .await?;

        debug!("评审响应长度: {} 字符", response.len());

        parse_verdict(&response)
    }
}

/// 从 LLM 响应中解析评审结论
///
/// 模型经常把 JSON 包在 ``` 代码围栏里或者前后加说明文字，
/// 这里先剥掉围栏，再截取第一个 `{` 到最后一个 `}` 之间的内容。
pub fn parse_verdict(response: &str) -> Result<JudgeVerdict> {
    let mut text = response.trim();

    // 剥掉 ```json ... ``` 代码围栏
    if let Some(stripped) = text.strip_prefix("```") {
        let stripped = stripped.strip_prefix("json").unwrap_or(stripped);
        text = stripped.strip_suffix("```").unwrap_or(stripped).trim();
    }

    // 截取第一个 { 到最后一个 } 之间的内容
    let json_text = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => anyhow::bail!("评审响应中没有找到JSON对象: {}", response),
    };

    let verdict: JudgeVerdict = serde_json::from_str(json_text)
        .with_context(|| format!("无法解析评审响应: {}", json_text))?;

    Ok(verdict.with_recomputed_total())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_VERDICT: &str = r#"{"q1": "准确", "q1_score": 4, "q2": "完整", "q2_score": 5, "q3": "清晰", "q3_score": 3, "total_score": 0}"#;

    #[test]
    fn test_parse_plain_json() {
        let verdict = parse_verdict(RAW_VERDICT).unwrap();
        assert_eq!(verdict.q1_score, 4);
        assert_eq!(verdict.q2_score, 5);
        assert_eq!(verdict.q3_score, 3);
        // 总分被重新计算
        assert_eq!(verdict.total_score, 12);
    }

    #[test]
    fn test_parse_fenced_json() {
        let response = format!("```json\n{RAW_VERDICT}\n```");
        let verdict = parse_verdict(&response).unwrap();
        assert_eq!(verdict.total_score, 12);
    }

    #[test]
    fn test_parse_json_with_surrounding_text() {
        let response = format!("这是我的评审结论：\n{RAW_VERDICT}\n希望对你有帮助。");
        let verdict = parse_verdict(&response).unwrap();
        assert_eq!(verdict.q1, "准确");
        assert_eq!(verdict.total_score, 12);
    }

    #[test]
    fn test_parse_missing_total_score() {
        // 模型响应里可以没有 total_score
        let response = r#"{"q1": "a", "q1_score": 2, "q2": "b", "q2_score": 2, "q3": "c", "q3_score": 1}"#;
        let verdict = parse_verdict(response).unwrap();
        assert_eq!(verdict.total_score, 5);
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(parse_verdict("模型拒绝回答").is_err());
        assert!(parse_verdict("{ q1: 缺引号 }").is_err());
    }
}
