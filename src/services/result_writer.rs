//! 结果写入服务
//!
//! 把每条结果写成独立的 JSON 文件：
//! - 生成阶段：`result_<N>.json`
//! - 评审阶段：`judgment_<N>.json`
//!
//! 文件编号从 1 开始，按原始输入顺序编号。

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use crate::models::{GenerationRecord, JudgmentRecord};

/// 结果写入器
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    /// 创建写入器并确保输出目录存在
    pub async fn new(output_dir: &str) -> Result<Self> {
        let path = PathBuf::from(output_dir);
        fs::create_dir_all(&path)
            .await
            .with_context(|| format!("无法创建输出目录: {}", output_dir))?;
        Ok(Self { output_dir: path })
    }

    /// 写入生成阶段的结果（`result_<index+1>.json`）
    pub async fn write_generation(&self, index: usize, record: &GenerationRecord) -> Result<()> {
        self.write_json(&format!("result_{}.json", index + 1), record)
            .await
    }

    /// 写入评审阶段的结果（`judgment_<index+1>.json`）
    pub async fn write_judgment(&self, index: usize, record: &JudgmentRecord) -> Result<()> {
        self.write_json(&format!("judgment_{}.json", index + 1), record)
            .await
    }

    async fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> Result<()> {
        let path = self.output_dir.join(file_name);
        let content = serde_json::to_string_pretty(value)
            .with_context(|| format!("无法序列化结果: {}", file_name))?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("无法写入文件: {}", path.display()))?;
        debug!("已写入 {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JudgeVerdict;

    #[tokio::test]
    async fn test_write_generation_record() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path().to_str().unwrap()).await.unwrap();

        let record = GenerationRecord {
            input: "问题".to_string(),
            response: "答案".to_string(),
        };
        writer.write_generation(0, &record).await.unwrap();

        // 编号从 1 开始
        let content = std::fs::read_to_string(dir.path().join("result_1.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["input"], "问题");
        assert_eq!(value["response"], "答案");
    }

    #[tokio::test]
    async fn test_write_judgment_record_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path().to_str().unwrap()).await.unwrap();

        let record = JudgmentRecord {
            verdict: JudgeVerdict {
                q1: "a".to_string(),
                q1_score: 1,
                q2: "b".to_string(),
                q2_score: 2,
                q3: "c".to_string(),
                q3_score: 3,
                total_score: 6,
            },
            input: "输入".to_string(),
            response: "响应".to_string(),
        };
        writer.write_judgment(4, &record).await.unwrap();

        let content = std::fs::read_to_string(dir.path().join("judgment_5.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["q1_score"], 1);
        assert_eq!(value["total_score"], 6);
        assert_eq!(value["input"], "输入");
    }

    #[tokio::test]
    async fn test_creates_nested_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let writer = ResultWriter::new(nested.to_str().unwrap()).await;
        assert!(writer.is_ok());
        assert!(nested.exists());
    }
}
