//! 评审流程
//!
//! ## 职责
//!
//! 1. 从生成阶段的输出目录读取 input/response 记录
//! 2. 并发让 LLM 评委逐条打分（执行器限流）
//! 3. 把评分写成 `judgment_<N>.json`（评分字段 + 原始输入和响应）
//!
//! 单条评审失败不中断批次。

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::executor;
use crate::models::{self, GenerationRecord, JudgmentRecord};
use crate::services::{JudgeService, LlmService, ResultWriter};
use crate::utils::logging::truncate_text;
use crate::workflow::FlowStats;

/// 运行评审流程
pub async fn run(config: &Config, input_dir: &str, output_dir: &str) -> Result<FlowStats> {
    info!("📁 正在从 {} 读取 input/response 记录...", input_dir);
    let records = models::read_generation_records(input_dir).await?;

    if records.is_empty() {
        warn!("⚠️ 没有找到任何 input/response 记录，流程结束");
        return Ok(FlowStats::default());
    }

    let total = records.len();
    info!("✓ 找到 {} 条记录", total);
    info!("⚖️ 开始并发评审（并发数: {}）", config.max_concurrent_requests);

    let judge = Arc::new(JudgeService::new(Arc::new(LlmService::new(config))));
    let results = executor::execute(
        records,
        move |record: GenerationRecord| {
            let judge = judge.clone();
            async move {
                let verdict = judge.judge(&record.input, &record.response).await?;
                Ok(JudgmentRecord {
                    verdict,
                    input: record.input,
                    response: record.response,
                })
            }
        },
        config.max_concurrent_requests,
    )
    .await;

    info!("📝 正在把评审结果写入 {}...", output_dir);
    let writer = ResultWriter::new(output_dir).await?;

    let mut stats = FlowStats {
        total,
        ..Default::default()
    };
    for result in &results {
        match &result.outcome {
            Ok(judgment) => {
                writer.write_judgment(result.index, judgment).await?;
                stats.success += 1;
            }
            Err(failure) => {
                error!(
                    "❌ 第 {} 条记录评审失败: {} (输入: {})",
                    result.index + 1,
                    failure,
                    truncate_text(&result.input.input, 50)
                );
                stats.failed += 1;
            }
        }
    }

    info!(
        "✓ 评审完成: 成功 {}/{}, 结果已保存至 {}",
        stats.success, stats.total, output_dir
    );
    Ok(stats)
}
