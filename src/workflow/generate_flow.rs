//! 生成流程
//!
//! ## 职责
//!
//! 1. 按名字选择系统提示词
//! 2. 从输入目录读取所有输入条目
//! 3. 并发调用 LLM（执行器限流）
//! 4. 把成功结果写成 `result_<N>.json`，失败条目记录日志
//!
//! 单个条目失败不中断批次，编号始终对应原始输入顺序。

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::executor;
use crate::models::{self, GenerationRecord};
use crate::prompts;
use crate::services::{LlmService, ResultWriter};
use crate::utils::logging::truncate_text;
use crate::workflow::FlowStats;

/// 运行生成流程
pub async fn run(
    config: &Config,
    prompt_name: &str,
    input_dir: &str,
    output_dir: &str,
) -> Result<FlowStats> {
    // 选择系统提示词
    let system_prompt = match prompts::get_prompt(prompt_name) {
        Some(prompt) => prompt,
        None => anyhow::bail!(
            "未找到名为 '{}' 的 prompt，可用: {}",
            prompt_name,
            prompts::available().join(", ")
        ),
    };

    info!("📁 正在从 {} 读取输入...", input_dir);
    let inputs = models::read_inputs_from_directory(input_dir).await?;

    if inputs.is_empty() {
        warn!("⚠️ 输入目录中没有找到任何输入，流程结束");
        return Ok(FlowStats::default());
    }

    let total = inputs.len();
    info!("✓ 找到 {} 个输入", total);
    info!(
        "🚀 开始并发调用 LLM（prompt: {}, 并发数: {}）",
        prompt_name, config.max_concurrent_requests
    );

    let llm = Arc::new(LlmService::new(config));
    let results = executor::execute(
        inputs,
        move |input: String| {
            let llm = llm.clone();
            async move { llm.send_to_llm(&input, Some(system_prompt)).await }
        },
        config.max_concurrent_requests,
    )
    .await;

    info!("📝 正在把结果写入 {}...", output_dir);
    let writer = ResultWriter::new(output_dir).await?;

    let mut stats = FlowStats {
        total,
        ..Default::default()
    };
    for result in &results {
        match &result.outcome {
            Ok(response) => {
                let record = GenerationRecord {
                    input: result.input.clone(),
                    response: response.clone(),
                };
                writer.write_generation(result.index, &record).await?;
                stats.success += 1;
            }
            Err(failure) => {
                error!(
                    "❌ 第 {} 个输入处理失败: {} (输入: {})",
                    result.index + 1,
                    failure,
                    truncate_text(&result.input, 50)
                );
                stats.failed += 1;
            }
        }
    }

    info!(
        "✓ 生成完成: 成功 {}/{}, 结果已保存至 {}",
        stats.success, stats.total, output_dir
    );
    Ok(stats)
}
