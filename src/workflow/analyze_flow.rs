//! 分析流程
//!
//! ## 职责
//!
//! - `run_stats`: 读取一个评审目录，按配置的分数字段打印描述性统计
//! - `run_compare`: 读取两个评审目录，对每个字段做 Welch T 检验
//!
//! 解析失败的评审文件在读取层已被跳过；
//! 样本不足的字段在这里警告并跳过，不中断其余字段的分析。

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::models;
use crate::stats::{collect_samples, compare, summarize};

/// 统计模式：单目录描述性统计
pub async fn run_stats(config: &Config, input_dir: &str) -> Result<()> {
    info!("📁 正在从 {} 读取评审文件...", input_dir);
    let payloads = models::read_json_payloads(input_dir).await?;

    if payloads.is_empty() {
        warn!("⚠️ 目录中没有找到任何评审文件");
        return Ok(());
    }

    let samples = collect_samples(&payloads, &config.score_keys);

    info!("\n{}", "=".repeat(50));
    info!("📊 统计摘要");
    info!("{}", "=".repeat(50));

    for (key, values) in &samples {
        if values.is_empty() {
            // 该字段在所有记录中都缺失，不参与报告
            continue;
        }
        let summary = summarize(values)?;
        info!("\n{}:", key);
        info!("  样本数: {}", summary.count);
        info!("  均值: {:.2}", summary.mean);
        info!("  中位数: {:.2}", summary.median);
        info!("  标准差: {:.2}", summary.stddev);
    }

    Ok(())
}

/// 比较模式：两目录逐字段 Welch T 检验
pub async fn run_compare(config: &Config, dir1: &str, dir2: &str) -> Result<()> {
    info!("📁 正在从 {} 读取评审文件...", dir1);
    let payloads1 = models::read_json_payloads(dir1).await?;
    info!("📁 正在从 {} 读取评审文件...", dir2);
    let payloads2 = models::read_json_payloads(dir2).await?;

    if payloads1.is_empty() {
        warn!("⚠️ {} 中没有找到任何评审文件", dir1);
        return Ok(());
    }
    if payloads2.is_empty() {
        warn!("⚠️ {} 中没有找到任何评审文件", dir2);
        return Ok(());
    }

    let samples1 = collect_samples(&payloads1, &config.score_keys);
    let samples2 = collect_samples(&payloads2, &config.score_keys);

    info!("\n{}", "=".repeat(60));
    info!("⚖️ T 检验比较结果（显著性阈值: {}）", config.significance_threshold);
    info!("{}", "=".repeat(60));

    for key in &config.score_keys {
        let group1 = samples1.get(key).map(Vec::as_slice).unwrap_or(&[]);
        let group2 = samples2.get(key).map(Vec::as_slice).unwrap_or(&[]);

        let result = match compare(group1, group2, config.significance_threshold) {
            Ok(result) => result,
            Err(e) => {
                // 样本不足的字段跳过，不中断其余字段
                warn!("⚠️ 字段 {} 无法比较: {}", key, e);
                continue;
            }
        };

        info!("\n{}:", key);
        info!(
            "  组 1 均值: {:.2} (n={})",
            result.group1.mean, result.group1.count
        );
        info!(
            "  组 2 均值: {:.2} (n={})",
            result.group2.mean, result.group2.count
        );
        info!("  T 统计量: {:.4}", result.statistic);
        info!("  P 值: {:.4}", result.p_value);
        info!(
            "  显著 (p<{}): {}",
            config.significance_threshold,
            if result.significant { "是" } else { "否" }
        );
    }

    Ok(())
}
