//! 分数提取
//!
//! 从一批结果记录中按字段名提取数值样本，构建 `ScoreSampleSet`。
//!
//! - 只有带输出的记录参与提取，失败记录静默跳过
//! - 某个字段在所有记录中都不存在时得到空样本序列，不算错误
//! - 字段存在但不是数值时防御性跳过（不让个别坏记录拖垮整次分析）

use crate::executor::ItemResult;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tracing::warn;

/// 分数字段名 -> 有序样本序列
///
/// 样本顺序与记录顺序一致（即原始输入顺序）；构建后不再修改。
pub type ScoreSampleSet = BTreeMap<String, Vec<f64>>;

/// 从执行器的结果记录中提取分数样本
///
/// 输出载荷必须是 JSON 对象才会贡献样本，其余形状防御性跳过。
pub fn extract_scores<I>(
    records: &[ItemResult<I, JsonValue>],
    keys: &[String],
) -> ScoreSampleSet {
    let payloads: Vec<&JsonValue> = records.iter().filter_map(|r| r.output()).collect();
    collect_from(&payloads, keys)
}

/// 从已读取的 JSON 载荷序列中提取分数样本
///
/// 用于分析已持久化的 judgment 目录。
pub fn collect_samples(payloads: &[JsonValue], keys: &[String]) -> ScoreSampleSet {
    let refs: Vec<&JsonValue> = payloads.iter().collect();
    collect_from(&refs, keys)
}

fn collect_from(payloads: &[&JsonValue], keys: &[String]) -> ScoreSampleSet {
    let mut samples = ScoreSampleSet::new();

    for key in keys {
        let entry = samples.entry(key.clone()).or_default();
        for payload in payloads {
            match payload.get(key) {
                Some(value) => match value.as_f64() {
                    Some(number) => entry.push(number),
                    None => {
                        warn!("⚠️ 字段 {} 不是数值，已跳过: {}", key, value);
                    }
                },
                // 字段缺失不是错误，直接跳过
                None => {}
            }
        }
    }

    samples
}
