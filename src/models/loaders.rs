//! 输入与结果文件加载
//!
//! - `read_inputs_from_directory` - 从目录递归读取 .txt / .json / .csv 输入
//! - `read_json_payloads` - 读取目录下的 *.json 结果文件（解析失败仅警告并跳过）
//! - `read_generation_records` - 读取生成阶段的 input/response 记录
//!
//! 所有目录遍历都先对路径排序，保证多次运行得到相同的输入顺序。

use crate::models::records::GenerationRecord;
use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// 从目录递归读取所有输入条目
///
/// 支持的格式：
/// - `.txt`: 每个非空行一个条目
/// - `.json`: 数组逐项；对象取字符串值和字符串列表值
/// - `.csv`: 单列取该列，多列用 ", " 拼接
pub async fn read_inputs_from_directory(input_dir: &str) -> Result<Vec<String>> {
    let folder = PathBuf::from(input_dir);
    if !folder.exists() {
        anyhow::bail!("输入目录不存在: {}", input_dir);
    }

    let mut files = Vec::new();
    collect_files(&folder, &mut files)
        .with_context(|| format!("无法遍历输入目录: {}", input_dir))?;
    // 排序保证运行之间输入顺序一致
    files.sort();

    let mut inputs = Vec::new();
    for path in files {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());

        match ext.as_deref() {
            Some("txt") => {
                let content = fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("无法读取文件: {}", path.display()))?;
                inputs.extend(parse_txt(&content));
            }
            Some("json") => {
                let content = fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("无法读取文件: {}", path.display()))?;
                let value: JsonValue = serde_json::from_str(&content)
                    .with_context(|| format!("无法解析JSON文件: {}", path.display()))?;
                collect_json_inputs(&value, &mut inputs);
            }
            Some("csv") => {
                let content = fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("无法读取文件: {}", path.display()))?;
                inputs.extend(parse_csv(&content)?);
            }
            // 其他格式不参与
            _ => {}
        }
    }

    Ok(inputs)
}

/// 递归收集目录下的所有文件路径
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

fn parse_txt(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

fn collect_json_inputs(value: &JsonValue, inputs: &mut Vec<String>) {
    match value {
        JsonValue::Array(items) => {
            for item in items {
                inputs.push(json_to_input(item));
            }
        }
        JsonValue::Object(map) => {
            // 对象只取字符串值和字符串列表值
            for item in map.values() {
                match item {
                    JsonValue::String(s) => inputs.push(s.clone()),
                    JsonValue::Array(list) => {
                        for entry in list {
                            inputs.push(json_to_input(entry));
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn json_to_input(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_csv(content: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut inputs = Vec::new();
    for record in reader.records() {
        let record = record.context("无法解析CSV行")?;
        if record.is_empty() {
            continue;
        }
        if record.len() == 1 {
            inputs.push(record[0].to_string());
        } else {
            let fields: Vec<&str> = record.iter().collect();
            inputs.push(fields.join(", "));
        }
    }
    Ok(inputs)
}

/// 读取目录下所有 *.json 文件的载荷
///
/// 单个文件解析失败只警告并跳过，不让个别坏文件拖垮整次分析。
pub async fn read_json_payloads(input_dir: &str) -> Result<Vec<JsonValue>> {
    let folder = PathBuf::from(input_dir);
    if !folder.exists() {
        anyhow::bail!("输入目录不存在: {}", input_dir);
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取目录: {}", input_dir))?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    // 按文件名的数字后缀排序（result_10 排在 result_2 之后），
    // 没有数字后缀的文件排在最后，按字典序兜底
    paths.sort_by_key(|path| (numeric_suffix(path).unwrap_or(u64::MAX), path.clone()));

    let mut payloads = Vec::new();
    for path in paths {
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("⚠️ 无法读取 {}: {}", path.display(), e);
                continue;
            }
        };
        match serde_json::from_str::<JsonValue>(&content) {
            Ok(value) => payloads.push(value),
            Err(e) => {
                warn!("⚠️ 无法解析 {}: {}", path.display(), e);
            }
        }
    }

    info!("✓ 从 {} 读取了 {} 个JSON文件", input_dir, payloads.len());
    Ok(payloads)
}

/// 文件名主干中最后一个 `_` 之后的数字（如 `result_12.json` -> 12）
fn numeric_suffix(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let idx = stem.rfind('_')?;
    stem[idx + 1..].parse().ok()
}

/// 读取生成阶段写出的 input/response 记录
///
/// 缺少 input 或 response 字段的文件视为坏记录，警告并跳过。
pub async fn read_generation_records(input_dir: &str) -> Result<Vec<GenerationRecord>> {
    let payloads = read_json_payloads(input_dir).await?;

    let mut records = Vec::new();
    for payload in payloads {
        match serde_json::from_value::<GenerationRecord>(payload.clone()) {
            Ok(record) => records.push(record),
            Err(_) => {
                warn!("⚠️ 记录缺少 input/response 字段，已跳过: {}", payload);
            }
        }
    }
    Ok(records)
}
