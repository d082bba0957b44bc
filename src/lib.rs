//! # prompt_eval
//!
//! LLM prompt 评测流水线：批量生成、批量评审、统计分析。
//!
//! ## 分层架构
//!
//! - `executor` - 核心引擎：限流并发执行 + 顺序恢复 + 失败隔离
//! - `services` - 业务能力层：LLM 调用、评审打分、结果写入
//! - `workflow` - 流程层：生成 / 评审 / 分析三条流程的编排
//! - `stats` - 统计引擎：描述性统计 + Welch T 检验
//! - `models` - 数据模型与文件加载
//! - `app` - 应用编排：子命令分发
//!
//! ## 典型用法
//!
//! ```bash
//! prompt_eval generate --prompt prompt1 --input-dir inputs/ --output-dir results_p1/
//! prompt_eval judge --input-dir results_p1/ --output-dir judgments_p1/
//! prompt_eval stats --input-dir judgments_p1/
//! prompt_eval compare --dir1 judgments_p1/ --dir2 judgments_p2/
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod prompts;
pub mod services;
pub mod stats;
pub mod utils;
pub mod workflow;

pub use app::App;
pub use config::Config;
pub use error::{StatsError, WorkerFailure};
pub use executor::{execute, ItemResult, DEFAULT_CONCURRENCY};
