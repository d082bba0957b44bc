//! 流程层
//!
//! 每个子命令对应一个流程模块：
//! - `generate_flow` - 批量生成：输入 × prompt -> LLM 响应
//! - `judge_flow` - 批量评审：input/response -> 评分
//! - `analyze_flow` - 统计与两组比较
//!
//! 流程层负责"读输入 -> 并发执行 -> 写结果"的编排，
//! 单条记录的处理细节委托给 services 层。

pub mod analyze_flow;
pub mod generate_flow;
pub mod judge_flow;

/// 一次批量流程的汇总统计
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}
