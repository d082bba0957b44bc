//! 应用编排层
//!
//! ## 职责
//!
//! 1. **入口分发**：把 CLI 子命令分发到对应的流程模块
//! 2. **启动与收尾**：打印启动横幅和最终统计
//! 3. **配置持有**：持有 `Config`，向下传递
//!
//! 不处理单条记录的细节，全部委托给 workflow 层。

use anyhow::Result;

use crate::config::Config;
use crate::utils::logging;
use crate::workflow::{analyze_flow, generate_flow, judge_flow};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 生成模式：批量调用 LLM
    ///
    /// `concurrency` 覆盖配置中的并发数（如果提供）。
    pub async fn run_generate(
        &self,
        prompt_name: &str,
        input_dir: &str,
        output_dir: &str,
        concurrency: Option<usize>,
    ) -> Result<()> {
        let config = self.config_with_concurrency(concurrency);
        logging::log_startup("generate", config.max_concurrent_requests);

        let stats = generate_flow::run(&config, prompt_name, input_dir, output_dir).await?;
        logging::print_final_stats(&stats);
        Ok(())
    }

    /// 评审模式：批量让 LLM 打分
    pub async fn run_judge(
        &self,
        input_dir: &str,
        output_dir: &str,
        concurrency: Option<usize>,
    ) -> Result<()> {
        let config = self.config_with_concurrency(concurrency);
        logging::log_startup("judge", config.max_concurrent_requests);

        let stats = judge_flow::run(&config, input_dir, output_dir).await?;
        logging::print_final_stats(&stats);
        Ok(())
    }

    /// 统计模式：单目录描述性统计
    pub async fn run_stats(&self, input_dir: &str) -> Result<()> {
        analyze_flow::run_stats(&self.config, input_dir).await
    }

    /// 比较模式：两目录 T 检验
    pub async fn run_compare(&self, dir1: &str, dir2: &str) -> Result<()> {
        analyze_flow::run_compare(&self.config, dir1, dir2).await
    }

    fn config_with_concurrency(&self, concurrency: Option<usize>) -> Config {
        let mut config = self.config.clone();
        if let Some(value) = concurrency {
            config.max_concurrent_requests = value;
        }
        config
    }
}
