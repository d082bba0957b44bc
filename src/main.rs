//! 命令行入口
//!
//! 四个子命令对应评测流水线的四个阶段：
//! generate -> judge -> stats / compare

use anyhow::Result;
use clap::{Parser, Subcommand};

use prompt_eval::utils::logging;
use prompt_eval::{App, Config};

#[derive(Parser)]
#[command(name = "prompt_eval")]
#[command(about = "LLM prompt 评测流水线：批量生成、批量评审、统计分析")]
struct Cli {
    /// 参与统计的分数字段，逗号分隔（默认取配置）
    #[arg(long, global = true, value_delimiter = ',')]
    score_keys: Option<Vec<String>>,

    /// 显著性阈值（默认取配置，通常 0.05）
    #[arg(long, global = true)]
    significance_threshold: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 批量调用 LLM，把响应写成 result_<N>.json
    Generate {
        /// 使用的 prompt 名字（如 prompt1, prompt2）
        #[arg(long)]
        prompt: String,
        /// 输入目录（支持 .txt / .json / .csv）
        #[arg(long)]
        input_dir: String,
        /// 输出目录（不存在时自动创建）
        #[arg(long)]
        output_dir: String,
        /// 最大并发数（默认取配置）
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// 批量评审 input/response 记录，把评分写成 judgment_<N>.json
    Judge {
        /// 生成阶段的输出目录
        #[arg(long)]
        input_dir: String,
        /// 评审结果输出目录
        #[arg(long)]
        output_dir: String,
        /// 最大并发数（默认取配置）
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// 打印单个评审目录的描述性统计
    Stats {
        /// 评审结果目录
        #[arg(long)]
        input_dir: String,
    },
    /// 对两个评审目录逐字段做 Welch T 检验
    Compare {
        /// 第一组评审结果目录
        #[arg(long)]
        dir1: String,
        /// 第二组评审结果目录
        #[arg(long)]
        dir2: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(keys) = cli.score_keys {
        config.score_keys = keys;
    }
    if let Some(threshold) = cli.significance_threshold {
        config.significance_threshold = threshold;
    }
    let app = App::new(config);

    match cli.command {
        Commands::Generate {
            prompt,
            input_dir,
            output_dir,
            concurrency,
        } => {
            app.run_generate(&prompt, &input_dir, &output_dir, concurrency)
                .await
        }
        Commands::Judge {
            input_dir,
            output_dir,
            concurrency,
        } => app.run_judge(&input_dir, &output_dir, concurrency).await,
        Commands::Stats { input_dir } => app.run_stats(&input_dir).await,
        Commands::Compare { dir1, dir2 } => app.run_compare(&dir1, &dir2).await,
    }
}
