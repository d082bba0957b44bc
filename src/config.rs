use crate::executor::DEFAULT_CONCURRENCY;
use crate::stats::DEFAULT_SIGNIFICANCE_THRESHOLD;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的请求数量
    pub max_concurrent_requests: usize,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    // --- 分析配置 ---
    /// 参与统计的分数字段
    pub score_keys: Vec<String>,
    /// 显著性阈值（p 值小于该值判定为显著）
    pub significance_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_requests: DEFAULT_CONCURRENCY,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4.1".to_string(),
            llm_temperature: 0.0,
            score_keys: vec![
                "q1_score".to_string(),
                "q2_score".to_string(),
                "q3_score".to_string(),
                "total_score".to_string(),
            ],
            significance_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_requests: std::env::var("MAX_CONCURRENT_REQUESTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_requests),
            llm_api_key: std::env::var("LLM_API_KEY").or_else(|_| std::env::var("OPENAI_API_KEY")).unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_temperature),
            score_keys: std::env::var("SCORE_KEYS").map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()).unwrap_or(default.score_keys),
            significance_threshold: std::env::var("SIGNIFICANCE_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.significance_threshold),
        }
    }
}
