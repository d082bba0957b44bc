pub mod judge_service;
pub mod llm_service;
pub mod result_writer;

pub use judge_service::JudgeService;
pub use llm_service::LlmService;
pub use result_writer::ResultWriter;
