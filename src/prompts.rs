//! 系统提示词注册表
//!
//! 每个待比较的 prompt 配置在这里注册一个名字，
//! 生成阶段用 `--prompt <名字>` 选择。
//! 编译期静态表，新增配置只需要加一行。

use phf::phf_map;

static PROMPTS: phf::Map<&'static str, &'static str> = phf_map! {
    "prompt1" => "You are a helpful assistant. Answer the user's question directly and concisely. \
                  If you are not sure about something, say so instead of guessing.",
    "prompt2" => "You are a helpful assistant. Think through the user's question step by step before answering. \
                  First outline the key considerations, then give a clear final answer. \
                  If you are not sure about something, say so instead of guessing.",
};

/// 按名字查找系统提示词
pub fn get_prompt(name: &str) -> Option<&'static str> {
    PROMPTS.get(name).copied()
}

/// 所有已注册的 prompt 名字（按字典序）
pub fn available() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PROMPTS.keys().copied().collect();
    names.sort_unstable();
    names
}
