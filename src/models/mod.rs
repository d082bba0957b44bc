pub mod loaders;
pub mod records;

pub use loaders::{read_generation_records, read_inputs_from_directory, read_json_payloads};
pub use records::{GenerationRecord, JudgeVerdict, JudgmentRecord};
