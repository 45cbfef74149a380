//! Response classifier: codebook prompts over an OpenAI-compatible chat service.

mod classifier;
pub mod llm;

pub use classifier::{Classifier, DEFAULT_MODEL, TEMPERATURE};
pub use llm::{ChatBackend, ClientConfig, LlmError, OpenAiClient};
