//! finsight-llm — hosted-model access for statement commentary.
//!   backend     — LlmBackend trait, Gemini and OpenAI-compatible clients
//!   commentary  — prompt construction and the commentary request

pub mod backend;
pub mod commentary;

pub use backend::{GeminiBackend, LlmBackend, LlmError, LlmRequest, LlmResponse, Message, OpenAiCompatibleBackend};
pub use commentary::{Commentary, CommentaryFailure};
