//! LlmProvider trait definition.
//!
//! This is the core abstraction that all LLM providers implement.

use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends (OpenAI, Gemini, test doubles).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition) for
/// `complete`. Implementations live in chatrelay-infra
/// (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "openai", "gemini").
    fn name(&self) -> &str;

    /// Model requested when `CompletionRequest::model` is empty.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
