//! 완성 클라이언트: 프롬프트와 함수 카탈로그를 언어 모델에 전달합니다.
//!
//! Completion client interface.
//!
//! Implementation details are split into submodules under `src/client/`:
//! wire bodies, the retry envelope, error classification and the Gemini
//! client itself.

pub mod builder;
pub mod core;
mod error_classification;
pub mod retry;
pub mod wire;

pub use builder::CompletionClientBuilder;
pub use core::GeminiClient;
pub use retry::RetryPolicy;
pub use wire::{Candidate, CompletionResult, Content, ErrorInfo, FunctionCall, Part};

use crate::catalog::FunctionCatalog;
use async_trait::async_trait;

/// Anything that can turn a prompt plus catalog into a completion result.
///
/// Implementations must not fail: transport and upstream problems are
/// reported through [`CompletionResult::error`].
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str, catalog: &FunctionCatalog) -> CompletionResult;
}
