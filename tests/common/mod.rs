//! Shared fixtures for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use calendar_chat::client::{CompletionResult, CompletionService, GeminiClient, RetryPolicy};
use calendar_chat::dispatch::ManagementNotifier;
use calendar_chat::{CompletionClientBuilder, FunctionCatalog, Invocation};
use mockito::{Mock, Server, ServerGuard};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

pub const MODEL: &str = "gemini-test";
pub const API_KEY: &str = "test-key";

pub fn generate_path() -> String {
    format!("/v1beta/models/{}:generateContent", MODEL)
}

/// Retry envelope small enough to keep tests fast.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        min_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(4),
    }
}

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Completion client pointed at the mock server
    pub fn completion_client(&self) -> GeminiClient {
        CompletionClientBuilder::new()
            .api_key(API_KEY)
            .model(MODEL)
            .retry_policy(fast_retry())
            .base_url_override(&self.base_url)
            .build()
            .expect("client builds")
    }

    /// Mock the completion endpoint with a fixed status and JSON body
    pub async fn mock_completion(&mut self, status: usize, body: &str, hits: usize) -> Mock {
        self.server
            .mock("POST", generate_path().as_str())
            .match_header("x-goog-api-key", API_KEY)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }
}

pub fn rate_limit_body() -> &'static str {
    r#"{"error":{"code":429,"message":"Resource has been exhausted (e.g. check quota).","status":"RESOURCE_EXHAUSTED"}}"#
}

/// Completion service that replays canned results and records prompts.
pub struct ScriptedCompletion {
    results: Mutex<VecDeque<CompletionResult>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(results: Vec<CompletionResult>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str, _catalog: &FunctionCatalog) -> CompletionResult {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.results.lock().unwrap().pop_front().unwrap_or_default()
    }
}

/// Notifier that forwards every invocation to a channel.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Invocation>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Invocation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ManagementNotifier for ChannelNotifier {
    async fn notify(&self, invocation: &Invocation) -> calendar_chat::Result<()> {
        let _ = self.tx.send(invocation.clone());
        Ok(())
    }
}
