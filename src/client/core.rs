use super::error_classification::{remote_from_body, synthesize};
use super::retry::RetryPolicy;
use super::wire::{CompletionResult, GenerateRequest};
use super::CompletionService;
use crate::catalog::FunctionCatalog;
use crate::transport::HttpTransport;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, warn};

/// Completion client for the Gemini `generateContent` endpoint.
///
/// One HTTP call per attempt. Rate-limited attempts are retried with
/// exponential backoff; everything else is returned as-is or folded into a
/// synthetic error result. [`CompletionService::complete`] never fails.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    transport: HttpTransport,
    model: String,
    policy: RetryPolicy,
}

impl GeminiClient {
    pub(crate) fn new(transport: HttpTransport, model: String, policy: RetryPolicy) -> Self {
        Self {
            transport,
            model,
            policy,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn path(&self) -> String {
        format!("/v1beta/models/{}:generateContent", self.model)
    }

    async fn attempt(&self, body: &GenerateRequest<'_>) -> Result<CompletionResult> {
        let response = self
            .transport
            .send(Method::POST, &self.path(), Some(body))
            .await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.into()))?;

        if !status.is_success() {
            return Err(remote_from_body(status.as_u16(), &text));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, prompt: &str, catalog: &FunctionCatalog) -> CompletionResult {
        let body = GenerateRequest::new(prompt, catalog.to_tools());
        let mut attempt = 0u32;

        loop {
            let outcome = self.attempt(&body).await;
            let rate_limited = match &outcome {
                Ok(result) => result.is_rate_limited(),
                Err(e) => e.is_rate_limited(),
            };

            if rate_limited {
                match self.policy.delay_for(attempt) {
                    Some(delay) => {
                        attempt += 1;
                        warn!(
                            attempt,
                            max_retries = self.policy.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "completion rate limited, backing off"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    None => {
                        warn!(attempts = attempt + 1, "completion rate limit retries exhausted");
                        return CompletionResult::rate_limited();
                    }
                }
            }

            return match outcome {
                Ok(result) => {
                    debug!(
                        model = self.model.as_str(),
                        attempts = attempt + 1,
                        has_error = result.error.is_some(),
                        "completion received"
                    );
                    result
                }
                Err(e) => {
                    warn!(model = self.model.as_str(), error = %e, "completion failed");
                    CompletionResult::failed(synthesize(&e))
                }
            };
        }
    }
}
