use super::core::GeminiClient;
use super::retry::RetryPolicy;
use crate::config::{AssistantConfig, HttpConfig};
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Builder for creating completion clients with custom configuration.
///
/// Keep this surface area small and predictable.
pub struct CompletionClientBuilder {
    api_key: Option<String>,
    model: String,
    base_url: String,
    http: HttpConfig,
    retry: RetryPolicy,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
}

impl CompletionClientBuilder {
    pub fn new() -> Self {
        Self::from_config(&AssistantConfig::default())
    }

    /// Seed every setting from a loaded configuration.
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            api_key: config.completion.api_key.clone(),
            model: config.completion.model.clone(),
            base_url: config.completion.base_url.clone(),
            http: config.http.clone(),
            retry: RetryPolicy::from(&config.retry),
            base_url_override: None,
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Override the configured base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<GeminiClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "missing API key",
                    ErrorContext::new()
                        .with_field_path("completion.api_key")
                        .with_details("set GEMINI_API_KEY")
                        .with_source("completion_client_builder"),
                )
            })?;
        if self.model.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "model must not be empty",
                ErrorContext::new()
                    .with_field_path("completion.model")
                    .with_source("completion_client_builder"),
            ));
        }

        let base_url = self.base_url_override.unwrap_or(self.base_url);
        let transport = HttpTransport::new(&base_url, &self.http)?.with_header(API_KEY_HEADER, api_key);
        tracing::debug!(
            base_url = transport.base_url(),
            model = self.model.as_str(),
            max_retries = self.retry.max_retries,
            "completion client ready"
        );
        Ok(GeminiClient::new(transport, self.model, self.retry))
    }
}

impl Default for CompletionClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = CompletionClientBuilder::new().build().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("completion.api_key")
        );
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(CompletionClientBuilder::new().api_key("  ").build().is_err());
    }

    #[test]
    fn override_replaces_configured_base_url() {
        let client = CompletionClientBuilder::new()
            .api_key("k")
            .model("gemini-test")
            .retry_policy(RetryPolicy::none())
            .base_url_override("http://127.0.0.1:9/")
            .build()
            .unwrap();
        assert_eq!(client.model(), "gemini-test");
        assert_eq!(client.retry_policy().max_retries, 0);
    }
}
