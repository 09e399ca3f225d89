//! 설정 로딩: YAML 파일과 환경 변수에서 어시스턴트 설정을 구성합니다.
//!
//! Configuration for the assistant backend.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Built-in defaults ([`AssistantConfig::default`])
//! 2. An optional YAML file ([`AssistantConfig::from_yaml_file`])
//! 3. Environment variables ([`AssistantConfig::apply_env`])
//!
//! | Variable                  | Field                          |
//! |---------------------------|--------------------------------|
//! | `GEMINI_API_KEY`          | `completion.api_key`           |
//! | `GEMINI_BASE_URL`         | `completion.base_url`          |
//! | `GEMINI_MODEL`            | `completion.model`             |
//! | `CHAT_MAX_RETRIES`        | `retry.max_retries`            |
//! | `CHAT_RETRY_MIN_DELAY_MS` | `retry.min_delay_ms`           |
//! | `CHAT_HTTP_TIMEOUT_SECS`  | `http.timeout_secs`            |
//! | `CHAT_PROXY_URL`          | `http.proxy_url`               |
//! | `CALENDAR_API_URL`        | `calendar.base_url`            |
//! | `MCP_SERVER_URL`          | `management.url`               |

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub completion: CompletionConfig,
    pub retry: RetryConfig,
    pub http: HttpConfig,
    pub calendar: CalendarConfig,
    pub management: ManagementConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
        }
    }
}

/// Backoff envelope for the rate-limit retry loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            min_delay_ms: 2_000,
            max_delay_ms: 8_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout_secs: u64,
    pub proxy_url: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            pool_max_idle_per_host: 32,
            pool_idle_timeout_secs: 90,
            proxy_url: None,
        }
    }
}

/// Calendar management service. Without a base URL the in-memory calendar is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub base_url: Option<String>,
}

/// Secondary endpoint notified after successful mutations. Disabled when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagementConfig {
    pub url: Option<String>,
}

impl AssistantConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Defaults (or the given file), then the process environment, then validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_yaml_file(p)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Overlay values found through `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("GEMINI_API_KEY") {
            self.completion.api_key = Some(v);
        }
        if let Some(v) = non_empty("GEMINI_BASE_URL") {
            self.completion.base_url = v;
        }
        if let Some(v) = non_empty("GEMINI_MODEL") {
            self.completion.model = v;
        }
        if let Some(v) = non_empty("CHAT_MAX_RETRIES").and_then(|s| s.parse().ok()) {
            self.retry.max_retries = v;
        }
        if let Some(v) = non_empty("CHAT_RETRY_MIN_DELAY_MS").and_then(|s| s.parse().ok()) {
            self.retry.min_delay_ms = v;
        }
        if let Some(v) = non_empty("CHAT_HTTP_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.http.timeout_secs = v;
        }
        if let Some(v) = non_empty("CHAT_PROXY_URL") {
            self.http.proxy_url = Some(v);
        }
        if let Some(v) = non_empty("CALENDAR_API_URL") {
            self.calendar.base_url = Some(v);
        }
        if let Some(v) = non_empty("MCP_SERVER_URL") {
            self.management.url = Some(v);
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_url("completion.base_url", &self.completion.base_url)?;
        if let Some(url) = &self.calendar.base_url {
            check_url("calendar.base_url", url)?;
        }
        if let Some(url) = &self.management.url {
            check_url("management.url", url)?;
        }
        if self.completion.model.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "model name must not be empty",
                ErrorContext::new()
                    .with_field_path("completion.model")
                    .with_source("config_loader"),
            ));
        }
        if self.retry.max_delay_ms < self.retry.min_delay_ms {
            return Err(Error::configuration_with_context(
                "max_delay_ms must be at least min_delay_ms",
                ErrorContext::new()
                    .with_field_path("retry.max_delay_ms")
                    .with_details(format!(
                        "min={} max={}",
                        self.retry.min_delay_ms, self.retry.max_delay_ms
                    ))
                    .with_source("config_loader"),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "timeout must be positive",
                ErrorContext::new()
                    .with_field_path("http.timeout_secs")
                    .with_source("config_loader"),
            ));
        }
        Ok(())
    }
}

fn check_url(field: &str, value: &str) -> Result<()> {
    match url::Url::parse(value) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Ok(()),
        Ok(u) => Err(Error::configuration_with_context(
            "unsupported url scheme",
            ErrorContext::new()
                .with_field_path(field)
                .with_details(u.scheme().to_string())
                .with_source("config_loader"),
        )),
        Err(e) => Err(Error::configuration_with_context(
            "invalid url",
            ErrorContext::new()
                .with_field_path(field)
                .with_details(e.to_string())
                .with_source("config_loader"),
        )),
    }
}
