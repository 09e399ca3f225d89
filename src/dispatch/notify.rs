use crate::config::HttpConfig;
use crate::transport::HttpTransport;
use crate::types::tool::Invocation;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Receives successful calendar mutations after the reply has been assembled.
#[async_trait]
pub trait ManagementNotifier: Send + Sync {
    async fn notify(&self, invocation: &Invocation) -> Result<()>;
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl ManagementNotifier for NoopNotifier {
    async fn notify(&self, _invocation: &Invocation) -> Result<()> {
        Ok(())
    }
}

/// MCP `tools/call` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub method: String,
    pub params: McpToolInvocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolInvocation {
    pub name: String,
    pub arguments: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<McpError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i64,
    pub message: String,
}

impl McpRequest {
    pub fn tools_call(invocation: &Invocation) -> Self {
        Self {
            method: "tools/call".to_string(),
            params: McpToolInvocation {
                name: invocation.name.clone(),
                arguments: invocation.arguments_json(),
            },
        }
    }
}

/// Forwards invocations to the management server's MCP endpoint.
#[derive(Debug, Clone)]
pub struct McpNotifier {
    transport: HttpTransport,
}

impl McpNotifier {
    pub fn new(server_url: &str, http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(server_url, http)?,
        })
    }
}

#[async_trait]
impl ManagementNotifier for McpNotifier {
    async fn notify(&self, invocation: &Invocation) -> Result<()> {
        let request = McpRequest::tools_call(invocation);
        let response: McpResponse = self
            .transport
            .request_json(Method::POST, "/mcp", Some(&request))
            .await?;
        match response.error {
            Some(err) => Err(Error::Remote {
                status: 502,
                class: "mcp_error".to_string(),
                message: format!("{} (code {})", err.message, err.code),
                retryable: false,
            }),
            None => {
                tracing::debug!(function = invocation.name.as_str(), "management server notified");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tools_call_wire_shape() {
        let inv = Invocation::new("delete_calendar_event").with_arg("event_id", json!(4));
        let body = serde_json::to_value(McpRequest::tools_call(&inv)).unwrap();
        assert_eq!(
            body,
            json!({
                "method": "tools/call",
                "params": {"name": "delete_calendar_event", "arguments": {"event_id": 4}}
            })
        );
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let resp: McpResponse = serde_json::from_value(json!({"jsonrpc": "2.0"})).unwrap();
        assert!(resp.result.is_none() && resp.error.is_none());
    }
}
