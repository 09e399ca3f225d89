//! Gemini `generateContent` request/response bodies.
//!
//! - Request: `contents[].parts[]` plus `tools[].function_declarations[]`.
//! - Response: `candidates[].content.parts[]`, each part either `text` or
//!   `functionCall { name, args }`; failures come back as `error { code,
//!   message, status }`.
//!
//! Unknown fields are ignored and every field is optional so that partial
//! bodies still deserialize; deciding what a partial body means is the
//! interpreter's job.

use crate::error_code::StandardErrorCode;
use crate::messages;
use crate::types::tool::Tool;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool<'a>>,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(prompt: &str, tools: Vec<Tool<'a>>) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part::text(prompt)],
            }],
            tools,
        }
    }
}

/// Outcome of a completion call: candidates, a structured error, or neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl CompletionResult {
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            candidates: Some(vec![Candidate {
                content: Some(Content {
                    role: Some("model".into()),
                    parts,
                }),
                finish_reason: Some("STOP".into()),
            }]),
            error: None,
        }
    }

    pub fn failed(error: ErrorInfo) -> Self {
        Self {
            candidates: None,
            error: Some(error),
        }
    }

    /// Synthetic result returned once rate-limit retries are exhausted.
    pub fn rate_limited() -> Self {
        Self::failed(ErrorInfo::from_code(
            StandardErrorCode::RateLimited,
            messages::RATE_LIMITED,
        ))
    }

    pub fn is_rate_limited(&self) -> bool {
        self.error.as_ref().map_or(false, ErrorInfo::is_rate_limited)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(
        default,
        rename = "finishReason",
        skip_serializing_if = "Option::is_none"
    )]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        rename = "functionCall",
        skip_serializing_if = "Option::is_none"
    )]
    pub function_call: Option<FunctionCall>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            function_call: None,
        }
    }

    pub fn function_call(name: impl Into<String>, args: Value) -> Self {
        Self {
            text: None,
            function_call: Some(FunctionCall {
                name: name.into(),
                args: match args {
                    Value::Object(map) => Some(map),
                    _ => None,
                },
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

impl ErrorInfo {
    pub fn from_code(code: StandardErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.http_code(),
            message: message.into(),
            status: code.status_tag().to_string(),
        }
    }

    pub fn classify(&self) -> StandardErrorCode {
        StandardErrorCode::classify(self.code, &self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.classify() == StandardErrorCode::RateLimited
    }
}
