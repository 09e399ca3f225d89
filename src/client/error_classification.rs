//! Error classification logic

use super::wire::{CompletionResult, ErrorInfo};
use crate::error_code::StandardErrorCode;
use crate::Error;

/// Turn an upstream failure body into an [`Error::Remote`].
///
/// The structured `error` object wins over the bare HTTP status when present,
/// so a 400 carrying `RESOURCE_EXHAUSTED` is still classified as rate limited.
pub(crate) fn remote_from_body(status: u16, body: &str) -> Error {
    let parsed = serde_json::from_str::<CompletionResult>(body)
        .ok()
        .and_then(|r| r.error);
    match parsed {
        Some(info) => {
            let code = StandardErrorCode::classify(status, &info.status);
            let message = if info.message.is_empty() {
                body.to_string()
            } else {
                info.message
            };
            Error::Remote {
                status: if code == StandardErrorCode::RateLimited { 429 } else { status },
                class: code.name().to_string(),
                message,
                retryable: code.retryable(),
            }
        }
        None => Error::remote(status, body),
    }
}

/// Collapse any client-side failure into the synthetic error shape callers see.
pub(crate) fn synthesize(err: &Error) -> ErrorInfo {
    match err {
        Error::Remote {
            status,
            class,
            message,
            ..
        } => {
            let code = StandardErrorCode::from_name(class)
                .unwrap_or_else(|| StandardErrorCode::from_http_status(*status));
            ErrorInfo {
                code: *status,
                message: message.clone(),
                status: code.status_tag().to_string(),
            }
        }
        Error::Transport(t) if t.is_timeout() => {
            ErrorInfo::from_code(StandardErrorCode::Timeout, err.to_string())
        }
        Error::Transport(_) => ErrorInfo::from_code(StandardErrorCode::Overloaded, err.to_string()),
        Error::Serialization(_) => {
            ErrorInfo::from_code(StandardErrorCode::ServerError, err.to_string())
        }
        _ => ErrorInfo::from_code(StandardErrorCode::Unknown, err.to_string()),
    }
}
