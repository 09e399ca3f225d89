//! 업스트림 오류 분류: HTTP 상태와 상태 태그를 표준 오류 코드로 매핑합니다.
//!
//! Classification of completion-endpoint failures.
//!
//! The completion client never propagates a fault; it folds every failure
//! into a structured `{code, message, status}` object. This module is the
//! single place that decides which numeric code and status tag a failure gets,
//! and whether it is worth another attempt.
//!
//! | Code                | HTTP | Status tag           | Retried |
//! |---------------------|------|----------------------|---------|
//! | `InvalidRequest`    | 400  | `INVALID_ARGUMENT`   | no      |
//! | `Authentication`    | 401  | `UNAUTHENTICATED`    | no      |
//! | `PermissionDenied`  | 403  | `PERMISSION_DENIED`  | no      |
//! | `NotFound`          | 404  | `NOT_FOUND`          | no      |
//! | `RateLimited`       | 429  | `RESOURCE_EXHAUSTED` | yes     |
//! | `ServerError`       | 500  | `INTERNAL`           | no      |
//! | `Overloaded`        | 503  | `UNAVAILABLE`        | no      |
//! | `Timeout`           | 504  | `DEADLINE_EXCEEDED`  | no      |
//! | `Unknown`           | 500  | `UNKNOWN`            | no      |
//!
//! ## Example
//!
//! ```rust
//! use calendar_chat::error_code::StandardErrorCode;
//!
//! let code = StandardErrorCode::from_http_status(429);
//! assert_eq!(code.status_tag(), "RESOURCE_EXHAUSTED");
//! assert!(code.retryable());
//! ```

use std::fmt;

/// Standard classification of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardErrorCode {
    /// Malformed request or invalid parameters
    InvalidRequest,
    /// Invalid, expired, or missing API key
    Authentication,
    /// Valid credentials but insufficient permissions
    PermissionDenied,
    /// Requested model or endpoint does not exist
    NotFound,
    /// Request rate limit exceeded
    RateLimited,
    /// Internal server error on provider side
    ServerError,
    /// Provider unreachable or temporarily overloaded
    Overloaded,
    /// Request timed out before a response was received
    Timeout,
    /// Error could not be classified
    Unknown,
}

impl StandardErrorCode {
    /// Returns the snake_case name (e.g., `"rate_limited"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::Overloaded => "overloaded",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }

    /// Numeric code placed in a synthetic error object.
    #[inline]
    pub fn http_code(&self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::Authentication => 401,
            Self::PermissionDenied => 403,
            Self::NotFound => 404,
            Self::RateLimited => 429,
            Self::ServerError | Self::Unknown => 500,
            Self::Overloaded => 503,
            Self::Timeout => 504,
        }
    }

    /// Status tag in the completion endpoint's vocabulary.
    #[inline]
    pub fn status_tag(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_ARGUMENT",
            Self::Authentication => "UNAUTHENTICATED",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::NotFound => "NOT_FOUND",
            Self::RateLimited => "RESOURCE_EXHAUSTED",
            Self::ServerError => "INTERNAL",
            Self::Overloaded => "UNAVAILABLE",
            Self::Timeout => "DEADLINE_EXCEEDED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Only the rate-limit signal is retried; everything else degrades at once.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// Credential problems get their own caller-facing message.
    #[inline]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication | Self::PermissionDenied)
    }

    /// Maps an HTTP status code to the most likely `StandardErrorCode`.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 413 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            429 => Self::RateLimited,
            500 => Self::ServerError,
            502 | 503 => Self::Overloaded,
            _ => Self::Unknown,
        }
    }

    /// Maps a status tag reported inside an error body.
    pub fn from_status_tag(tag: &str) -> Option<Self> {
        let code = match tag {
            "INVALID_ARGUMENT" | "FAILED_PRECONDITION" => Self::InvalidRequest,
            "UNAUTHENTICATED" => Self::Authentication,
            "PERMISSION_DENIED" => Self::PermissionDenied,
            "NOT_FOUND" => Self::NotFound,
            "RESOURCE_EXHAUSTED" => Self::RateLimited,
            "INTERNAL" => Self::ServerError,
            "UNAVAILABLE" => Self::Overloaded,
            "DEADLINE_EXCEEDED" => Self::Timeout,
            _ => return None,
        };
        Some(code)
    }

    /// Inverse of [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        let code = match name {
            "invalid_request" => Self::InvalidRequest,
            "authentication" => Self::Authentication,
            "permission_denied" => Self::PermissionDenied,
            "not_found" => Self::NotFound,
            "rate_limited" => Self::RateLimited,
            "server_error" => Self::ServerError,
            "overloaded" => Self::Overloaded,
            "timeout" => Self::Timeout,
            "unknown" => Self::Unknown,
            _ => return None,
        };
        Some(code)
    }

    /// Classify a structured error object, preferring the status tag over the code.
    pub fn classify(code: u16, status: &str) -> Self {
        Self::from_status_tag(status).unwrap_or_else(|| Self::from_http_status(code))
    }
}

impl fmt::Display for StandardErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rate_limit_is_retryable() {
        let all = [
            StandardErrorCode::InvalidRequest,
            StandardErrorCode::Authentication,
            StandardErrorCode::PermissionDenied,
            StandardErrorCode::NotFound,
            StandardErrorCode::RateLimited,
            StandardErrorCode::ServerError,
            StandardErrorCode::Overloaded,
            StandardErrorCode::Timeout,
            StandardErrorCode::Unknown,
        ];
        let retryable: Vec<_> = all.iter().filter(|c| c.retryable()).collect();
        assert_eq!(retryable, vec![&StandardErrorCode::RateLimited]);
    }

    #[test]
    fn http_status_round_trips_through_code() {
        for status in [400u16, 401, 403, 404, 429, 500, 503, 504] {
            assert_eq!(StandardErrorCode::from_http_status(status).http_code(), status);
        }
        assert_eq!(
            StandardErrorCode::from_http_status(418),
            StandardErrorCode::Unknown
        );
    }

    #[test]
    fn status_tag_wins_over_code() {
        assert_eq!(
            StandardErrorCode::classify(400, "RESOURCE_EXHAUSTED"),
            StandardErrorCode::RateLimited
        );
        assert_eq!(
            StandardErrorCode::classify(401, "SOMETHING_NEW"),
            StandardErrorCode::Authentication
        );
        assert!(StandardErrorCode::classify(403, "").is_auth_failure());
    }

    #[test]
    fn name_round_trips() {
        for code in [
            StandardErrorCode::Authentication,
            StandardErrorCode::RateLimited,
            StandardErrorCode::Unknown,
        ] {
            assert_eq!(StandardErrorCode::from_name(code.name()), Some(code));
        }
        assert_eq!(StandardErrorCode::from_name("mcp_error"), None);
    }

    #[test]
    fn display_uses_status_tag() {
        assert_eq!(StandardErrorCode::Timeout.to_string(), "DEADLINE_EXCEEDED");
    }
}
