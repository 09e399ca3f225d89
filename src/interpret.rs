//! 응답 해석: 완성 결과를 오류, 함수 호출, 일반 텍스트 중 하나로 분류합니다.
//!
//! Response interpreter.
//!
//! Rules, first match wins:
//!
//! 1. A structured error becomes [`Parsed::Error`] carrying it.
//! 2. No candidates, or a first candidate without parts, is [`InterpretError::NoResponse`].
//! 3. The first function-call part of the first candidate becomes
//!    [`Parsed::Invocation`]; non-empty text parts ride along joined by a space.
//! 4. Anything else is [`Parsed::PlainText`], with a fixed apology when the
//!    joined text is empty.

use crate::client::wire::{CompletionResult, Part};
use crate::error_code::StandardErrorCode;
use crate::messages;
use crate::types::tool::Invocation;

#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Error(InterpretError),
    Invocation {
        invocation: Invocation,
        accompanying_text: String,
    },
    PlainText(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpretError {
    #[error("{message}")]
    Upstream {
        code: u16,
        status: String,
        message: String,
    },
    #[error("{}", messages::NO_RESPONSE)]
    NoResponse,
}

impl InterpretError {
    pub fn classify(&self) -> Option<StandardErrorCode> {
        match self {
            InterpretError::Upstream { code, status, .. } => {
                Some(StandardErrorCode::classify(*code, status))
            }
            InterpretError::NoResponse => None,
        }
    }
}

pub fn interpret(result: &CompletionResult) -> Parsed {
    if let Some(error) = &result.error {
        return Parsed::Error(InterpretError::Upstream {
            code: error.code,
            status: error.status.clone(),
            message: error.message.clone(),
        });
    }

    let parts = match first_parts(result) {
        Some(parts) if !parts.is_empty() => parts,
        _ => return Parsed::Error(InterpretError::NoResponse),
    };

    let text = joined_text(parts);
    if let Some(call) = parts.iter().find_map(|p| p.function_call.as_ref()) {
        return Parsed::Invocation {
            invocation: Invocation::from_call(call.name.clone(), call.args.clone()),
            accompanying_text: text,
        };
    }

    if text.is_empty() {
        Parsed::PlainText(messages::EMPTY_TEXT_FALLBACK.to_string())
    } else {
        Parsed::PlainText(text)
    }
}

fn first_parts(result: &CompletionResult) -> Option<&[Part]> {
    result
        .candidates
        .as_ref()?
        .first()?
        .content
        .as_ref()
        .map(|c| c.parts.as_slice())
}

fn joined_text(parts: &[Part]) -> String {
    parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::wire::{Candidate, Content, ErrorInfo};
    use serde_json::json;

    #[test]
    fn structured_error_wins_over_candidates() {
        let mut result = CompletionResult::from_parts(vec![Part::text("hi")]);
        result.error = Some(ErrorInfo {
            code: 500,
            message: "boom".into(),
            status: "INTERNAL".into(),
        });
        match interpret(&result) {
            Parsed::Error(e) => {
                assert_eq!(e.to_string(), "boom");
                assert_eq!(e.classify(), Some(StandardErrorCode::ServerError));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_or_empty_candidates_is_no_response() {
        assert_eq!(
            interpret(&CompletionResult::default()),
            Parsed::Error(InterpretError::NoResponse)
        );
        let empty = CompletionResult {
            candidates: Some(vec![]),
            error: None,
        };
        assert_eq!(interpret(&empty), Parsed::Error(InterpretError::NoResponse));
        let no_parts = CompletionResult {
            candidates: Some(vec![Candidate {
                content: Some(Content::default()),
                finish_reason: Some("SAFETY".into()),
            }]),
            error: None,
        };
        assert_eq!(interpret(&no_parts), Parsed::Error(InterpretError::NoResponse));
        assert_eq!(InterpretError::NoResponse.to_string(), messages::NO_RESPONSE);
    }

    #[test]
    fn function_call_takes_precedence_over_text() {
        let result = CompletionResult::from_parts(vec![
            Part::text("네,"),
            Part::text("  "),
            Part::function_call("get_events_by_date", json!({"date": "2025-08-04"})),
            Part::text("조회할게요"),
            Part::function_call("get_all_events", json!({})),
        ]);
        match interpret(&result) {
            Parsed::Invocation {
                invocation,
                accompanying_text,
            } => {
                assert_eq!(invocation.name, "get_events_by_date");
                assert_eq!(
                    invocation.get("date").and_then(|v| v.as_text()).as_deref(),
                    Some("2025-08-04")
                );
                assert_eq!(accompanying_text, "네, 조회할게요");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn invocation_without_text_has_empty_accompaniment() {
        let result = CompletionResult::from_parts(vec![Part::function_call("get_all_events", json!(null))]);
        match interpret(&result) {
            Parsed::Invocation {
                invocation,
                accompanying_text,
            } => {
                assert!(invocation.arguments.is_empty());
                assert!(accompanying_text.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn text_parts_are_joined_with_a_space() {
        let result = CompletionResult::from_parts(vec![Part::text("안녕하세요!"), Part::text("무엇을 도와드릴까요?")]);
        assert_eq!(
            interpret(&result),
            Parsed::PlainText("안녕하세요! 무엇을 도와드릴까요?".into())
        );
    }

    #[test]
    fn blank_text_falls_back_to_apology() {
        let result = CompletionResult::from_parts(vec![Part::text(""), Part::default()]);
        assert_eq!(
            interpret(&result),
            Parsed::PlainText(messages::EMPTY_TEXT_FALLBACK.into())
        );
    }

    #[test]
    fn only_first_candidate_is_considered() {
        let mut result = CompletionResult::from_parts(vec![Part::text("first")]);
        if let Some(candidates) = result.candidates.as_mut() {
            candidates.push(Candidate {
                content: Some(Content {
                    role: None,
                    parts: vec![Part::function_call("get_all_events", json!({}))],
                }),
                finish_reason: None,
            });
        }
        assert_eq!(interpret(&result), Parsed::PlainText("first".into()));
    }
}
