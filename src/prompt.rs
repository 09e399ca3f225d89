//! Contextual prompt sent alongside the function catalog.
//!
//! The instruction text is advisory to the model; argument shapes are
//! enforced later by the dispatcher.

use crate::catalog::{CREATE_EVENT, DELETE_EVENT, GET_ALL_EVENTS, GET_EVENTS_BY_DATE, UPDATE_EVENT};
use crate::clock::format_local;
use crate::types::event::{EventCategory, UserId};
use chrono::NaiveDateTime;

pub const COST_MIN: u32 = 1;
pub const COST_MAX: u32 = 100;

/// Compose the prompt for one exchange. Pure function of its inputs.
pub fn build(message: &str, caller_id: UserId, now: NaiveDateTime) -> String {
    let categories = EventCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "현재 시간: {now}\n\
         사용자 ID: {caller_id}\n\
         \n\
         사용자 요청: {message}\n\
         \n\
         다음 상황에 맞게 적절한 함수를 호출하거나 응답해 주세요:\n\
         1. 일정 생성 요청 시 -> {CREATE_EVENT} 함수 호출\n\
         2. 일정 조회 요청 시 -> {GET_ALL_EVENTS} 또는 {GET_EVENTS_BY_DATE} 함수 호출\n\
         3. 일정 수정 요청 시 -> {UPDATE_EVENT} 함수 호출\n\
         4. 일정 삭제 요청 시 -> {DELETE_EVENT} 함수 호출\n\
         5. 일반 대화 시 -> 친근하고 도움이 되는 응답\n\
         \n\
         주의사항:\n\
         - 시간은 시간대 없는 ISO 형식(YYYY-MM-DDTHH:mm:ss)을 사용하세요\n\
         - 카테고리는 {categories} 중 하나를 사용하세요\n\
         - 스태미나 소모량(cost)은 {COST_MIN}-{COST_MAX} 사이의 값을 사용하세요",
        now = format_local(now),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 3)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    #[test]
    fn embeds_time_caller_and_message_verbatim() {
        let prompt = build("내일 오전 10시에 팀 미팅", 42, at());
        assert!(prompt.starts_with("현재 시간: 2025-08-03T09:30:00\n"));
        assert!(prompt.contains("사용자 ID: 42\n"));
        assert!(prompt.contains("사용자 요청: 내일 오전 10시에 팀 미팅\n"));
    }

    #[test]
    fn lists_every_catalog_operation() {
        let prompt = build("hi", 1, at());
        for name in crate::catalog::FunctionCatalog::calendar().names() {
            assert!(prompt.contains(name), "missing {name}");
        }
        assert!(prompt.contains("5. 일반 대화 시"));
    }

    #[test]
    fn carries_formatting_constraints() {
        let prompt = build("hi", 1, at());
        assert!(prompt.contains("YYYY-MM-DDTHH:mm:ss"));
        assert!(prompt.contains("STUDY, WORK, REST, ACTIVITY"));
        assert!(prompt.contains("1-100"));
    }

    #[test]
    fn message_is_not_trimmed_or_escaped() {
        let raw = "  {braces} and\nnewline ";
        assert!(build(raw, 7, at()).contains(raw));
    }
}
