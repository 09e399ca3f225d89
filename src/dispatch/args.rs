//! Argument coercion for model-produced invocations.
//!
//! The model's argument maps are loosely typed. Every accessor here is total:
//! absent or malformed values fall back to a documented default instead of
//! failing, except `event_id` which the caller must check.

use crate::clock::format_local;
use crate::messages;
use crate::prompt::{COST_MAX, COST_MIN};
use crate::types::event::{EventCategory, EventId, EventRequest, EventStatus};
use crate::types::tool::Invocation;
use chrono::{NaiveDate, NaiveDateTime};

pub const DEFAULT_DURATION_MINUTES: u32 = 60;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trimmed text, `None` when absent or blank.
pub fn text(inv: &Invocation, key: &str) -> Option<String> {
    inv.get(key)
        .and_then(|v| v.as_text())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn title(inv: &Invocation) -> String {
    text(inv, "title").unwrap_or_else(|| messages::UNTITLED.to_string())
}

/// Passed through verbatim; the calendar service owns date-time validation.
pub fn start_time(inv: &Invocation, now: NaiveDateTime) -> String {
    text(inv, "start_time").unwrap_or_else(|| format_local(now))
}

pub fn duration(inv: &Invocation) -> u32 {
    inv.get("duration")
        .and_then(|v| v.as_i64())
        .filter(|d| *d > 0)
        .and_then(|d| u32::try_from(d).ok())
        .unwrap_or(DEFAULT_DURATION_MINUTES)
}

pub fn category(inv: &Invocation) -> EventCategory {
    text(inv, "category")
        .and_then(|c| c.parse().ok())
        .unwrap_or_default()
}

pub fn cost(inv: &Invocation) -> Option<u32> {
    inv.get("cost")
        .and_then(|v| v.as_i64())
        .map(|c| c.clamp(COST_MIN as i64, COST_MAX as i64) as u32)
}

pub fn status(inv: &Invocation) -> Option<EventStatus> {
    text(inv, "status").and_then(|s| s.parse().ok())
}

pub fn event_id(inv: &Invocation) -> Option<EventId> {
    inv.get("event_id").and_then(|v| v.as_i64())
}

/// `YYYY-MM-DD`, or the date part of a date-time; today otherwise.
pub fn date(inv: &Invocation, now: NaiveDateTime) -> NaiveDate {
    text(inv, "date")
        .and_then(|raw| {
            let head = raw.split(['T', ' ']).next().unwrap_or(raw.as_str()).to_string();
            NaiveDate::parse_from_str(&head, DATE_FORMAT).ok()
        })
        .unwrap_or_else(|| now.date())
}

/// Payload for create (`with_status = false`) or update.
pub fn event_request(inv: &Invocation, now: NaiveDateTime, with_status: bool) -> EventRequest {
    EventRequest {
        title: title(inv),
        description: text(inv, "description"),
        location: text(inv, "location"),
        start_time: start_time(inv, now),
        duration: duration(inv),
        category: category(inv),
        cost: cost(inv),
        status: if with_status { status(inv) } else { None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 3)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    fn inv(args: serde_json::Value) -> Invocation {
        Invocation::from_call("create_calendar_event", args.as_object().cloned())
    }

    #[test]
    fn empty_arguments_use_every_default() {
        let req = event_request(&inv(json!({})), now(), true);
        assert_eq!(req.title, "제목 없음");
        assert_eq!(req.start_time, "2025-08-03T09:30:00");
        assert_eq!(req.duration, 60);
        assert_eq!(req.category, EventCategory::Work);
        assert_eq!(req.cost, None);
        assert_eq!(req.status, None);
        assert_eq!(req.description, None);
    }

    #[test]
    fn blank_title_is_untitled() {
        assert_eq!(title(&inv(json!({"title": "   "}))), "제목 없음");
        assert_eq!(title(&inv(json!({"title": 12}))), "12");
    }

    #[test]
    fn duration_must_be_a_positive_integer() {
        assert_eq!(duration(&inv(json!({"duration": 90}))), 90);
        assert_eq!(duration(&inv(json!({"duration": "45"}))), 45);
        assert_eq!(duration(&inv(json!({"duration": 0}))), 60);
        assert_eq!(duration(&inv(json!({"duration": -5}))), 60);
        assert_eq!(duration(&inv(json!({"duration": 30.5}))), 60);
        assert_eq!(duration(&inv(json!({"duration": "an hour"}))), 60);
    }

    #[test]
    fn category_is_case_insensitive_with_work_fallback() {
        assert_eq!(category(&inv(json!({"category": "study"}))), EventCategory::Study);
        assert_eq!(category(&inv(json!({"category": "MEETING"}))), EventCategory::Work);
    }

    #[test]
    fn cost_is_clamped() {
        assert_eq!(cost(&inv(json!({"cost": 0}))), Some(1));
        assert_eq!(cost(&inv(json!({"cost": 250}))), Some(100));
        assert_eq!(cost(&inv(json!({"cost": "30"}))), Some(30));
        assert_eq!(cost(&inv(json!({"cost": "lots"}))), None);
    }

    #[test]
    fn status_only_on_update() {
        let args = json!({"status": "completed"});
        assert_eq!(status(&inv(args.clone())), Some(EventStatus::Completed));
        assert_eq!(event_request(&inv(args), now(), false).status, None);
        assert_eq!(status(&inv(json!({"status": "done"}))), None);
    }

    #[test]
    fn event_id_accepts_integer_strings() {
        assert_eq!(event_id(&inv(json!({"event_id": 7}))), Some(7));
        assert_eq!(event_id(&inv(json!({"event_id": "7"}))), Some(7));
        assert_eq!(event_id(&inv(json!({"event_id": "seven"}))), None);
        assert_eq!(event_id(&inv(json!({}))), None);
    }

    #[test]
    fn date_accepts_dates_and_date_times() {
        let expected = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        assert_eq!(date(&inv(json!({"date": "2025-08-04"})), now()), expected);
        assert_eq!(date(&inv(json!({"date": "2025-08-04T10:00:00"})), now()), expected);
        assert_eq!(date(&inv(json!({"date": "내일"})), now()), now().date());
        assert_eq!(date(&inv(json!({})), now()), now().date());
    }
}
