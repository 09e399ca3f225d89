//! Calendar event records exchanged with the calendar management service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type UserId = i64;
pub type EventId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventCategory {
    Study,
    Work,
    Rest,
    Activity,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [Self::Study, Self::Work, Self::Rest, Self::Activity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study => "STUDY",
            Self::Work => "WORK",
            Self::Rest => "REST",
            Self::Activity => "ACTIVITY",
        }
    }
}

impl Default for EventCategory {
    fn default() -> Self {
        Self::Work
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Planned,
    Completed,
    Canceled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [Self::Planned, Self::Completed, Self::Canceled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        Self::Planned
    }
}

/// Raised when text does not name an enum member.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value} (valid values: {valid})")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub valid: String,
}

macro_rules! case_insensitive_from_str {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                        valid: <$ty>::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

case_insensitive_from_str!(EventCategory, "category");
case_insensitive_from_str!(EventStatus, "status");

/// A calendar event as returned by the calendar management service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// ISO-8601 local date-time, no zone.
    pub start_time: String,
    /// Minutes.
    pub duration: u32,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub created_at: String,
}

impl CalendarEvent {
    /// Date part (`YYYY-MM-DD`) of the start time.
    pub fn start_date(&self) -> &str {
        self.start_time.split('T').next().unwrap_or(self.start_time.as_str())
    }
}

/// Create/update payload built by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_time: String,
    pub duration: u32,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("work".parse::<EventCategory>(), Ok(EventCategory::Work));
        assert_eq!(" Activity ".parse::<EventCategory>(), Ok(EventCategory::Activity));
        assert_eq!("canceled".parse::<EventStatus>(), Ok(EventStatus::Canceled));

        let err = "MEETING".parse::<EventCategory>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid category: MEETING (valid values: STUDY, WORK, REST, ACTIVITY)"
        );
    }

    #[test]
    fn event_uses_camel_case_on_the_wire() {
        let json = serde_json::json!({
            "id": 3,
            "title": "팀 미팅",
            "startTime": "2025-08-04T10:00:00",
            "duration": 60,
            "category": "WORK",
            "status": "PLANNED",
            "createdAt": "2025-08-03T09:00:00"
        });
        let event: CalendarEvent = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(event.start_date(), "2025-08-04");
        assert_eq!(event.cost, None);
        assert_eq!(serde_json::to_value(&event).unwrap(), json);
    }

    #[test]
    fn missing_status_defaults_to_planned() {
        let event: CalendarEvent = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "t",
            "startTime": "2025-08-04T10:00:00",
            "duration": 30,
            "category": "REST",
            "createdAt": "2025-08-03T09:00:00"
        }))
        .unwrap();
        assert_eq!(event.status, EventStatus::Planned);
    }
}
