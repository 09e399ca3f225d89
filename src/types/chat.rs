//! Caller-facing request and reply shapes.

use super::event::CalendarEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// Which operation an [`ActionRecord`] reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    CreateEvent,
    GetAllEvents,
    GetEventsByDate,
    UpdateEvent,
    DeleteEvent,
    Unknown,
}

impl ActionType {
    /// Mutations trigger the management notification.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::CreateEvent | Self::UpdateEvent | Self::DeleteEvent
        )
    }
}

/// Payload of an action: downstream data on success, a short message otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionResult {
    Event(CalendarEvent),
    Events(Vec<CalendarEvent>),
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub action_type: ActionType,
    pub result: ActionResult,
    pub success: bool,
}

impl ActionRecord {
    pub fn succeeded(action_type: ActionType, result: ActionResult) -> Self {
        Self {
            action_type,
            result,
            success: true,
        }
    }

    pub fn failed(action_type: ActionType, message: impl Into<String>) -> Self {
        Self {
            action_type,
            result: ActionResult::Message(message.into()),
            success: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message: String,
    pub session_id: String,
    pub action_performed: Option<ActionRecord>,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_serializes_with_null_action() {
        let reply = ChatReply {
            message: "안녕하세요".into(),
            session_id: "chat-1234abcd".into(),
            action_performed: None,
            timestamp: "2025-08-03T09:00:00".into(),
        };
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "message": "안녕하세요",
                "sessionId": "chat-1234abcd",
                "actionPerformed": null,
                "timestamp": "2025-08-03T09:00:00"
            })
        );
    }

    #[test]
    fn action_record_tags() {
        let record = ActionRecord::failed(ActionType::Unknown, "알 수 없는 기능입니다.");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"actionType": "UNKNOWN", "result": "알 수 없는 기능입니다.", "success": false})
        );
        assert_eq!(
            serde_json::to_value(ActionType::GetEventsByDate).unwrap(),
            json!("GET_EVENTS_BY_DATE")
        );
    }

    #[test]
    fn request_accepts_missing_session() {
        let req: ChatRequest = serde_json::from_value(json!({"message": "hi"})).unwrap();
        assert_eq!(req, ChatRequest::new("hi"));
    }
}
