//! 함수 카탈로그: 모델에 노출되는 다섯 가지 캘린더 함수 선언.
//!
//! Static registry of the operations the model may call.
//!
//! The catalog is built once per process and never mutated. Besides the wire
//! declarations it keeps a compiled JSON Schema per function so argument maps
//! can be checked before dispatch; those checks are advisory and only feed
//! the logs.

use crate::types::chat::ActionType;
use crate::types::tool::{FunctionDeclaration, FunctionParameters, ParamType, Tool};
use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

pub const CREATE_EVENT: &str = "create_calendar_event";
pub const GET_ALL_EVENTS: &str = "get_all_events";
pub const GET_EVENTS_BY_DATE: &str = "get_events_by_date";
pub const UPDATE_EVENT: &str = "update_calendar_event";
pub const DELETE_EVENT: &str = "delete_calendar_event";

static CALENDAR: Lazy<FunctionCatalog> = Lazy::new(|| FunctionCatalog::new(calendar_declarations()));

pub struct FunctionCatalog {
    declarations: Vec<FunctionDeclaration>,
    validators: HashMap<String, JSONSchema>,
}

impl std::fmt::Debug for FunctionCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionCatalog")
            .field("names", &self.names())
            .finish()
    }
}

impl FunctionCatalog {
    fn new(declarations: Vec<FunctionDeclaration>) -> Self {
        let validators = declarations
            .iter()
            .filter_map(|d| {
                let schema = d.json_schema();
                let compiled = JSONSchema::options()
                    .with_draft(Draft::Draft7)
                    .compile(&schema);
                match compiled {
                    Ok(compiled) => Some((d.name.clone(), compiled)),
                    Err(e) => {
                        tracing::warn!(function = d.name.as_str(), error = %e, "skipping argument schema");
                        None
                    }
                }
            })
            .collect();
        Self {
            declarations,
            validators,
        }
    }

    /// The calendar catalog shared by the whole process.
    pub fn calendar() -> &'static FunctionCatalog {
        &CALENDAR
    }

    pub fn declarations(&self) -> &[FunctionDeclaration] {
        &self.declarations
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Action type for `name`, or `Unknown` when this catalog does not declare it.
    pub fn action_type(&self, name: &str) -> ActionType {
        if self.contains(name) {
            action_type_for(name)
        } else {
            ActionType::Unknown
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.declarations.iter().map(|d| d.name.as_str()).collect()
    }

    /// `tools` array of a completion request.
    pub fn to_tools(&self) -> Vec<Tool<'_>> {
        vec![Tool {
            function_declarations: &self.declarations,
        }]
    }

    /// Schema violations of `arguments` for `name`; empty when valid or unknown.
    pub fn check_arguments(&self, name: &str, arguments: &Value) -> Vec<String> {
        let Some(validator) = self.validators.get(name) else {
            return Vec::new();
        };
        match validator.validate(arguments) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{}: {}", path, e)
                    }
                })
                .collect(),
        }
    }
}

/// Action type reported for an invocation name.
pub fn action_type_for(name: &str) -> ActionType {
    match name {
        CREATE_EVENT => ActionType::CreateEvent,
        GET_ALL_EVENTS => ActionType::GetAllEvents,
        GET_EVENTS_BY_DATE => ActionType::GetEventsByDate,
        UPDATE_EVENT => ActionType::UpdateEvent,
        DELETE_EVENT => ActionType::DeleteEvent,
        _ => ActionType::Unknown,
    }
}

fn calendar_declarations() -> Vec<FunctionDeclaration> {
    use ParamType::{Integer, String as Text};

    vec![
        FunctionDeclaration {
            name: CREATE_EVENT.into(),
            description: "새로운 캘린더 이벤트를 생성합니다".into(),
            parameters: FunctionParameters::object(
                vec![
                    ("title", Text, "이벤트 제목"),
                    ("start_time", Text, "시작 시간 (ISO 형식: 2025-08-03T10:00:00)"),
                    ("duration", Integer, "지속 시간(분)"),
                    ("category", Text, "카테고리 (STUDY, WORK, REST, ACTIVITY)"),
                    ("description", Text, "이벤트 설명"),
                    ("location", Text, "장소"),
                    ("cost", Integer, "스태미나 소모량 (1-100)"),
                ],
                &["title", "start_time", "duration", "category"],
            ),
        },
        FunctionDeclaration {
            name: GET_ALL_EVENTS.into(),
            description: "모든 캘린더 이벤트를 조회합니다".into(),
            parameters: FunctionParameters::object(vec![], &[]),
        },
        FunctionDeclaration {
            name: GET_EVENTS_BY_DATE.into(),
            description: "특정 날짜의 이벤트를 조회합니다".into(),
            parameters: FunctionParameters::object(
                vec![("date", Text, "날짜 (YYYY-MM-DD 형식)")],
                &["date"],
            ),
        },
        FunctionDeclaration {
            name: UPDATE_EVENT.into(),
            description: "기존 캘린더 이벤트를 수정합니다".into(),
            parameters: FunctionParameters::object(
                vec![
                    ("event_id", Integer, "수정할 이벤트 ID"),
                    ("title", Text, "이벤트 제목"),
                    ("start_time", Text, "시작 시간 (ISO 형식)"),
                    ("duration", Integer, "지속 시간(분)"),
                    ("category", Text, "카테고리"),
                    ("description", Text, "이벤트 설명"),
                    ("location", Text, "장소"),
                    ("cost", Integer, "스태미나 소모량 (1-100)"),
                    ("status", Text, "이벤트 상태 (PLANNED, COMPLETED, CANCELED)"),
                ],
                &["event_id", "title", "start_time", "duration", "category"],
            ),
        },
        FunctionDeclaration {
            name: DELETE_EVENT.into(),
            description: "캘린더 이벤트를 삭제합니다".into(),
            parameters: FunctionParameters::object(
                vec![("event_id", Integer, "삭제할 이벤트 ID")],
                &["event_id"],
            ),
        },
    ]
}
