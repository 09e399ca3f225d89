//! 함수 디스패처: 모델이 요청한 호출을 캘린더 작업 하나로 변환합니다.
//!
//! Function dispatcher.
//!
//! Maps one [`Invocation`] to at most one downstream [`CalendarOperations`]
//! call and reports the outcome as an [`ActionRecord`]. Dispatch never fails:
//! missing identifiers, unknown names and downstream errors all become failed
//! records with fixed messages, and the underlying error goes to the log.

pub mod args;
pub mod calendar;
pub mod memory;
pub mod notify;

pub use calendar::{CalendarOperations, HttpCalendarClient};
pub use memory::InMemoryCalendar;
pub use notify::{ManagementNotifier, McpNotifier, NoopNotifier};

use crate::catalog::FunctionCatalog;
use crate::clock::Clock;
use crate::messages;
use crate::types::chat::{ActionRecord, ActionResult, ActionType};
use crate::types::event::UserId;
use crate::types::tool::Invocation;
use std::sync::Arc;
use tracing::{info, warn};

pub struct FunctionDispatcher {
    calendar: Arc<dyn CalendarOperations>,
    clock: Arc<dyn Clock>,
    catalog: &'static FunctionCatalog,
}

impl FunctionDispatcher {
    pub fn new(calendar: Arc<dyn CalendarOperations>, clock: Arc<dyn Clock>) -> Self {
        Self {
            calendar,
            clock,
            catalog: FunctionCatalog::calendar(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn dispatch(&self, invocation: &Invocation, caller_id: UserId) -> ActionRecord {
        let action = self.catalog.action_type(&invocation.name);
        let violations = self
            .catalog
            .check_arguments(&invocation.name, &invocation.arguments_json());
        if !violations.is_empty() {
            warn!(
                function = invocation.name.as_str(),
                violations = ?violations,
                "arguments do not match declared schema"
            );
        }

        let now = self.clock.now();
        let outcome = match action {
            ActionType::CreateEvent => {
                let request = args::event_request(invocation, now, false);
                self.calendar
                    .create_event(caller_id, &request)
                    .await
                    .map(ActionResult::Event)
            }
            ActionType::GetAllEvents => self
                .calendar
                .list_events(caller_id)
                .await
                .map(ActionResult::Events),
            ActionType::GetEventsByDate => {
                let date = args::date(invocation, now);
                self.calendar
                    .list_events_by_date(caller_id, date)
                    .await
                    .map(ActionResult::Events)
            }
            ActionType::UpdateEvent => {
                let Some(event_id) = args::event_id(invocation) else {
                    return ActionRecord::failed(action, messages::EVENT_ID_REQUIRED);
                };
                let request = args::event_request(invocation, now, true);
                self.calendar
                    .update_event(caller_id, event_id, &request)
                    .await
                    .map(ActionResult::Event)
            }
            ActionType::DeleteEvent => {
                let Some(event_id) = args::event_id(invocation) else {
                    return ActionRecord::failed(action, messages::EVENT_ID_REQUIRED);
                };
                self.calendar
                    .delete_event(caller_id, event_id)
                    .await
                    .map(|()| ActionResult::Message(messages::EVENT_DELETED.to_string()))
            }
            ActionType::Unknown => {
                warn!(function = invocation.name.as_str(), "unknown function requested");
                return ActionRecord::failed(action, messages::UNKNOWN_FUNCTION);
            }
        };

        match outcome {
            Ok(result) => {
                info!(action = ?action, user_id = caller_id, "calendar action succeeded");
                ActionRecord::succeeded(action, result)
            }
            Err(e) => {
                warn!(action = ?action, user_id = caller_id, error = %e, "calendar action failed");
                ActionRecord::failed(action, failure_message(action))
            }
        }
    }
}

fn failure_message(action: ActionType) -> &'static str {
    match action {
        ActionType::CreateEvent => messages::CREATE_FAILED,
        ActionType::GetAllEvents | ActionType::GetEventsByDate => messages::LOOKUP_FAILED,
        ActionType::UpdateEvent => messages::UPDATE_FAILED,
        ActionType::DeleteEvent => messages::DELETE_FAILED,
        ActionType::Unknown => messages::UNKNOWN_FUNCTION,
    }
}
