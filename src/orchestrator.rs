//! 대화 오케스트레이터: 한 번의 교환마다 정확히 하나의 응답을 만듭니다.
//!
//! Chat orchestrator.
//!
//! One exchange runs as a straight pipeline: resolve the session id, build the
//! prompt, ask the completion service, interpret the result, then either
//! dispatch the requested function or relay text. The only detached work is
//! the management notification that follows a successful mutation.

use crate::catalog::FunctionCatalog;
use crate::client::CompletionService;
use crate::clock::{format_local, Clock, SystemClock};
use crate::dispatch::{CalendarOperations, FunctionDispatcher, ManagementNotifier, NoopNotifier};
use crate::error_code::StandardErrorCode;
use crate::interpret::{interpret, InterpretError, Parsed};
use crate::messages;
use crate::prompt;
use crate::types::chat::{ActionRecord, ChatReply, ChatRequest};
use crate::types::event::UserId;
use crate::types::tool::Invocation;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const SESSION_PREFIX: &str = "chat-";
const SESSION_SUFFIX_LEN: usize = 8;

pub struct ChatOrchestrator {
    completion: Arc<dyn CompletionService>,
    dispatcher: FunctionDispatcher,
    notifier: Arc<dyn ManagementNotifier>,
    clock: Arc<dyn Clock>,
    catalog: &'static FunctionCatalog,
    notifications: Mutex<Vec<JoinHandle<()>>>,
}

impl ChatOrchestrator {
    pub fn new(completion: Arc<dyn CompletionService>, calendar: Arc<dyn CalendarOperations>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            completion,
            dispatcher: FunctionDispatcher::new(calendar, clock.clone()),
            notifier: Arc::new(NoopNotifier),
            clock,
            catalog: FunctionCatalog::calendar(),
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// Replace the clock used for prompts, argument defaults and timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.dispatcher = self.dispatcher.with_clock(clock.clone());
        self.clock = clock;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn ManagementNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Handle one exchange. Always produces a reply.
    pub async fn handle(&self, request: ChatRequest, caller_id: UserId) -> ChatReply {
        let session_id = resolve_session_id(request.session_id.as_deref());
        let prompt = prompt::build(&request.message, caller_id, self.clock.now());
        debug!(session_id = session_id.as_str(), user_id = caller_id, "prompt built");

        let result = self.completion.complete(&prompt, self.catalog).await;

        let (message, action) = match interpret(&result) {
            Parsed::Invocation {
                invocation,
                accompanying_text,
            } => {
                info!(
                    session_id = session_id.as_str(),
                    function = invocation.name.as_str(),
                    "model requested function"
                );
                let record = self.dispatcher.dispatch(&invocation, caller_id).await;
                if record.success && record.action_type.is_mutation() {
                    self.spawn_notification(invocation).await;
                }
                let message = if accompanying_text.is_empty() {
                    messages::TASK_COMPLETED.to_string()
                } else {
                    accompanying_text
                };
                (message, Some(record))
            }
            Parsed::PlainText(text) => (text, None),
            Parsed::Error(err) => {
                warn!(session_id = session_id.as_str(), error = %err, "completion unusable");
                (caller_message(&err), None)
            }
        };

        self.reply(message, session_id, action)
    }

    fn reply(&self, message: String, session_id: String, action: Option<ActionRecord>) -> ChatReply {
        ChatReply {
            message,
            session_id,
            action_performed: action,
            timestamp: format_local(self.clock.now()),
        }
    }

    /// Wait for notifications launched so far. Replies never depend on this.
    pub async fn wait_for_notifications(&self) {
        let pending = std::mem::take(&mut *self.notifications.lock().await);
        for handle in pending {
            if let Err(e) = handle.await {
                warn!(error = %e, "management notification task did not finish");
            }
        }
    }

    async fn spawn_notification(&self, invocation: Invocation) {
        let notifier = self.notifier.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = notifier.notify(&invocation).await {
                warn!(function = invocation.name.as_str(), error = %e, "management notification failed");
            }
        });
        let mut pending = self.notifications.lock().await;
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }
}

/// Keep a non-blank supplied id, otherwise mint `chat-xxxxxxxx`.
pub fn resolve_session_id(supplied: Option<&str>) -> String {
    match supplied {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => {
            let uuid = uuid::Uuid::new_v4().simple().to_string();
            format!("{}{}", SESSION_PREFIX, &uuid[..SESSION_SUFFIX_LEN])
        }
    }
}

/// Caller-facing text for an unusable completion.
pub fn caller_message(err: &InterpretError) -> String {
    match err.classify() {
        None => messages::NO_RESPONSE.to_string(),
        Some(StandardErrorCode::RateLimited) => messages::RATE_LIMITED.to_string(),
        Some(code) if code.is_auth_failure() => messages::INVALID_API_KEY.to_string(),
        Some(_) => messages::upstream_failure(&err.to_string()),
    }
}
