//! # calendar-chat
//!
//! 자연어 대화로 캘린더를 관리하는 어시스턴트 백엔드입니다.
//!
//! Chat-driven calendar assistant backend. A user message is turned into a
//! prompt, sent to a function-calling language model together with a fixed
//! catalog of calendar operations, and the model's answer is either relayed
//! as text or executed as exactly one calendar operation.
//!
//! ## Core Guarantees
//!
//! - **One reply per exchange**: [`ChatOrchestrator::handle`] never fails
//! - **At most one downstream call** per model invocation
//! - **Rate limits are retried**, nothing else is
//! - **Typed arguments**: loosely-typed model output is coerced with defaults
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use calendar_chat::{ChatOrchestrator, ChatRequest, CompletionClientBuilder, InMemoryCalendar};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> calendar_chat::Result<()> {
//!     let client = CompletionClientBuilder::new().api_key("your-api-key").build()?;
//!     let orchestrator = ChatOrchestrator::new(Arc::new(client), Arc::new(InMemoryCalendar::new()));
//!
//!     let reply = orchestrator
//!         .handle(ChatRequest::new("내일 오전 10시에 팀 미팅 잡아줘"), 1)
//!         .await;
//!     println!("{}", reply.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | The five calendar function declarations |
//! | [`prompt`] | Prompt text for one exchange |
//! | [`client`] | Completion client with rate-limit retries |
//! | [`interpret`] | Classifies a completion result |
//! | [`dispatch`] | Executes one invocation against the calendar |
//! | [`orchestrator`] | Drives one exchange end to end |
//! | [`config`] | YAML and environment configuration |
//! | [`types`] | Requests, replies, events and invocations |

pub mod catalog;
pub mod client;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod error_code;
pub mod interpret;
pub mod messages;
pub mod orchestrator;
pub mod prompt;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use catalog::FunctionCatalog;
pub use client::{CompletionClientBuilder, CompletionResult, CompletionService, GeminiClient, RetryPolicy};
pub use config::AssistantConfig;
pub use dispatch::{
    CalendarOperations, FunctionDispatcher, HttpCalendarClient, InMemoryCalendar, ManagementNotifier,
    McpNotifier,
};
pub use interpret::{interpret, InterpretError, Parsed};
pub use orchestrator::ChatOrchestrator;
pub use types::{
    chat::{ActionRecord, ActionResult, ActionType, ChatReply, ChatRequest},
    event::{CalendarEvent, EventCategory, EventRequest, EventStatus, UserId},
    tool::Invocation,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
