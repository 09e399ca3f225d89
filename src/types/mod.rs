//! 타입 모듈: 함수 호출, 캘린더 이벤트, 채팅 응답 타입을 정의합니다.
//!
//! # Types Module
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tool`] | Function declarations, invocations and loosely-typed arguments |
//! | [`event`] | Calendar event records and enums |
//! | [`chat`] | Chat request, reply and action record |

pub mod chat;
pub mod event;
pub mod tool;

pub use chat::{ActionRecord, ActionResult, ActionType, ChatReply, ChatRequest};
pub use event::{CalendarEvent, EventCategory, EventId, EventRequest, EventStatus, UserId};
pub use tool::{ArgValue, FunctionDeclaration, FunctionParameters, Invocation, ParamType};
