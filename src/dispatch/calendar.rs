use crate::config::HttpConfig;
use crate::transport::HttpTransport;
use crate::types::event::{CalendarEvent, EventId, EventRequest, UserId};
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;

/// Downstream calendar operations the dispatcher may perform.
#[async_trait]
pub trait CalendarOperations: Send + Sync {
    async fn create_event(&self, user_id: UserId, request: &EventRequest) -> Result<CalendarEvent>;

    async fn list_events(&self, user_id: UserId) -> Result<Vec<CalendarEvent>>;

    async fn list_events_by_date(&self, user_id: UserId, date: NaiveDate) -> Result<Vec<CalendarEvent>>;

    async fn update_event(
        &self,
        user_id: UserId,
        event_id: EventId,
        request: &EventRequest,
    ) -> Result<CalendarEvent>;

    async fn delete_event(&self, user_id: UserId, event_id: EventId) -> Result<()>;
}

/// Keep the events whose start time falls on `date`.
pub fn on_date(events: Vec<CalendarEvent>, date: NaiveDate) -> Vec<CalendarEvent> {
    let wanted = date.format("%Y-%m-%d").to_string();
    events
        .into_iter()
        .filter(|e| e.start_date() == wanted)
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OwnedEventBody<'a> {
    user_id: UserId,
    #[serde(flatten)]
    request: &'a EventRequest,
}

/// REST client for the calendar management service.
#[derive(Debug, Clone)]
pub struct HttpCalendarClient {
    transport: HttpTransport,
}

impl HttpCalendarClient {
    pub fn new(base_url: &str, http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(base_url, http)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}

#[async_trait]
impl CalendarOperations for HttpCalendarClient {
    async fn create_event(&self, user_id: UserId, request: &EventRequest) -> Result<CalendarEvent> {
        let body = OwnedEventBody { user_id, request };
        self.transport
            .request_json(Method::POST, "/events", Some(&body))
            .await
    }

    async fn list_events(&self, user_id: UserId) -> Result<Vec<CalendarEvent>> {
        self.transport
            .request_json::<(), _>(Method::GET, &format!("/users/{}/events", user_id), None)
            .await
    }

    async fn list_events_by_date(&self, user_id: UserId, date: NaiveDate) -> Result<Vec<CalendarEvent>> {
        Ok(on_date(self.list_events(user_id).await?, date))
    }

    async fn update_event(
        &self,
        user_id: UserId,
        event_id: EventId,
        request: &EventRequest,
    ) -> Result<CalendarEvent> {
        let body = OwnedEventBody { user_id, request };
        self.transport
            .request_json(Method::PUT, &format!("/events/{}", event_id), Some(&body))
            .await
    }

    async fn delete_event(&self, _user_id: UserId, event_id: EventId) -> Result<()> {
        self.transport
            .request_empty::<()>(Method::DELETE, &format!("/events/{}", event_id), None)
            .await
    }
}
