use super::calendar::{on_date, CalendarOperations};
use crate::clock::{format_local, Clock, SystemClock};
use crate::types::event::{CalendarEvent, EventId, EventRequest, UserId};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct StoredEvent {
    owner: UserId,
    event: CalendarEvent,
}

/// In-memory calendar store.
///
/// Ids are assigned sequentially from 1. Events are scoped to their owner:
/// updating or deleting another user's event reports not found. Every call
/// is counted so tests can assert how many downstream calls a dispatch made.
pub struct InMemoryCalendar {
    events: Mutex<Vec<StoredEvent>>,
    next_id: Mutex<EventId>,
    calls: AtomicUsize,
    clock: Arc<dyn Clock>,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            calls: AtomicUsize::new(0),
            clock,
        }
    }

    /// Number of operations invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn not_found(event_id: EventId) -> Error {
        Error::remote(404, format!("event {} not found", event_id))
    }
}

impl Default for InMemoryCalendar {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(event: &mut CalendarEvent, request: &EventRequest) {
    event.title = request.title.clone();
    event.description = request.description.clone();
    event.location = request.location.clone();
    event.start_time = request.start_time.clone();
    event.duration = request.duration;
    event.category = request.category;
    event.cost = request.cost;
    if let Some(status) = request.status {
        event.status = status;
    }
}

#[async_trait]
impl CalendarOperations for InMemoryCalendar {
    async fn create_event(&self, user_id: UserId, request: &EventRequest) -> Result<CalendarEvent> {
        self.record_call();
        let id = {
            let mut next = self.next_id.lock().await;
            let id = *next;
            *next += 1;
            id
        };
        let mut event = CalendarEvent {
            id,
            title: String::new(),
            description: None,
            location: None,
            start_time: String::new(),
            duration: 0,
            category: request.category,
            cost: None,
            status: request.status.unwrap_or_default(),
            created_at: format_local(self.clock.now()),
        };
        apply(&mut event, request);
        self.events.lock().await.push(StoredEvent {
            owner: user_id,
            event: event.clone(),
        });
        Ok(event)
    }

    async fn list_events(&self, user_id: UserId) -> Result<Vec<CalendarEvent>> {
        self.record_call();
        Ok(self
            .events
            .lock()
            .await
            .iter()
            .filter(|s| s.owner == user_id)
            .map(|s| s.event.clone())
            .collect())
    }

    async fn list_events_by_date(&self, user_id: UserId, date: NaiveDate) -> Result<Vec<CalendarEvent>> {
        self.record_call();
        let owned = self
            .events
            .lock()
            .await
            .iter()
            .filter(|s| s.owner == user_id)
            .map(|s| s.event.clone())
            .collect();
        Ok(on_date(owned, date))
    }

    async fn update_event(
        &self,
        user_id: UserId,
        event_id: EventId,
        request: &EventRequest,
    ) -> Result<CalendarEvent> {
        self.record_call();
        let mut events = self.events.lock().await;
        let stored = events
            .iter_mut()
            .find(|s| s.owner == user_id && s.event.id == event_id)
            .ok_or_else(|| Self::not_found(event_id))?;
        apply(&mut stored.event, request);
        Ok(stored.event.clone())
    }

    async fn delete_event(&self, user_id: UserId, event_id: EventId) -> Result<()> {
        self.record_call();
        let mut events = self.events.lock().await;
        let before = events.len();
        events.retain(|s| !(s.owner == user_id && s.event.id == event_id));
        if events.len() == before {
            return Err(Self::not_found(event_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::event::{EventCategory, EventStatus};

    fn request(title: &str, start: &str) -> EventRequest {
        EventRequest {
            title: title.into(),
            description: None,
            location: None,
            start_time: start.into(),
            duration: 30,
            category: EventCategory::Study,
            cost: Some(10),
            status: None,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_scoped_by_owner() {
        let cal = InMemoryCalendar::new();
        let a = cal.create_event(1, &request("a", "2025-08-04T10:00:00")).await.unwrap();
        let b = cal.create_event(2, &request("b", "2025-08-04T11:00:00")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(a.status, EventStatus::Planned);
        assert_eq!(cal.list_events(1).await.unwrap().len(), 1);
        assert!(cal.delete_event(1, b.id).await.is_err());
        assert_eq!(cal.calls(), 4);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_status_unless_given() {
        let cal = InMemoryCalendar::new();
        let created = cal.create_event(1, &request("a", "2025-08-04T10:00:00")).await.unwrap();
        let mut change = request("b", "2025-08-05T10:00:00");
        let updated = cal.update_event(1, created.id, &change).await.unwrap();
        assert_eq!(updated.title, "b");
        assert_eq!(updated.status, EventStatus::Planned);

        change.status = Some(EventStatus::Completed);
        let updated = cal.update_event(1, created.id, &change).await.unwrap();
        assert_eq!(updated.status, EventStatus::Completed);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn list_by_date_filters_on_start_date() {
        let cal = InMemoryCalendar::new();
        cal.create_event(1, &request("a", "2025-08-04T10:00:00")).await.unwrap();
        cal.create_event(1, &request("b", "2025-08-05T10:00:00")).await.unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
        let events = cal.list_events_by_date(1, day).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "b");
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let cal = InMemoryCalendar::new();
        match cal.delete_event(1, 99).await {
            Err(Error::Remote { status, .. }) => assert_eq!(status, 404),
            other => panic!("unexpected {other:?}"),
        }
        assert!(cal.is_empty().await);
    }
}
