//! Event service - Use cases for paralympic games editions.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Event, EventFilter, EventSummary, NewEvent, UpdateEvent};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Event service trait for dependency injection.
#[async_trait]
pub trait EventService: Send + Sync {
    /// List one page of events matching the filter
    async fn list_events(
        &self,
        filter: EventFilter,
        pagination: PaginationParams,
    ) -> AppResult<Paginated<Event>>;

    /// Every event hosted by a region, which must exist
    async fn events_by_region(&self, noc: &str) -> AppResult<Vec<Event>>;

    /// Get event by ID
    async fn get_event(&self, id: i32) -> AppResult<Event>;

    /// Create an event hosted by an existing region
    async fn create_event(&self, event: NewEvent) -> AppResult<Event>;

    /// Apply a partial update to an event
    async fn update_event(&self, id: i32, update: UpdateEvent) -> AppResult<Event>;

    /// Delete an event
    async fn delete_event(&self, id: i32) -> AppResult<()>;

    /// Aggregate statistics over all events
    async fn summary(&self) -> AppResult<EventSummary>;
}

/// Concrete implementation of EventService using Unit of Work.
pub struct EventManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EventManager<U> {
    /// Create new event service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_region(&self, noc: &str) -> AppResult<()> {
        match self.uow.regions().find_by_noc(noc).await? {
            Some(_) => Ok(()),
            None => Err(AppError::validation(format!("Unknown NOC '{}'", noc))),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> EventService for EventManager<U> {
    async fn list_events(
        &self,
        filter: EventFilter,
        pagination: PaginationParams,
    ) -> AppResult<Paginated<Event>> {
        let (events, total) = self.uow.events().list(&filter, &pagination).await?;
        Ok(Paginated::new(events, pagination.page, pagination.limit(), total))
    }

    async fn events_by_region(&self, noc: &str) -> AppResult<Vec<Event>> {
        self.uow
            .regions()
            .find_by_noc(noc)
            .await?
            .ok_or_not_found(format!("Region {}", noc))?;

        self.uow.events().list_by_noc(noc).await
    }

    async fn get_event(&self, id: i32) -> AppResult<Event> {
        self.uow
            .events()
            .find_by_id(id)
            .await?
            .ok_or_not_found(format!("Event {}", id))
    }

    async fn create_event(&self, event: NewEvent) -> AppResult<Event> {
        self.ensure_region(&event.noc).await?;

        let created = self.uow.events().create(event.with_derived_fields()).await?;
        tracing::info!(id = created.id, year = created.year, host = %created.host, "Event created");
        Ok(created)
    }

    async fn update_event(&self, id: i32, update: UpdateEvent) -> AppResult<Event> {
        let mut event = self.get_event(id).await?;

        if let Some(noc) = update.noc.as_deref() {
            if noc != event.noc {
                self.ensure_region(noc).await?;
            }
        }

        event.apply(update)?;
        self.uow.events().update(event).await
    }

    async fn delete_event(&self, id: i32) -> AppResult<()> {
        self.uow.events().delete(id).await?;
        tracing::info!(id, "Event deleted");
        Ok(())
    }

    async fn summary(&self) -> AppResult<EventSummary> {
        let events = self.uow.events().list_all().await?;
        Ok(EventSummary::from_events(&events))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::{EventType, Region};
    use crate::infra::{MockEventRepository, MockRegionRepository};
    use crate::services::test_support::TestUnitOfWork;

    fn service(regions: MockRegionRepository, events: MockEventRepository) -> EventManager<TestUnitOfWork> {
        EventManager::new(Arc::new(TestUnitOfWork::new(regions, events)))
    }

    fn new_event(noc: &str) -> NewEvent {
        NewEvent {
            event_type: EventType::Winter,
            year: 2010,
            country: "Canada".to_string(),
            host: "Vancouver".to_string(),
            noc: noc.to_string(),
            start: NaiveDate::from_ymd_opt(2010, 3, 12),
            end: NaiveDate::from_ymd_opt(2010, 3, 21),
            duration: None,
            disabilities_included: None,
            countries: Some(44),
            events: Some(64),
            sports: Some(5),
            participants_m: Some(383),
            participants_f: Some(119),
            participants: None,
            highlights: None,
            url: None,
        }
    }

    fn regions_with(noc: &'static str) -> MockRegionRepository {
        let mut regions = MockRegionRepository::new();
        regions
            .expect_find_by_noc()
            .returning(move |code| Ok((code == noc).then(|| Region::new(code, "Region"))));
        regions
    }

    #[tokio::test]
    async fn test_create_event_requires_known_region() {
        let mut events = MockEventRepository::new();
        events.expect_create().never();

        let result = service(regions_with("CAN"), events)
            .create_event(new_event("XXX"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(ref m)) if m.contains("XXX")));
    }

    #[tokio::test]
    async fn test_create_event_fills_derived_fields() {
        let mut events = MockEventRepository::new();
        events
            .expect_create()
            .withf(|e| e.duration == Some(9) && e.participants == Some(502))
            .returning(|e| Ok(e.into_event(1)));

        let created = service(regions_with("CAN"), events)
            .create_event(new_event("CAN"))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.participants, Some(502));
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let mut events = MockEventRepository::new();
        events.expect_find_by_id().with(eq(42)).returning(|_| Ok(None));

        let result = service(MockRegionRepository::new(), events).get_event(42).await;

        assert!(matches!(result, Err(AppError::NotFound(ref e)) if e == "Event 42"));
    }

    #[tokio::test]
    async fn test_update_event_to_unknown_region_is_rejected() {
        let mut events = MockEventRepository::new();
        events
            .expect_find_by_id()
            .returning(|id| Ok(Some(new_event("CAN").into_event(id))));
        events.expect_update().never();

        let result = service(regions_with("CAN"), events)
            .update_event(
                1,
                UpdateEvent {
                    noc: Some("ZZZ".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_event_recomputes_participants() {
        let mut events = MockEventRepository::new();
        events
            .expect_find_by_id()
            .returning(|id| Ok(Some(new_event("CAN").with_derived_fields().into_event(id))));
        events.expect_update().returning(Ok);

        let updated = service(MockRegionRepository::new(), events)
            .update_event(
                3,
                UpdateEvent {
                    participants_m: Some(400),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.participants, Some(519));
    }

    #[tokio::test]
    async fn test_list_events_wraps_page() {
        let mut events = MockEventRepository::new();
        events
            .expect_list()
            .returning(|_, _| Ok((vec![new_event("CAN").into_event(1)], 21)));

        let page = service(MockRegionRepository::new(), events)
            .list_events(EventFilter::default(), PaginationParams::new(Some(2), Some(10)))
            .await
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.total, 21);
        assert_eq!(page.meta.total_pages, 3);
    }

    #[tokio::test]
    async fn test_events_by_region() {
        let mut events = MockEventRepository::new();
        events
            .expect_list_by_noc()
            .withf(|noc| noc == "CAN")
            .times(1)
            .returning(|noc| Ok(vec![new_event(noc).into_event(1)]));

        let service = service(regions_with("CAN"), events);

        let hosted = service.events_by_region("CAN").await.unwrap();
        assert_eq!(hosted.len(), 1);
        assert_eq!(hosted[0].id, 1);

        let missing = service.events_by_region("ITA").await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_summary_uses_all_events() {
        let mut events = MockEventRepository::new();
        events.expect_list_all().returning(|| {
            Ok(vec![
                new_event("CAN").with_derived_fields().into_event(1),
                new_event("CAN").with_derived_fields().into_event(2),
            ])
        });

        let summary = service(MockRegionRepository::new(), events)
            .summary()
            .await
            .unwrap();

        assert_eq!(summary.total_events, 2);
        assert_eq!(summary.winter_events, 2);
        assert_eq!(summary.total_participants, 1004);
    }
}
