//! Event repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use super::entities::event::{self, ActiveModel, Entity as EventEntity};
use crate::domain::{Event, EventFilter, NewEvent};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Event repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Event>>;

    /// List one page of events matching the filter, plus the total match count
    async fn list(
        &self,
        filter: &EventFilter,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<Event>, u64)>;

    /// List every event ordered by year
    async fn list_all(&self) -> AppResult<Vec<Event>>;

    /// List every event hosted by a region, ordered by year
    async fn list_by_noc(&self, noc: &str) -> AppResult<Vec<Event>>;

    /// Count events hosted by a region
    async fn count_by_noc(&self, noc: &str) -> AppResult<u64>;

    /// Insert a new event
    async fn create(&self, event: NewEvent) -> AppResult<Event>;

    /// Overwrite every field of an existing event
    async fn update(&self, event: Event) -> AppResult<Event>;

    /// Delete event by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of EventRepository
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Base query for a filter, ordered by year then id
fn filtered(filter: &EventFilter) -> Select<EventEntity> {
    let mut query = EventEntity::find();

    if let Some(event_type) = filter.event_type {
        query = query.filter(event::Column::EventType.eq(event_type.to_string()));
    }
    if let Some(year) = filter.year {
        query = query.filter(event::Column::Year.eq(year));
    }
    if let Some(noc) = &filter.noc {
        query = query.filter(event::Column::Noc.eq(noc.as_str()));
    }

    query
        .order_by_asc(event::Column::Year)
        .order_by_asc(event::Column::Id)
}

fn into_events(models: Vec<event::Model>) -> AppResult<Vec<Event>> {
    models.into_iter().map(Event::try_from).collect()
}

#[async_trait]
impl EventRepository for EventStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Event>> {
        let result = EventEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(Event::try_from).transpose()
    }

    async fn list(
        &self,
        filter: &EventFilter,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<Event>, u64)> {
        if pagination.offset().is_none() {
            return Err(AppError::BadRequest(format!(
                "page {} is out of range",
                pagination.page
            )));
        }

        let paginator = filtered(filter).paginate(&self.db, pagination.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(pagination.page_index()).await?;
        Ok((into_events(models)?, total))
    }

    async fn list_all(&self) -> AppResult<Vec<Event>> {
        let models = filtered(&EventFilter::default())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        into_events(models)
    }

    async fn list_by_noc(&self, noc: &str) -> AppResult<Vec<Event>> {
        let filter = EventFilter {
            noc: Some(noc.to_string()),
            ..Default::default()
        };
        let models = filtered(&filter)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        into_events(models)
    }

    async fn count_by_noc(&self, noc: &str) -> AppResult<u64> {
        EventEntity::find()
            .filter(event::Column::Noc.eq(noc))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn create(&self, event: NewEvent) -> AppResult<Event> {
        insert_event(&self.db, event).await
    }

    async fn update(&self, event: Event) -> AppResult<Event> {
        let id = event.id;
        let model = ActiveModel::from(event)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => AppError::not_found(format!("Event {}", id)),
                other => AppError::from(other),
            })?;

        Event::try_from(model)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = EventEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("Event {}", id)));
        }

        Ok(())
    }
}

/// Whether an edition with the same season, year and host city exists
pub(crate) async fn edition_exists<C: ConnectionTrait>(conn: &C, event: &NewEvent) -> AppResult<bool> {
    let count = EventEntity::find()
        .filter(event::Column::EventType.eq(event.event_type.to_string()))
        .filter(event::Column::Year.eq(event.year))
        .filter(event::Column::Host.eq(event.host.as_str()))
        .count(conn)
        .await
        .map_err(AppError::from)?;

    Ok(count > 0)
}

/// Insert an event on any connection (pool or transaction)
pub(crate) async fn insert_event<C: ConnectionTrait>(conn: &C, event: NewEvent) -> AppResult<Event> {
    let model = ActiveModel::from(event)
        .insert(conn)
        .await
        .map_err(AppError::from)?;

    Event::try_from(model)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::config::Config;
    use crate::domain::{EventType, Region};
    use crate::infra::repositories::{RegionRepository, RegionStore};
    use crate::infra::Database;

    fn new_event(event_type: EventType, year: i32, host: &str, noc: &str) -> NewEvent {
        NewEvent {
            event_type,
            year,
            country: host.to_string(),
            host: host.to_string(),
            noc: noc.to_string(),
            start: NaiveDate::from_ymd_opt(year, 9, 1),
            end: NaiveDate::from_ymd_opt(year, 9, 10),
            duration: Some(9),
            disabilities_included: None,
            countries: None,
            events: None,
            sports: None,
            participants_m: Some(10),
            participants_f: Some(5),
            participants: Some(15),
            highlights: None,
            url: None,
        }
    }

    async fn store() -> EventStore {
        let db = Database::connect(&Config::testing()).await.unwrap();
        let regions = RegionStore::new(db.get_connection());
        for (noc, name) in [("GBR", "Great Britain"), ("CAN", "Canada"), ("ITA", "Italy")] {
            regions.create(Region::new(noc, name)).await.unwrap();
        }
        EventStore::new(db.get_connection())
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_round_trips_dates() {
        let store = store().await;
        let created = store
            .create(new_event(EventType::Summer, 1960, "Rome", "ITA"))
            .await
            .unwrap();

        assert!(created.id > 0);
        let found = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.start, NaiveDate::from_ymd_opt(1960, 9, 1));
    }

    #[tokio::test]
    async fn test_create_with_unknown_region_violates_foreign_key() {
        let store = store().await;
        let result = store
            .create(new_event(EventType::Summer, 2000, "Sydney", "AUS"))
            .await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let store = store().await;
        store.create(new_event(EventType::Summer, 2012, "London", "GBR")).await.unwrap();
        store.create(new_event(EventType::Winter, 2010, "Vancouver", "CAN")).await.unwrap();
        store.create(new_event(EventType::Winter, 2006, "Turin", "ITA")).await.unwrap();
        store.create(new_event(EventType::Summer, 1960, "Rome", "ITA")).await.unwrap();

        let winter = EventFilter {
            event_type: Some(EventType::Winter),
            ..Default::default()
        };
        let (events, total) = store.list(&winter, &PaginationParams::default()).await.unwrap();
        assert_eq!(total, 2);
        let years: Vec<i32> = events.iter().map(|e| e.year).collect();
        assert_eq!(years, vec![2006, 2010]);

        let italy = EventFilter {
            noc: Some("ITA".to_string()),
            ..Default::default()
        };
        let page = PaginationParams { page: 2, per_page: 1 };
        let (events, total) = store.list(&italy, &page).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].host, "Turin");
    }

    #[tokio::test]
    async fn test_list_by_noc_orders_by_year() {
        let store = store().await;
        store.create(new_event(EventType::Winter, 2006, "Turin", "ITA")).await.unwrap();
        store.create(new_event(EventType::Summer, 2012, "London", "GBR")).await.unwrap();
        store.create(new_event(EventType::Summer, 1960, "Rome", "ITA")).await.unwrap();

        let hosts: Vec<String> = store
            .list_by_noc("ITA")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.host)
            .collect();
        assert_eq!(hosts, vec!["Rome", "Turin"]);
        assert!(store.list_by_noc("CAN").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_rejects_unaddressable_page() {
        let store = store().await;
        let page = PaginationParams {
            page: u64::MAX,
            per_page: 100,
        };

        let result = store.list(&EventFilter::default(), &page).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_deleting_referenced_region_is_conflict() {
        let db = Database::connect(&Config::testing()).await.unwrap();
        let regions = RegionStore::new(db.get_connection());
        regions.create(Region::new("GBR", "Great Britain")).await.unwrap();
        insert_event(&db.get_connection(), new_event(EventType::Summer, 2012, "London", "GBR"))
            .await
            .unwrap();

        let result = regions.delete("GBR").await;

        assert!(matches!(result, Err(AppError::Conflict(ref m)) if m.contains("GBR")));
        assert!(regions.find_by_noc("GBR").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_count_by_noc() {
        let store = store().await;
        store.create(new_event(EventType::Summer, 1960, "Rome", "ITA")).await.unwrap();
        store.create(new_event(EventType::Winter, 2006, "Turin", "ITA")).await.unwrap();

        assert_eq!(store.count_by_noc("ITA").await.unwrap(), 2);
        assert_eq!(store.count_by_noc("GBR").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = store().await;
        let mut event = store
            .create(new_event(EventType::Summer, 2012, "London", "GBR"))
            .await
            .unwrap();

        event.highlights = Some("Record ticket sales".to_string());
        let updated = store.update(event.clone()).await.unwrap();
        assert_eq!(updated.highlights.as_deref(), Some("Record ticket sales"));

        store.delete(event.id).await.unwrap();
        assert!(store.find_by_id(event.id).await.unwrap().is_none());
        assert!(matches!(store.delete(event.id).await, Err(AppError::NotFound(_))));
    }
}
