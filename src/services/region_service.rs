//! Region service - Use cases for National Paralympic Committee regions.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewRegion, Region, UpdateRegion};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Region service trait for dependency injection.
#[async_trait]
pub trait RegionService: Send + Sync {
    /// List all regions
    async fn list_regions(&self) -> AppResult<Vec<Region>>;

    /// Get region by NOC code
    async fn get_region(&self, noc: &str) -> AppResult<Region>;

    /// Create a region, rejecting duplicate codes
    async fn create_region(&self, region: NewRegion) -> AppResult<Region>;

    /// Update name and notes of a region
    async fn update_region(&self, noc: &str, update: UpdateRegion) -> AppResult<Region>;

    /// Delete a region no event refers to
    async fn delete_region(&self, noc: &str) -> AppResult<()>;
}

/// Concrete implementation of RegionService using Unit of Work.
pub struct RegionManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RegionManager<U> {
    /// Create new region service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RegionService for RegionManager<U> {
    async fn list_regions(&self) -> AppResult<Vec<Region>> {
        self.uow.regions().list().await
    }

    async fn get_region(&self, noc: &str) -> AppResult<Region> {
        self.uow
            .regions()
            .find_by_noc(noc)
            .await?
            .ok_or_not_found(format!("Region {}", noc))
    }

    async fn create_region(&self, region: NewRegion) -> AppResult<Region> {
        if self.uow.regions().find_by_noc(&region.noc).await?.is_some() {
            return Err(AppError::conflict(format!("Region {} already exists", region.noc)));
        }

        let created = self.uow.regions().create(Region::from(region)).await?;
        tracing::info!(noc = %created.noc, "Region created");
        Ok(created)
    }

    async fn update_region(&self, noc: &str, update: UpdateRegion) -> AppResult<Region> {
        let mut region = self.get_region(noc).await?;
        region.apply(update);
        self.uow.regions().update(region).await
    }

    async fn delete_region(&self, noc: &str) -> AppResult<()> {
        let hosted = self.uow.events().count_by_noc(noc).await?;
        if hosted > 0 {
            return Err(AppError::conflict(format!(
                "Region {} is referenced by {} event(s)",
                noc, hosted
            )));
        }

        self.uow.regions().delete(noc).await?;
        tracing::info!(noc = %noc, "Region deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::infra::{MockEventRepository, MockRegionRepository};
    use crate::services::test_support::TestUnitOfWork;

    fn service(regions: MockRegionRepository, events: MockEventRepository) -> RegionManager<TestUnitOfWork> {
        RegionManager::new(Arc::new(TestUnitOfWork::new(regions, events)))
    }

    #[tokio::test]
    async fn test_get_region_not_found() {
        let mut regions = MockRegionRepository::new();
        regions.expect_find_by_noc().returning(|_| Ok(None));

        let result = service(regions, MockEventRepository::new())
            .get_region("XYZ")
            .await;

        assert!(matches!(result, Err(AppError::NotFound(ref e)) if e == "Region XYZ"));
    }

    #[tokio::test]
    async fn test_create_region_rejects_duplicate() {
        let mut regions = MockRegionRepository::new();
        regions
            .expect_find_by_noc()
            .with(eq("GBR"))
            .returning(|noc| Ok(Some(Region::new(noc, "Great Britain"))));
        regions.expect_create().never();

        let result = service(regions, MockEventRepository::new())
            .create_region(NewRegion {
                noc: "GBR".to_string(),
                region: "Great Britain".to_string(),
                notes: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_region_drops_empty_notes() {
        let mut regions = MockRegionRepository::new();
        regions.expect_find_by_noc().returning(|_| Ok(None));
        regions
            .expect_create()
            .withf(|region| region.notes.is_none())
            .returning(Ok);

        let created = service(regions, MockEventRepository::new())
            .create_region(NewRegion {
                noc: "NZL".to_string(),
                region: "New Zealand".to_string(),
                notes: Some(String::new()),
            })
            .await
            .unwrap();

        assert_eq!(created.noc, "NZL");
    }

    #[tokio::test]
    async fn test_delete_region_with_events_is_conflict() {
        let mut events = MockEventRepository::new();
        events.expect_count_by_noc().with(eq("ITA")).returning(|_| Ok(2));
        let mut regions = MockRegionRepository::new();
        regions.expect_delete().never();

        let result = service(regions, events).delete_region("ITA").await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_unreferenced_region() {
        let mut events = MockEventRepository::new();
        events.expect_count_by_noc().returning(|_| Ok(0));
        let mut regions = MockRegionRepository::new();
        regions.expect_delete().times(1).returning(|_| Ok(()));

        let result = service(regions, events).delete_region("ZZZ").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_region_applies_changes() {
        let mut regions = MockRegionRepository::new();
        regions
            .expect_find_by_noc()
            .returning(|noc| Ok(Some(Region::new(noc, "Old name"))));
        regions.expect_update().returning(Ok);

        let updated = service(regions, MockEventRepository::new())
            .update_region(
                "AUS",
                UpdateRegion {
                    region: Some("Australia".to_string()),
                    notes: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.region, "Australia");
    }
}
