//! Import service - Bulk loading of regions and events.
//!
//! A dataset is loaded inside a single transaction: either every new
//! record is stored or none is.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::domain::{NewEvent, NewRegion, Region};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// Regions and events to load together
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct Dataset {
    #[serde(default)]
    #[validate(nested)]
    pub regions: Vec<NewRegion>,
    #[serde(default)]
    #[validate(nested)]
    pub events: Vec<NewEvent>,
}

/// Outcome of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub regions_created: usize,
    pub regions_skipped: usize,
    pub events_created: usize,
    pub events_skipped: usize,
}

/// Import service trait for dependency injection.
#[async_trait]
pub trait ImportService: Send + Sync {
    /// Store every region and event not already present
    async fn import(&self, dataset: Dataset) -> AppResult<ImportReport>;
}

/// Concrete implementation of ImportService using Unit of Work.
pub struct DataImporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DataImporter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ImportService for DataImporter<U> {
    async fn import(&self, dataset: Dataset) -> AppResult<ImportReport> {
        dataset
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let report = with_transaction!(self.uow, |ctx| {
            let mut report = ImportReport::default();

            for region in dataset.regions {
                if ctx.find_region(&region.noc).await?.is_some() {
                    report.regions_skipped += 1;
                    continue;
                }
                ctx.insert_region(Region::from(region)).await?;
                report.regions_created += 1;
            }

            for event in dataset.events {
                if ctx.find_region(&event.noc).await?.is_none() {
                    return Err(AppError::validation(format!(
                        "Event {} {} refers to unknown NOC '{}'",
                        event.year, event.host, event.noc
                    )));
                }
                // Same season, year and host city
                if ctx.edition_exists(&event).await? {
                    report.events_skipped += 1;
                    continue;
                }
                ctx.insert_event(event.with_derived_fields()).await?;
                report.events_created += 1;
            }

            Ok::<_, AppError>(report)
        })?;

        tracing::info!(
            regions_created = report.regions_created,
            regions_skipped = report.regions_skipped,
            events_created = report.events_created,
            events_skipped = report.events_skipped,
            "Dataset imported"
        );

        Ok(report)
    }
}
