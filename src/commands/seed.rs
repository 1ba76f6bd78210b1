//! Seed command - Imports a JSON dataset.

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Serializer};
use crate::services::{Dataset, ImportService, ServiceContainer, Services};

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    tracing::info!("Importing dataset from {}", args.path.display());

    let text = tokio::fs::read_to_string(&args.path).await?;
    let dataset: Dataset = Serializer::from_config(&config).loads(&text)?;

    let db = Database::connect(&config).await?;
    let report = Services::from_connection(db.get_connection())
        .importer()
        .import(dataset)
        .await?;

    println!(
        "regions: {} created, {} skipped; events: {} created, {} skipped",
        report.regions_created,
        report.regions_skipped,
        report.events_created,
        report.events_skipped
    );

    Ok(())
}
