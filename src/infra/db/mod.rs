//! Database extension.
//!
//! Owns the SeaORM connection pool of one application and drives its
//! schema migrations.

use std::collections::HashSet;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
    EntityTrait, Statement,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// Connection pool bound to one application
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("backend", &self.connection.get_database_backend())
            .finish()
    }
}

impl Database {
    /// Open the pool and apply pending migrations when the settings ask for it.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;

        if config.run_migrations {
            if let Err(e) = db.run_migrations().await {
                tracing::error!("Failed to run migrations: {}", e);
                return Err(e);
            }
        }

        tracing::info!(
            backend = ?db.connection.get_database_backend(),
            migrated = config.run_migrations,
            "Database connected"
        );
        Ok(db)
    }

    /// Open the pool only, for the `migrate` command.
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(config.max_connections)
            // Keeps an in-memory database alive between queries
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(config.sqlx_logging);

        Ok(Self {
            connection: SeaDatabase::connect(options).await?,
        })
    }

    /// Pool handle for repositories; clones share the pool.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Revert the most recent migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration with whether it has been applied, oldest first.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let done = applied.contains(&name);
                (name, done)
            })
            .collect())
    }

    /// Drop every table, then migrate from scratch.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map(|_| ())
    }
}
