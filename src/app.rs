//! Application factory.
//!
//! Building an application happens in two phases. `initialize_extensions`
//! binds the database and serializer handles described by a `Config`,
//! then `register` wires routes over exactly those handles. Nothing is
//! stored globally, so any number of applications can coexist in one
//! process.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Serializer};

/// Extension handles bound to one application
#[derive(Debug, Clone)]
pub struct Extensions {
    pub database: Arc<Database>,
    pub serializer: Arc<Serializer>,
}

/// Construct fresh extension handles from the settings.
pub async fn initialize_extensions(config: &Config) -> AppResult<Extensions> {
    let database = Database::connect(config).await?;
    let serializer = Serializer::from_config(config);

    tracing::debug!(environment = %config.environment, "Extensions initialized");

    Ok(Extensions {
        database: Arc::new(database),
        serializer: Arc::new(serializer),
    })
}

/// Register routes and models against bound extensions.
pub fn register(extensions: &Extensions) -> Router {
    create_router(AppState::from_extensions(extensions))
}

/// A configured application, ready to serve
pub struct App {
    config: Config,
    extensions: Extensions,
    router: Router,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

/// Build an application from its settings.
pub async fn create_app(config: Config) -> AppResult<App> {
    config.validate()?;
    let extensions = initialize_extensions(&config).await?;
    create_app_with(config, extensions)
}

/// Build an application over already bound extensions.
pub fn create_app_with(config: Config, extensions: Extensions) -> AppResult<App> {
    config.validate()?;
    let router = register(&extensions);

    tracing::info!(environment = %config.environment, "Application created");

    Ok(App {
        config,
        extensions,
        router,
    })
}

impl App {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn database(&self) -> &Database {
        &self.extensions.database
    }

    pub fn serializer(&self) -> &Serializer {
        &self.extensions.serializer
    }

    /// A handle on the router, for in-process requests
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind the configured address and serve until ctrl-c.
    pub async fn serve(self) -> AppResult<()> {
        let addr: SocketAddr = self
            .config
            .server_addr()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on http://{}", listener.local_addr()?);
        tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_extensions_binds_both_handles() {
        let extensions = initialize_extensions(&Config::testing()).await.unwrap();

        extensions.database.ping().await.unwrap();
        assert_eq!(
            *extensions.serializer,
            Serializer::from_config(&Config::testing())
        );
    }

    #[tokio::test]
    async fn test_create_app_rejects_invalid_config() {
        let config = Config {
            max_connections: 4,
            ..Config::testing()
        };

        let result = create_app(config).await;

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
