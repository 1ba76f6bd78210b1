//! Serve command - Starts the HTTP server.

use crate::app::create_app;
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::AppResult;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    create_app(config).await?.serve().await
}
