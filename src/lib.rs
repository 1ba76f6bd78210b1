//! Paralympics API - paralympic games data over HTTP
//!
//! A web service exposing paralympic regions and games editions stored
//! in a relational database.
//!
//! # Architecture Layers
//!
//! - **app**: Application factory and extension binding
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases
//! - **infra**: Infrastructure concerns (database, serialization)
//! - **api**: HTTP handlers and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Load the bundled dataset
//! cargo run -- seed data/paralympics.json
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use app::{create_app, create_app_with, initialize_extensions, register, App, Extensions};
pub use config::Config;
pub use domain::{Event, EventType, Region};
pub use errors::{AppError, AppResult};
