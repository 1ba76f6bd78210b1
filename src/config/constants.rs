//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Environments
// =============================================================================

/// Environment variable selecting the configuration preset
pub const ENV_APP_ENV: &str = "APP_ENV";

pub const ENV_DEVELOPMENT: &str = "development";
pub const ENV_TESTING: &str = "testing";
pub const ENV_PRODUCTION: &str = "production";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://paralympics.sqlite?mode=rwc";

/// In-memory SQLite database used by the testing preset
pub const TESTING_DATABASE_URL: &str = "sqlite::memory:";

/// Marker identifying an in-memory SQLite URL
pub const SQLITE_MEMORY_MARKER: &str = ":memory:";

/// Default connection pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// Domain
// =============================================================================

pub const EVENT_TYPE_SUMMER: &str = "summer";
pub const EVENT_TYPE_WINTER: &str = "winter";
