//! Shared types for DRY compliance.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginatedEvents, PaginationMeta, PaginationParams};
pub use response::MessageResponse;
