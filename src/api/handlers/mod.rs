//! HTTP request handlers.

pub mod event_handler;
pub mod region_handler;

pub use event_handler::event_routes;
pub use region_handler::region_routes;
