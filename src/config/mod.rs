//! Application configuration module
//!
//! Handles environment variables, configuration presets and
//! application-wide constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::{Config, Environment};
