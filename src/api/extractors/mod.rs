//! Custom request extractors.

mod path;
mod validated_json;

pub use path::{ApiPath, NocPath};
pub use validated_json::ValidatedJson;
