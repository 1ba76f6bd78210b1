//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// JSON body extractor that runs `validator` rules before the handler.
///
/// Malformed bodies and failed rules both become `AppError::Validation`,
/// so clients always receive the JSON error body.
///
/// ```rust,ignore
/// use paralympic_app::api::extractors::ValidatedJson;
/// use paralympic_app::domain::NewRegion;
///
/// async fn create_region(ValidatedJson(payload): ValidatedJson<NewRegion>) {
///     // payload.noc matches the NOC pattern here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Join every rule message, sorted so the output is stable
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewRegion;

    #[test]
    fn test_format_validation_errors_lists_every_message() {
        let payload = NewRegion {
            noc: "gb".to_string(),
            region: String::new(),
            notes: None,
        };

        let errors = payload.validate().unwrap_err();

        assert_eq!(
            format_validation_errors(&errors),
            "NOC must be three uppercase letters, Region name is required"
        );
    }
}
