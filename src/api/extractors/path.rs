//! Path extractors that reject with the JSON error body.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// `Path` whose parse failures become `AppError::BadRequest`.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(ApiPath(value))
    }
}

/// Region code taken from the path, upper-cased like the `noc` query filter.
pub struct NocPath(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for NocPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ApiPath(noc) = ApiPath::<String>::from_request_parts(parts, state).await?;
        Ok(NocPath(noc.to_ascii_uppercase()))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::IntoResponse,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    use super::*;

    async fn get_text(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_unparsable_id_renders_json_error() {
        let router = Router::new().route(
            "/items/:id",
            get(|ApiPath(id): ApiPath<i32>| async move { id.to_string().into_response() }),
        );

        let (status, body) = get_text(router.clone(), "/items/7").await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "7"));

        let (status, body) = get_text(router, "/items/abc").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_noc_path_is_upper_cased() {
        let router = Router::new().route(
            "/regions/:noc",
            get(|NocPath(noc): NocPath| async move { noc }),
        );

        let (status, body) = get_text(router, "/regions/gbr").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "GBR");
    }
}
