//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{BookId, ValidationError};

/// Extract a book id from the path.
///
/// Holds `None` when the segment is not a well-formed id; handlers answer
/// that the same way as an unknown id.
pub struct BookIdParam(pub Option<BookId>);

impl<S> FromRequestParts<S> for BookIdParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BookNotFound)?;

        Ok(Self(BookId::parse(&raw)))
    }
}

/// JSON body extractor that ignores the content-type header.
///
/// Any body that does not deserialize into `T` is a 400 with a JSON error,
/// instead of axum's plain-text rejection.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::MalformedBody))?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!("rejected request body: {}", e);
            ApiError::Validation(ValidationError::MalformedBody)
        })?;

        Ok(Self(value))
    }
}
