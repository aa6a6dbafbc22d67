//! Route handlers organized by resource

pub mod books;
pub mod health;

use super::error::ApiError;

/// Catch-all for unknown paths and for known paths with the wrong method.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
