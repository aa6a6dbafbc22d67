//! API error types with IntoResponse
//!
//! Every error becomes a JSON body `{"error": "..."}` with the matching status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::{BookId, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Client input rejected (400)
    Validation(ValidationError),

    /// No book with this id, malformed ids included (404)
    BookNotFound,

    /// No route for this method and path (404)
    RouteNotFound,

    /// Update matched but the re-read came back empty (500)
    Inconsistent { id: BookId },

    /// Storage fault (500, logged)
    Store(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BookNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Inconsistent { .. } | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Validation(e) => e.to_string(),
            Self::BookNotFound => "Libro no encontrado".to_owned(),
            Self::RouteNotFound => "Ruta no encontrada".to_owned(),
            Self::Inconsistent { id } => {
                tracing::error!(%id, "update matched but record vanished");
                "Inconsistencia interna".to_owned()
            }
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Storage error: {}", e);
                "Error interno del servidor".to_owned()
            }
        };

        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Vanished { id } => Self::Inconsistent { id },
            _ => Self::Store(e),
        }
    }
}
